//! Request classification into a single rendering context.
//!
//! `RequestInfo` carries the raw per-request conditionals; `classify` maps
//! them onto exactly one `RequestContext` using mutually exclusive,
//! priority-ordered predicates.

use serde::{Deserialize, Serialize};

use crate::core::sanitize::template_name;

/// Taxonomy term addressed by a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRef {
    pub taxonomy: String,
    pub slug: String,
}

/// Author archive addressed by a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub nicename: String,
}

/// Singular post or page addressed by a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRef {
    pub post_type: String,
    /// Custom template name persisted as page metadata. Empty and
    /// `default` both mean "no custom template".
    #[serde(default)]
    pub custom_template: Option<String>,
}

impl PostRef {
    /// Canonical custom template name, or `None` when unset.
    pub fn custom_template(&self) -> Option<String> {
        self.custom_template.as_deref().and_then(template_name)
    }
}

/// Exactly one rendering context per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestContext {
    NotFound,
    Search,
    Author(AuthorRef),
    Taxonomy(TermRef),
    Archive { post_type: String },
    Date,
    Home,
    Singular(PostRef),
    Default,
}

/// Raw per-request conditionals, the input to classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestInfo {
    pub is_404: bool,
    pub is_search: bool,
    pub author: Option<AuthorRef>,
    pub term: Option<TermRef>,
    pub archive_post_type: Option<String>,
    pub is_date: bool,
    pub is_home: bool,
    pub post: Option<PostRef>,
}

/// Classify a request. First match wins:
/// 404 > search > author > taxonomy > post-type archive > date archive >
/// home > singular > default.
pub fn classify(request: &RequestInfo) -> RequestContext {
    if request.is_404 {
        return RequestContext::NotFound;
    }
    if request.is_search {
        return RequestContext::Search;
    }
    if let Some(author) = &request.author {
        return RequestContext::Author(author.clone());
    }
    if let Some(term) = &request.term {
        return RequestContext::Taxonomy(term.clone());
    }
    if let Some(post_type) = &request.archive_post_type {
        return RequestContext::Archive {
            post_type: post_type.clone(),
        };
    }
    if request.is_date {
        return RequestContext::Date;
    }
    if request.is_home {
        return RequestContext::Home;
    }
    if let Some(post) = &request.post {
        return RequestContext::Singular(post.clone());
    }
    RequestContext::Default
}
