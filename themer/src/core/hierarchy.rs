//! Per-context candidate-list construction.
//!
//! Each context maps to a fixed pattern of theme-relative template paths,
//! most specific first. Every list terminates in the universal fallback so
//! resolution can always degrade to "no output" instead of failing.

use anyhow::Result;

use crate::core::context::RequestContext;
use crate::core::sanitize::validate_segment;

/// Directory holding the universal part fallbacks.
pub const SHARED_PARTS_DIR: &str = "templates/shared/parts";

/// Universal fallback candidate for a part.
pub fn universal_fallback(part: &str) -> String {
    format!("{SHARED_PARTS_DIR}/{part}.html")
}

/// Build the ordered candidate list for a context and part.
///
/// Pure: identical inputs yield identical lists. Every interpolated segment
/// is validated before use.
pub fn candidate_list(context: &RequestContext, part: &str) -> Result<Vec<String>> {
    validate_segment(part)?;

    let list = match context {
        RequestContext::NotFound => vec![
            format!("templates/post-type/page/404/{part}.html"),
            format!("templates/virtual/404/{part}.html"),
            universal_fallback(part),
        ],
        RequestContext::Search => vec![
            format!("templates/post-type/page/search/{part}.html"),
            format!("templates/virtual/search/{part}.html"),
            universal_fallback(part),
        ],
        RequestContext::Author(author) => {
            let nicename = validate_segment(&author.nicename)?;
            vec![
                format!("templates/virtual/author/{nicename}/{part}.html"),
                format!("templates/virtual/author/{part}.html"),
                universal_fallback(part),
            ]
        }
        RequestContext::Taxonomy(term) => {
            let taxonomy = validate_segment(&term.taxonomy)?;
            let slug = validate_segment(&term.slug)?;
            vec![
                format!("templates/taxonomy/{taxonomy}/{slug}/{part}.html"),
                format!("templates/taxonomy/{taxonomy}/{part}.html"),
                format!("templates/taxonomy/{part}.html"),
                universal_fallback(part),
            ]
        }
        RequestContext::Archive { post_type } => {
            let post_type = dashed(validate_segment(post_type)?);
            vec![
                format!("templates/{post_type}/archive/{part}.html"),
                format!("templates/virtual/archive/{part}.html"),
                universal_fallback(part),
            ]
        }
        RequestContext::Date => vec![
            format!("templates/virtual/date/{part}.html"),
            universal_fallback(part),
        ],
        RequestContext::Home => vec![
            format!("templates/post-type/page/home/{part}.html"),
            format!("templates/post-type/page/homepage/{part}.html"),
            format!("templates/virtual/home/{part}.html"),
            format!("templates/virtual/homepage/{part}.html"),
            universal_fallback(part),
        ],
        RequestContext::Singular(post) => {
            let post_type = dashed(validate_segment(&post.post_type)?);
            match post.custom_template() {
                Some(custom) => {
                    let custom = validate_segment(&custom)?;
                    vec![
                        format!("templates/post-type/{post_type}/{custom}/{part}.html"),
                        format!("templates/post-type/{post_type}/{part}.html"),
                        universal_fallback(part),
                    ]
                }
                None => vec![
                    format!("templates/post-type/{post_type}/{part}.html"),
                    universal_fallback(part),
                ],
            }
        }
        RequestContext::Default => vec![universal_fallback(part)],
    };

    Ok(list)
}

/// Post types use `-` on disk where identifiers use `_`.
fn dashed(value: &str) -> String {
    value.replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::{AuthorRef, PostRef, TermRef};

    fn sample_contexts() -> Vec<RequestContext> {
        vec![
            RequestContext::NotFound,
            RequestContext::Search,
            RequestContext::Author(AuthorRef {
                nicename: "jane".to_string(),
            }),
            RequestContext::Taxonomy(TermRef {
                taxonomy: "category".to_string(),
                slug: "news".to_string(),
            }),
            RequestContext::Archive {
                post_type: "case_study".to_string(),
            },
            RequestContext::Date,
            RequestContext::Home,
            RequestContext::Singular(PostRef {
                post_type: "page".to_string(),
                custom_template: Some("landing".to_string()),
            }),
            RequestContext::Singular(PostRef {
                post_type: "page".to_string(),
                custom_template: None,
            }),
            RequestContext::Default,
        ]
    }

    #[test]
    fn every_list_ends_in_universal_fallback() {
        for context in sample_contexts() {
            let list = candidate_list(&context, "main").expect("candidates");
            assert_eq!(
                list.last().map(String::as_str),
                Some("templates/shared/parts/main.html"),
                "{context:?}"
            );
        }
    }

    #[test]
    fn not_found_is_most_specific_first() {
        let list = candidate_list(&RequestContext::NotFound, "main").expect("candidates");
        assert_eq!(
            list,
            vec![
                "templates/post-type/page/404/main.html",
                "templates/virtual/404/main.html",
                "templates/shared/parts/main.html",
            ]
        );
    }

    #[test]
    fn custom_template_precedes_generic_post_type() {
        let post = PostRef {
            post_type: "page".to_string(),
            custom_template: Some("landing".to_string()),
        };
        let list =
            candidate_list(&RequestContext::Singular(post), "header").expect("candidates");
        let custom = list
            .iter()
            .position(|p| p == "templates/post-type/page/landing/header.html")
            .expect("custom candidate present");
        let generic = list
            .iter()
            .position(|p| p == "templates/post-type/page/header.html")
            .expect("generic candidate present");
        assert!(custom < generic);
    }

    #[test]
    fn default_custom_template_is_ignored() {
        let post = PostRef {
            post_type: "page".to_string(),
            custom_template: Some("default".to_string()),
        };
        let list = candidate_list(&RequestContext::Singular(post), "main").expect("candidates");
        assert_eq!(
            list,
            vec![
                "templates/post-type/page/main.html",
                "templates/shared/parts/main.html",
            ]
        );
    }

    #[test]
    fn taxonomy_interpolates_taxonomy_and_slug() {
        let term = TermRef {
            taxonomy: "genre".to_string(),
            slug: "jazz".to_string(),
        };
        let list = candidate_list(&RequestContext::Taxonomy(term), "main").expect("candidates");
        assert_eq!(list[0], "templates/taxonomy/genre/jazz/main.html");
        assert_eq!(list[1], "templates/taxonomy/genre/main.html");
        assert_eq!(list[2], "templates/taxonomy/main.html");
    }

    #[test]
    fn post_type_underscores_map_to_dashes() {
        let list = candidate_list(
            &RequestContext::Archive {
                post_type: "case_study".to_string(),
            },
            "main",
        )
        .expect("candidates");
        assert_eq!(list[0], "templates/case-study/archive/main.html");

        let post = PostRef {
            post_type: "case_study".to_string(),
            custom_template: None,
        };
        let list = candidate_list(&RequestContext::Singular(post), "main").expect("candidates");
        assert_eq!(list[0], "templates/post-type/case-study/main.html");
    }

    #[test]
    fn invalid_part_is_rejected() {
        let err = candidate_list(&RequestContext::Default, "../etc").unwrap_err();
        assert!(err.to_string().contains("path separator"));
    }

    #[test]
    fn invalid_slug_is_rejected() {
        let term = TermRef {
            taxonomy: "category".to_string(),
            slug: "..".to_string(),
        };
        assert!(candidate_list(&RequestContext::Taxonomy(term), "main").is_err());
    }
}
