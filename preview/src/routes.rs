//! HTTP route handlers: URL-to-request mapping, inspection API, pages.

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, Json};
use axum::routing::get;
use serde::{Deserialize, Serialize};

use themer::core::context::{
    AuthorRef, PostRef, RequestContext, RequestInfo, TermRef, classify,
};
use themer::io::scan::cached_custom_templates;
use themer::render::{RenderContext, render_page};

use crate::state::AppState;

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/hierarchy", get(get_hierarchy))
        .route("/templates", get(get_templates))
}

async fn health() -> &'static str {
    "ok"
}

/// Map a URL path onto raw request conditionals.
///
/// Reserved first segments pick the virtual contexts; a two-segment path
/// falls through to a singular request (`/<post-type>/<slug>`), anything
/// else is a 404.
pub fn request_for_path(path: &str, template: Option<String>) -> RequestInfo {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => RequestInfo {
            is_home: true,
            ..RequestInfo::default()
        },
        ["search"] => RequestInfo {
            is_search: true,
            ..RequestInfo::default()
        },
        ["date"] => RequestInfo {
            is_date: true,
            ..RequestInfo::default()
        },
        ["author", name] => RequestInfo {
            author: Some(AuthorRef {
                nicename: (*name).to_string(),
            }),
            ..RequestInfo::default()
        },
        ["category", slug] | ["tag", slug] => RequestInfo {
            term: Some(TermRef {
                taxonomy: segments[0].to_string(),
                slug: (*slug).to_string(),
            }),
            ..RequestInfo::default()
        },
        ["tax", taxonomy, slug] => RequestInfo {
            term: Some(TermRef {
                taxonomy: (*taxonomy).to_string(),
                slug: (*slug).to_string(),
            }),
            ..RequestInfo::default()
        },
        ["archive", post_type] => RequestInfo {
            archive_post_type: Some((*post_type).to_string()),
            ..RequestInfo::default()
        },
        // A bare top-level slug is a page; `/<post-type>/<slug>` names the
        // post type explicitly.
        [_slug] => RequestInfo {
            post: Some(PostRef {
                post_type: "page".to_string(),
                custom_template: template,
            }),
            ..RequestInfo::default()
        },
        [post_type, _slug] => RequestInfo {
            post: Some(PostRef {
                post_type: (*post_type).to_string(),
                custom_template: template,
            }),
            ..RequestInfo::default()
        },
        _ => RequestInfo {
            is_404: true,
            ..RequestInfo::default()
        },
    }
}

fn default_part() -> String {
    "main".to_string()
}

#[derive(Deserialize)]
struct HierarchyQuery {
    path: String,
    #[serde(default = "default_part")]
    part: String,
    template: Option<String>,
}

#[derive(Serialize)]
struct HierarchyResponse {
    context: RequestContext,
    candidates: Vec<String>,
    resolved: Option<String>,
}

/// GET /api/hierarchy?path=/about/team&part=main - candidates + winner.
async fn get_hierarchy(
    State(state): State<AppState>,
    Query(query): Query<HierarchyQuery>,
) -> Result<Json<HierarchyResponse>, StatusCode> {
    let request = request_for_path(&query.path, query.template.clone());
    let mut resolver = state
        .resolver
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let candidates = resolver
        .hierarchy(&request, &query.part)
        .map_err(|_| StatusCode::BAD_REQUEST)?;
    let resolved = resolver
        .resolve_part(&request, &query.part)
        .map_err(|_| StatusCode::BAD_REQUEST)?
        .map(|path| path.display().to_string());

    Ok(Json(HierarchyResponse {
        context: classify(&request),
        candidates,
        resolved,
    }))
}

/// GET /api/templates - discovered custom templates per post type.
async fn get_templates(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let index = cached_custom_templates(&state.theme_dir, &state.config)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    serde_json::to_value(index)
        .map(Json)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[derive(Deserialize)]
pub struct PageQuery {
    template: Option<String>,
}

/// Fallback handler: render the page for any URL path.
pub async fn page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    uri: Uri,
) -> Result<(StatusCode, Html<String>), StatusCode> {
    let request = request_for_path(uri.path(), query.template);
    let status = if request.is_404 {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    let mut resolver = state
        .resolver
        .lock()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let ctx = RenderContext::for_theme(&resolver, uri.path())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let rendered = render_page(&mut resolver, &request, &ctx)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok((status, Html(rendered)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_to_home() {
        let request = request_for_path("/", None);
        assert_eq!(classify(&request), RequestContext::Home);
    }

    #[test]
    fn reserved_segments_map_to_virtual_contexts() {
        assert_eq!(
            classify(&request_for_path("/search", None)),
            RequestContext::Search
        );
        assert_eq!(
            classify(&request_for_path("/date", None)),
            RequestContext::Date
        );
        assert_eq!(
            classify(&request_for_path("/author/jane", None)),
            RequestContext::Author(AuthorRef {
                nicename: "jane".to_string()
            })
        );
        assert_eq!(
            classify(&request_for_path("/archive/event", None)),
            RequestContext::Archive {
                post_type: "event".to_string()
            }
        );
    }

    #[test]
    fn taxonomy_paths_carry_taxonomy_and_slug() {
        assert_eq!(
            classify(&request_for_path("/category/news", None)),
            RequestContext::Taxonomy(TermRef {
                taxonomy: "category".to_string(),
                slug: "news".to_string()
            })
        );
        assert_eq!(
            classify(&request_for_path("/tax/genre/jazz", None)),
            RequestContext::Taxonomy(TermRef {
                taxonomy: "genre".to_string(),
                slug: "jazz".to_string()
            })
        );
    }

    #[test]
    fn two_segments_map_to_singular_with_template() {
        let request = request_for_path("/page/about", Some("landing".to_string()));
        assert_eq!(
            classify(&request),
            RequestContext::Singular(PostRef {
                post_type: "page".to_string(),
                custom_template: Some("landing".to_string()),
            })
        );
    }

    #[test]
    fn deep_paths_are_not_found() {
        let request = request_for_path("/a/b/c/d", None);
        assert_eq!(classify(&request), RequestContext::NotFound);
    }
}
