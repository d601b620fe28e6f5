//! Test-only helpers for building fixture themes on disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::core::context::{PostRef, RequestInfo};

/// Create an empty theme skeleton (directories only) in a tempdir.
pub fn fixture_theme() -> TempDir {
    let temp = tempfile::tempdir().expect("tempdir");
    for dir in [
        "templates/post-type",
        "templates/virtual",
        "templates/shared/parts",
        "dist",
    ] {
        fs::create_dir_all(temp.path().join(dir)).expect("create theme dir");
    }
    temp
}

/// Write a template (or any theme file) at a theme-relative path.
pub fn write_template(theme_root: &Path, rel: &str, contents: &str) {
    let path = theme_root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create template dir");
    }
    fs::write(path, contents).expect("write template");
}

/// Request conditionals for a singular post of the given type.
pub fn singular_request(post_type: &str, custom_template: Option<&str>) -> RequestInfo {
    RequestInfo {
        post: Some(PostRef {
            post_type: post_type.to_string(),
            custom_template: custom_template.map(str::to_string),
        }),
        ..RequestInfo::default()
    }
}
