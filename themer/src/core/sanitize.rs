//! Path-segment validation and template naming rules.

use std::sync::LazyLock;

use anyhow::{Result, anyhow};

/// Characters with no business in a path segment, plus `..` traversal runs.
static INVALID_SEGMENT_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r#"[<>:"|?*]|\.{2,}"#).unwrap());

/// Validate a single path segment before it reaches a filesystem probe.
///
/// Rejects empty segments, separators, reserved characters, and `..` runs.
/// Invalid input is an error, never silently accepted.
pub fn validate_segment(segment: &str) -> Result<&str> {
    if segment.is_empty() {
        return Err(anyhow!("empty path segment"));
    }
    if segment.contains('/') || segment.contains('\\') {
        return Err(anyhow!("path separator in segment '{}'", segment));
    }
    if INVALID_SEGMENT_RE.is_match(segment) {
        return Err(anyhow!("invalid characters in path segment '{}'", segment));
    }
    Ok(segment)
}

/// Collapse repeated `/` separators in a theme-relative path.
pub fn normalize_rel_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_sep = false;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_sep {
                out.push(ch);
            }
            prev_sep = true;
        } else {
            out.push(ch);
            prev_sep = false;
        }
    }
    out
}

/// Reduce a raw template name to its canonical form.
///
/// Takes the basename, strips the `.html` extension, and excludes private
/// (`_`-prefixed) names and the reserved `default` name.
pub fn template_name(raw: &str) -> Option<String> {
    let name = raw.rsplit('/').next().unwrap_or(raw);
    let name = name.strip_suffix(".html").unwrap_or(name);
    if name.is_empty() || name.starts_with('_') || name == "default" {
        return None;
    }
    Some(name.to_string())
}

/// Format a template name for listing surfaces (`about-us` -> `About Us`).
pub fn display_name(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
