//! Custom-template discovery under `templates/post-type/`.
//!
//! A post type's template variants are subdirectories of its template
//! directory: `templates/post-type/page/landing/` is the `landing` variant
//! for pages. Discovery feeds listing surfaces, so results are ordered
//! deterministically.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::sanitize::{display_name, template_name};
use crate::io::cache_store::{CacheStore, content_hash};
use crate::io::config::ThemeConfig;
use crate::io::init::ThemePaths;

/// Post type -> raw variant name -> display name.
pub type TemplateIndex = BTreeMap<String, BTreeMap<String, String>>;

/// Walk `templates/post-type/` and index custom template variants.
pub fn scan_custom_templates(theme_root: &Path, config: &ThemeConfig) -> Result<TemplateIndex> {
    let scan_root = ThemePaths::new(theme_root).post_type_dir;
    let mut index = TemplateIndex::new();
    if !scan_root.is_dir() {
        return Ok(index);
    }

    for entry in
        fs::read_dir(&scan_root).with_context(|| format!("read {}", scan_root.display()))?
    {
        let entry = entry.context("read post-type entry")?;
        let post_type_path = entry.path();
        let Some(post_type) = dir_name(&post_type_path) else {
            continue;
        };
        if is_excluded(&post_type, &config.scan.excluded_dirs) {
            continue;
        }

        let mut variants = BTreeMap::new();
        for variant_entry in fs::read_dir(&post_type_path)
            .with_context(|| format!("read {}", post_type_path.display()))?
        {
            let variant_entry = variant_entry.context("read variant entry")?;
            let Some(raw) = dir_name(&variant_entry.path()) else {
                continue;
            };
            if is_excluded(&raw, &config.scan.excluded_dirs) {
                continue;
            }
            let Some(name) = template_name(&raw) else {
                continue;
            };
            variants.insert(name.clone(), display_name(&name));
        }

        if !variants.is_empty() {
            index.insert(post_type, variants);
        }
    }

    debug!(post_types = index.len(), "scanned custom templates");
    Ok(index)
}

/// Discovery with the persistent tier in front of it.
///
/// In development the scan always runs fresh; elsewhere results are served
/// from the cache keyed by the scan root until they expire.
pub fn cached_custom_templates(theme_root: &Path, config: &ThemeConfig) -> Result<TemplateIndex> {
    if !config.persistent_cache_enabled() {
        return scan_custom_templates(theme_root, config);
    }

    let paths = ThemePaths::new(theme_root);
    let store = CacheStore::new(paths.scan_cache_dir);
    let key = content_hash(&paths.post_type_dir.to_string_lossy());

    if let Some(cached) = store.load(&key, config.scan.expiry_secs)? {
        return Ok(cached);
    }

    let index = scan_custom_templates(theme_root, config)?;
    if !index.is_empty() {
        store.store(&key, &index)?;
    }
    Ok(index)
}

fn dir_name(path: &Path) -> Option<String> {
    if !path.is_dir() {
        return None;
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

fn is_excluded(name: &str, excluded: &[String]) -> bool {
    name.starts_with('_') || excluded.iter().any(|entry| entry.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::Environment;

    fn variant_dir(root: &Path, post_type: &str, variant: &str) {
        let dir = root
            .join("templates")
            .join("post-type")
            .join(post_type)
            .join(variant);
        fs::create_dir_all(dir).expect("create variant dir");
    }

    #[test]
    fn missing_scan_root_yields_empty_index() {
        let temp = tempfile::tempdir().expect("tempdir");
        let index =
            scan_custom_templates(temp.path(), &ThemeConfig::default()).expect("scan");
        assert!(index.is_empty());
    }

    #[test]
    fn scan_indexes_variants_with_display_names() {
        let temp = tempfile::tempdir().expect("tempdir");
        variant_dir(temp.path(), "page", "landing");
        variant_dir(temp.path(), "page", "about-us");
        variant_dir(temp.path(), "post", "gallery");

        let index =
            scan_custom_templates(temp.path(), &ThemeConfig::default()).expect("scan");
        assert_eq!(
            index["page"],
            BTreeMap::from([
                ("about-us".to_string(), "About Us".to_string()),
                ("landing".to_string(), "Landing".to_string()),
            ])
        );
        assert_eq!(index["post"]["gallery"], "Gallery");
    }

    #[test]
    fn scan_skips_excluded_private_and_file_entries() {
        let temp = tempfile::tempdir().expect("tempdir");
        variant_dir(temp.path(), "page", "landing");
        variant_dir(temp.path(), "page", "_drafts");
        variant_dir(temp.path(), "page", "Archive");
        variant_dir(temp.path(), "includes", "partials");
        fs::write(
            temp.path().join("templates/post-type/page/main.html"),
            "<main/>",
        )
        .expect("write file entry");

        let index =
            scan_custom_templates(temp.path(), &ThemeConfig::default()).expect("scan");
        assert_eq!(index.keys().collect::<Vec<_>>(), vec!["page"]);
        assert_eq!(index["page"].keys().collect::<Vec<_>>(), vec!["landing"]);
    }

    /// Cached discovery must not rescan: a variant added after the first
    /// call stays invisible until the entry expires.
    #[test]
    fn cached_scan_serves_stale_index_outside_development() {
        let temp = tempfile::tempdir().expect("tempdir");
        variant_dir(temp.path(), "page", "landing");

        let mut config = ThemeConfig::default();
        config.environment = Environment::Production;

        let first = cached_custom_templates(temp.path(), &config).expect("scan");
        assert_eq!(first["page"].len(), 1);

        variant_dir(temp.path(), "page", "gallery");
        let second = cached_custom_templates(temp.path(), &config).expect("scan");
        assert_eq!(second["page"].len(), 1);
    }

    #[test]
    fn development_scan_is_always_fresh() {
        let temp = tempfile::tempdir().expect("tempdir");
        variant_dir(temp.path(), "page", "landing");

        let config = ThemeConfig::default();
        let first = cached_custom_templates(temp.path(), &config).expect("scan");
        assert_eq!(first["page"].len(), 1);

        variant_dir(temp.path(), "page", "gallery");
        let second = cached_custom_templates(temp.path(), &config).expect("scan");
        assert_eq!(second["page"].len(), 2);
    }
}
