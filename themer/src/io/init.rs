//! Theme scaffolding and canonical paths.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::io::config::{ThemeConfig, write_config};

/// All canonical paths within a theme root.
#[derive(Debug, Clone)]
pub struct ThemePaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub templates_dir: PathBuf,
    pub post_type_dir: PathBuf,
    pub virtual_dir: PathBuf,
    pub shared_parts_dir: PathBuf,
    pub base_template_path: PathBuf,
    pub dist_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub cache_dir: PathBuf,
    pub template_cache_dir: PathBuf,
    pub scan_cache_dir: PathBuf,
}

impl ThemePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let templates_dir = root.join("templates");
        let dist_dir = root.join("dist");
        let cache_dir = root.join(".theme-cache");
        Self {
            root: root.clone(),
            config_path: root.join("theme.toml"),
            post_type_dir: templates_dir.join("post-type"),
            virtual_dir: templates_dir.join("virtual"),
            shared_parts_dir: templates_dir.join("shared").join("parts"),
            base_template_path: templates_dir.join("base.html"),
            templates_dir,
            manifest_path: dist_dir.join("assets.json"),
            dist_dir,
            template_cache_dir: cache_dir.join("templates"),
            scan_cache_dir: cache_dir.join("scan"),
            cache_dir,
        }
    }
}

/// Options for `init_theme`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing scaffolded files.
    pub force: bool,
}

/// Create a starter theme in `root`.
///
/// Fails if `templates/` already exists unless `options.force` is set.
pub fn init_theme(root: &Path, options: &InitOptions) -> Result<ThemePaths> {
    let paths = ThemePaths::new(root);
    if paths.templates_dir.exists() && !options.force {
        return Err(anyhow!(
            "theme init: templates/ already exists (use --force to overwrite)"
        ));
    }
    if paths.templates_dir.exists() && !paths.templates_dir.is_dir() {
        return Err(anyhow!("theme init: templates exists but is not a directory"));
    }

    create_dir(&paths.templates_dir)?;
    create_dir(&paths.post_type_dir)?;
    create_dir(&paths.virtual_dir)?;
    create_dir(&paths.shared_parts_dir)?;
    create_dir(&paths.dist_dir)?;

    let config = ThemeConfig::default();
    if options.force || !paths.config_path.exists() {
        write_config(&paths.config_path, &config)?;
    }
    write_file(&paths.base_template_path, BASE_TEMPLATE)?;
    if options.force || !paths.manifest_path.exists() {
        write_file(&paths.manifest_path, EMPTY_MANIFEST)?;
    }
    for part in &config.parts {
        let part_path = paths.shared_parts_dir.join(format!("{part}.html"));
        write_file(&part_path, &part_placeholder(part))?;
    }

    Ok(paths)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("write file {}", path.display()))
}

fn part_placeholder(part: &str) -> String {
    format!("<!-- shared {part} part -->\n")
}

const BASE_TEMPLATE: &str = r#"<!doctype html>
<html>
  <head>
    <title>{{ site_title }}</title>
    {{ parts.head }}
  </head>
  <body>
    <header>{{ parts.header }}</header>
    <main>{{ parts.main }}</main>
    <aside>{{ parts.sidebar }}</aside>
    <footer>{{ parts.footer }}</footer>
  </body>
</html>
"#;

const EMPTY_MANIFEST: &str = "{}\n";

#[cfg(test)]
mod tests {
    use super::*;

    /// Verifies init_theme creates the complete directory structure and files.
    #[test]
    fn init_creates_expected_layout() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();

        let paths = init_theme(root, &InitOptions { force: false }).expect("init");

        assert!(paths.templates_dir.is_dir());
        assert!(paths.post_type_dir.is_dir());
        assert!(paths.virtual_dir.is_dir());
        assert!(paths.shared_parts_dir.is_dir());
        assert!(paths.dist_dir.is_dir());
        assert!(paths.config_path.is_file());
        assert!(paths.base_template_path.is_file());
        assert!(paths.manifest_path.is_file());
        for part in &ThemeConfig::default().parts {
            assert!(paths.shared_parts_dir.join(format!("{part}.html")).is_file());
        }
    }

    /// Verifies init_theme refuses to overwrite without --force.
    #[test]
    fn init_without_force_refuses_existing_templates_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();

        init_theme(root, &InitOptions { force: false }).expect("init");
        let err = init_theme(root, &InitOptions { force: false }).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    /// Verifies init_theme with --force restores scaffolded files.
    #[test]
    fn init_with_force_rewrites_scaffolding() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path();
        let paths = init_theme(root, &InitOptions { force: false }).expect("init");

        fs::write(&paths.base_template_path, "custom").expect("write custom");
        init_theme(root, &InitOptions { force: true }).expect("re-init");

        let base = fs::read_to_string(&paths.base_template_path).expect("read base");
        assert_eq!(base, BASE_TEMPLATE);
    }
}
