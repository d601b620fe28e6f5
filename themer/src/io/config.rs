//! Theme configuration stored at `<theme root>/theme.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::sanitize::validate_segment;

/// Theme configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to sensible values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeConfig {
    /// Site title exposed to templates.
    pub title: String,

    /// Deployment environment; gates the persistent cache tier.
    pub environment: Environment,

    /// Ordered part names rendered into the page wrapper.
    pub parts: Vec<String>,

    pub cache: CacheConfig,
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Explicit override of the environment rule, in either direction.
    pub enabled: Option<bool>,

    /// Lifetime of persistent template-resolution entries in seconds.
    pub expiry_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory names skipped by template discovery (case-insensitive).
    pub excluded_dirs: Vec<String>,

    /// Lifetime of persistent discovery entries in seconds.
    pub expiry_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            expiry_secs: 60 * 60,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: ["archive", "default", "inc", "includes"]
                .map(str::to_string)
                .to_vec(),
            expiry_secs: 7 * 24 * 60 * 60,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            title: "Site".to_string(),
            environment: Environment::Development,
            parts: ["head", "header", "main", "sidebar", "footer"]
                .map(str::to_string)
                .to_vec(),
            cache: CacheConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl ThemeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cache.expiry_secs == 0 {
            return Err(anyhow!("cache.expiry_secs must be > 0"));
        }
        if self.scan.expiry_secs == 0 {
            return Err(anyhow!("scan.expiry_secs must be > 0"));
        }
        if self.parts.is_empty() {
            return Err(anyhow!("parts must be a non-empty array"));
        }
        for part in &self.parts {
            validate_segment(part).with_context(|| format!("parts entry '{}'", part))?;
        }
        Ok(())
    }

    /// True when the on-disk cache tier should be used.
    ///
    /// Defaults to off in development; `cache.enabled` overrides.
    pub fn persistent_cache_enabled(&self) -> bool {
        match self.cache.enabled {
            Some(explicit) => explicit,
            None => self.environment != Environment::Development,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ThemeConfig::default()`.
pub fn load_config(path: &Path) -> Result<ThemeConfig> {
    if !path.exists() {
        let cfg = ThemeConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ThemeConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ThemeConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
