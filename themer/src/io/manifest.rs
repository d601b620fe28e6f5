//! Revisioned-asset manifest lookup (`dist/assets.json`).
//!
//! Build tooling writes a manifest mapping logical asset names to hashed
//! filenames. Lookups fall through to the logical name itself so templates
//! keep working without a manifest.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Subdirectory of the theme root holding built assets.
pub const DIST_DIR: &str = "dist";

#[derive(Debug, Clone)]
pub struct AssetManifest {
    entries: Value,
}

impl AssetManifest {
    /// Load a manifest. A missing file yields an empty manifest.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                entries: Value::Object(serde_json::Map::new()),
            });
        }
        let contents =
            fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;
        let entries: Value = serde_json::from_str(&contents)
            .with_context(|| format!("parse manifest {}", path.display()))?;
        Ok(Self { entries })
    }

    /// Theme-relative path for a logical asset name.
    ///
    /// Mapped names resolve to their hashed filename; unmapped names pass
    /// through unchanged.
    pub fn asset_path(&self, name: &str) -> String {
        match self.entries.get(name).and_then(Value::as_str) {
            Some(mapped) => format!("{DIST_DIR}/{mapped}"),
            None => format!("{DIST_DIR}/{name}"),
        }
    }

    /// Look up a manifest value by key, with dotted-segment traversal into
    /// nested values when no direct key matches.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(direct) = self.entries.get(key) {
            return Some(direct);
        }
        let mut current = &self.entries;
        for segment in key.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }
}
