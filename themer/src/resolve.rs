//! Two-tier cached template resolution.
//!
//! For a `(context, part)` query the resolver builds the candidate list,
//! derives a content-addressed key from it, and probes the in-memory tier,
//! then (when enabled) the on-disk tier, before walking the candidates on
//! the filesystem. The winning theme-relative path is cached in both tiers;
//! "no candidate exists" is cached too, as an empty string.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::core::context::{RequestContext, RequestInfo, classify};
use crate::core::hierarchy::candidate_list;
use crate::core::sanitize::normalize_rel_path;
use crate::io::cache_store::{CacheStore, content_hash};
use crate::io::config::ThemeConfig;
use crate::io::init::ThemePaths;

/// Cached sentinel for "no candidate exists on disk".
const MISS: &str = "";

pub struct TemplateResolver {
    theme_root: PathBuf,
    config: ThemeConfig,
    memory: HashMap<String, String>,
    disk: CacheStore,
}

impl TemplateResolver {
    pub fn new(theme_root: impl Into<PathBuf>, config: ThemeConfig) -> Self {
        let theme_root = theme_root.into();
        let disk = CacheStore::new(ThemePaths::new(&theme_root).template_cache_dir);
        Self {
            theme_root,
            config,
            memory: HashMap::new(),
            disk,
        }
    }

    pub fn theme_root(&self) -> &Path {
        &self.theme_root
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Resolve a template part for raw request conditionals.
    pub fn resolve_part(&mut self, request: &RequestInfo, part: &str) -> Result<Option<PathBuf>> {
        let context = classify(request);
        self.resolve_context(&context, part)
    }

    /// Resolve a template part for an already-classified context.
    ///
    /// Returns the absolute normalized path of the first candidate that
    /// exists, or `None`. A missing template is not an error.
    pub fn resolve_context(
        &mut self,
        context: &RequestContext,
        part: &str,
    ) -> Result<Option<PathBuf>> {
        let candidates = candidate_list(context, part)?;
        let key = content_hash(&candidates.join("|"));

        if let Some(hit) = self.memory.get(&key) {
            debug!(%key, "memory tier hit");
            return Ok(self.to_absolute(hit));
        }

        if self.config.persistent_cache_enabled() {
            if let Some(hit) = self.disk.load::<String>(&key, self.config.cache.expiry_secs)? {
                self.memory.insert(key, hit.clone());
                return Ok(self.to_absolute(&hit));
            }
        }

        let winner = candidates
            .iter()
            .find(|rel| self.theme_root.join(rel.as_str()).is_file())
            .cloned()
            .unwrap_or_else(|| MISS.to_string());
        debug!(%key, winner = %winner, "walked candidate list");

        self.memory.insert(key.clone(), winner.clone());
        if self.config.persistent_cache_enabled() {
            self.disk.store(&key, &winner)?;
        }
        Ok(self.to_absolute(&winner))
    }

    /// Candidate list for a request, for inspection surfaces.
    pub fn hierarchy(&self, request: &RequestInfo, part: &str) -> Result<Vec<String>> {
        candidate_list(&classify(request), part)
    }

    /// Drop the memory tier and delete the on-disk tier.
    ///
    /// The host calls this whenever the filesystem state the caches depend
    /// on changes (theme switch, upgrade).
    pub fn clear_cache(&mut self) -> Result<()> {
        self.memory.clear();
        self.disk.clear()
    }

    fn to_absolute(&self, rel: &str) -> Option<PathBuf> {
        if rel == MISS {
            return None;
        }
        Some(self.theme_root.join(normalize_rel_path(rel)))
    }
}
