//! Persistent cache tier with content-addressed keys.
//!
//! Entries are stored one JSON file per key under a store directory. Keys
//! are derived from the content they describe (a joined candidate list, a
//! scan root), so a changed input always lands on a new key and redundant
//! overwrites are last-writer-wins safe. Entries also carry a stored-at
//! timestamp checked against a configured expiry on load.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Compute a short hash of content for cache keys.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..8]) // First 8 bytes = 16 hex chars
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    value: T,
    stored_at_unix: i64,
}

/// File-backed store for one family of cache entries.
pub struct CacheStore {
    entries_dir: PathBuf,
}

impl CacheStore {
    pub fn new(entries_dir: impl Into<PathBuf>) -> Self {
        Self {
            entries_dir: entries_dir.into(),
        }
    }

    /// Path of the entry file for a key.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.entries_dir.join(format!("{key}.json"))
    }

    /// Load an entry, treating missing, stale, and unreadable entries as
    /// misses. Corrupt entries are dropped rather than propagated: the
    /// value can always be recomputed.
    pub fn load<T: DeserializeOwned>(&self, key: &str, expiry_secs: u64) -> Result<Option<T>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents =
            fs::read_to_string(&path).with_context(|| format!("read cache {}", path.display()))?;
        let entry: CacheEntry<T> = match serde_json::from_str(&contents) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(path = %path.display(), %err, "dropping corrupt cache entry");
                return Ok(None);
            }
        };

        let age = Utc::now().timestamp() - entry.stored_at_unix;
        if age < 0 || age as u64 >= expiry_secs {
            debug!(path = %path.display(), age, "cache entry expired");
            return Ok(None);
        }

        debug!(path = %path.display(), "cache hit");
        Ok(Some(entry.value))
    }

    /// Store a value under a key, stamped with the current time.
    pub fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.entry_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create cache dir {}", parent.display()))?;
        }

        let entry = CacheEntry {
            value,
            stored_at_unix: Utc::now().timestamp(),
        };
        let mut buf = serde_json::to_string_pretty(&entry)?;
        buf.push('\n');
        debug!(path = %path.display(), "saving cache entry");
        fs::write(&path, buf).with_context(|| format!("write cache {}", path.display()))?;
        Ok(())
    }

    /// Remove every entry in this store.
    pub fn clear(&self) -> Result<()> {
        if !self.entries_dir.exists() {
            return Ok(());
        }
        fs::remove_dir_all(&self.entries_dir)
            .with_context(|| format!("remove cache dir {}", self.entries_dir.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_deterministic() {
        let hash1 = content_hash("templates/a|templates/b");
        let hash2 = content_hash("templates/a|templates/b");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 16); // 8 bytes = 16 hex chars
    }

    #[test]
    fn content_hash_differs_per_input() {
        assert_ne!(content_hash("a"), content_hash("b"));
    }

    #[test]
    fn store_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(temp.path().join("templates"));

        store.store("abc123", &"templates/shared/parts/main.html".to_string())
            .expect("store");
        let loaded: Option<String> = store.load("abc123", 3600).expect("load");
        assert_eq!(loaded, Some("templates/shared/parts/main.html".to_string()));
    }

    #[test]
    fn missing_key_is_a_miss() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(temp.path().join("templates"));
        let loaded: Option<String> = store.load("nope", 3600).expect("load");
        assert_eq!(loaded, None);
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(temp.path().join("templates"));
        fs::create_dir_all(temp.path().join("templates")).expect("mkdir");
        fs::write(store.entry_path("bad"), "not json").expect("write");

        let loaded: Option<String> = store.load("bad", 3600).expect("load");
        assert_eq!(loaded, None);
    }

    #[test]
    fn expired_entry_is_a_miss() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(temp.path().join("templates"));

        store.store("abc123", &"value".to_string()).expect("store");
        let loaded: Option<String> = store.load("abc123", 0).expect("load");
        assert_eq!(loaded, None);
    }

    #[test]
    fn clear_removes_entries() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = CacheStore::new(temp.path().join("templates"));

        store.store("abc123", &"value".to_string()).expect("store");
        store.clear().expect("clear");
        let loaded: Option<String> = store.load("abc123", 3600).expect("load");
        assert_eq!(loaded, None);
    }
}
