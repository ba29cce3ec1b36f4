//! JSON-file key-value cache for edge id sets
//!
//! The mobile original kept these sets in user preferences; here a single
//! JSON file plays that role. Values are held in memory behind a lock and the
//! whole file is rewritten on every mutation.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::warn;

use positivevoice_core::EdgeCache;
use positivevoice_domain::constants::{
    BOOKMARKED_POST_IDS_KEY, BOOKMARKS_SYNCED_AT_KEY, FOLLOWING_USER_IDS_KEY,
    FOLLOWS_SYNCED_AT_KEY,
};
use positivevoice_domain::{Result, VoiceError};

/// Timestamp key recorded alongside a known id-set key
fn synced_at_key(ids_key: &str) -> Option<&'static str> {
    match ids_key {
        BOOKMARKED_POST_IDS_KEY => Some(BOOKMARKS_SYNCED_AT_KEY),
        FOLLOWING_USER_IDS_KEY => Some(FOLLOWS_SYNCED_AT_KEY),
        _ => None,
    }
}

/// File-backed implementation of [`EdgeCache`]
pub struct FileEdgeCache {
    path: PathBuf,
    values: RwLock<HashMap<String, serde_json::Value>>,
}

impl FileEdgeCache {
    /// Open the cache file, starting empty when it is missing or unreadable
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "cache file corrupt, starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self { path, values: RwLock::new(values) }
    }

    /// When the set under `ids_key` was last replaced by server truth
    #[must_use]
    pub fn synced_at(&self, ids_key: &str) -> Option<DateTime<Utc>> {
        let key = synced_at_key(ids_key)?;
        let values = self.values.read();
        let raw = values.get(key)?.as_str()?;
        DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
    }

    fn flush(&self, values: &HashMap<String, serde_json::Value>) -> Result<()> {
        let contents = serde_json::to_string_pretty(values)
            .map_err(|e| VoiceError::Internal(format!("cache serialization: {e}")))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| VoiceError::Internal(format!("cache write: {e}")))
    }
}

impl EdgeCache for FileEdgeCache {
    fn load_ids(&self, key: &str) -> Result<Vec<String>> {
        let values = self.values.read();
        let Some(value) = values.get(key) else {
            return Ok(Vec::new());
        };
        serde_json::from_value(value.clone())
            .map_err(|e| VoiceError::Internal(format!("cache entry for {key}: {e}")))
    }

    fn save_ids(&self, key: &str, ids: &[String]) -> Result<()> {
        let mut values = self.values.write();
        values.insert(key.to_string(), serde_json::json!(ids));
        if let Some(stamp_key) = synced_at_key(key) {
            values.insert(stamp_key.to_string(), serde_json::json!(Utc::now().to_rfc3339()));
        }
        self.flush(&values)
    }

    fn clear(&self, key: &str) -> Result<()> {
        let mut values = self.values.write();
        values.remove(key);
        if let Some(stamp_key) = synced_at_key(key) {
            values.remove(stamp_key);
        }
        self.flush(&values)
    }
}
