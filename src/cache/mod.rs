//! Persistent topic → content cache.
//!
//! The cache is a single JSON object on disk, loaded once at startup and
//! rewritten in full after every new resolution. Entries are never evicted.

use crate::error::{Result, SeminarError};
use crate::topic::Topic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Failure strings written by earlier versions of the cache file.
const LEGACY_SENTINELS: &[&str] = &[
    "Couldn't extract enough data from Google.",
    crate::web_search::INSUFFICIENT_DATA,
];

/// Where a piece of content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    /// Article text from the encyclopedia.
    Encyclopedia,
    /// Paragraph text scraped from web search results.
    WebSearch,
    /// Nothing usable was found; the content is the failure text.
    Unavailable,
    /// Loaded from a cache file that did not record a source.
    Unrecorded,
}

impl ContentSource {
    /// Whether the content is real text rather than a failure placeholder.
    pub fn is_success(self) -> bool {
        !matches!(self, ContentSource::Unavailable)
    }
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::Encyclopedia => write!(f, "encyclopedia"),
            ContentSource::WebSearch => write!(f, "web search"),
            ContentSource::Unavailable => write!(f, "unavailable"),
            ContentSource::Unrecorded => write!(f, "unrecorded"),
        }
    }
}

/// A cached resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub content: String,
    pub source: ContentSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(content: impl Into<String>, source: ContentSource) -> Self {
        Self {
            content: content.into(),
            source,
            resolved_at: Some(Utc::now()),
        }
    }
}

/// On-disk shape: current entries, or bare strings from older files.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Entry(CacheEntry),
    Legacy(String),
}

impl From<StoredEntry> for CacheEntry {
    fn from(stored: StoredEntry) -> Self {
        match stored {
            StoredEntry::Entry(entry) => entry,
            StoredEntry::Legacy(content) => {
                let source = if LEGACY_SENTINELS.contains(&content.as_str()) {
                    ContentSource::Unavailable
                } else {
                    ContentSource::Unrecorded
                };
                CacheEntry {
                    content,
                    source,
                    resolved_at: None,
                }
            }
        }
    }
}

/// Topic-keyed content cache backed by a JSON file.
#[derive(Debug)]
pub struct ContentCache {
    path: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
}

impl ContentCache {
    /// Load the cache from `path`.
    ///
    /// A missing, unreadable or corrupt file yields an empty cache.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, StoredEntry>>(&raw) {
                Ok(stored) => stored.into_iter().map(|(k, v)| (k, v.into())).collect(),
                Err(e) => {
                    warn!("Cache file {:?} is corrupt, starting empty: {}", path, e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No cache file at {:?}, starting empty", path);
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Cannot read cache file {:?}, starting empty: {}", path, e);
                BTreeMap::new()
            }
        };

        info!("Loaded {} cached topics", entries.len());
        Self { path, entries }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a topic without side effects.
    pub fn get(&self, topic: &Topic) -> Option<&CacheEntry> {
        self.entries.get(topic.as_str())
    }

    /// Insert or overwrite an entry, then persist the whole cache.
    ///
    /// On a persistence failure the entry stays in memory.
    pub fn put(&mut self, topic: &Topic, entry: CacheEntry) -> Result<()> {
        self.entries.insert(topic.as_str().to_string(), entry);
        self.persist()
    }

    /// Remove a topic and persist. Returns whether it was present.
    pub fn remove(&mut self, topic: &Topic) -> Result<bool> {
        let removed = self.entries.remove(topic.as_str()).is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Drop every entry and persist the empty cache.
    pub fn clear(&mut self) -> Result<usize> {
        let count = self.entries.len();
        self.entries.clear();
        self.persist()?;
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(topic, entry)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rewrite the backing file via a temp file and atomic rename.
    fn persist(&self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        serde_json::to_writer(&mut tmp, &self.entries)?;
        tmp.flush()?;
        tmp.persist(&self.path)
            .map_err(|e| SeminarError::Cache(format!("Failed to write {:?}: {}", self.path, e.error)))?;

        debug!("Persisted {} cache entries to {:?}", self.entries.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(s: &str) -> Topic {
        Topic::new(s).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ContentCache::load(dir.path().join("seminars.json"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seminars.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let cache = ContentCache::load(&path);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("seminars.json");

        let mut cache = ContentCache::load(&path);
        cache
            .put(&topic("Photosynthesis"), CacheEntry::new("Plants convert light...", ContentSource::Encyclopedia))
            .unwrap();
        cache
            .put(&topic("Xyzzy"), CacheEntry::new("web text", ContentSource::WebSearch))
            .unwrap();

        let reloaded = ContentCache::load(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(&topic("Photosynthesis")), cache.get(&topic("Photosynthesis")));
        assert_eq!(reloaded.get(&topic("Xyzzy")).unwrap().source, ContentSource::WebSearch);
    }

    #[test]
    fn test_put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = ContentCache::load(dir.path().join("c.json"));
        let t = topic("Rust");
        cache.put(&t, CacheEntry::new("old", ContentSource::WebSearch)).unwrap();
        cache.put(&t, CacheEntry::new("new", ContentSource::Encyclopedia)).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&t).unwrap().content, "new");
    }

    #[test]
    fn test_legacy_flat_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seminars.json");
        std::fs::write(
            &path,
            r#"{"Gravity": "Gravity is a force.", "Qwerty": "Couldn't extract enough data from Google."}"#,
        )
        .unwrap();

        let cache = ContentCache::load(&path);
        let gravity = cache.get(&topic("Gravity")).unwrap();
        assert_eq!(gravity.content, "Gravity is a force.");
        assert_eq!(gravity.source, ContentSource::Unrecorded);
        assert!(gravity.resolved_at.is_none());
        assert_eq!(cache.get(&topic("Qwerty")).unwrap().source, ContentSource::Unavailable);
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.json");
        let mut cache = ContentCache::load(&path);
        cache.put(&topic("A"), CacheEntry::new("a", ContentSource::WebSearch)).unwrap();
        cache.put(&topic("B"), CacheEntry::new("b", ContentSource::WebSearch)).unwrap();

        assert!(cache.remove(&topic("A")).unwrap());
        assert!(!cache.remove(&topic("A")).unwrap());
        assert_eq!(ContentCache::load(&path).len(), 1);

        assert_eq!(cache.clear().unwrap(), 1);
        assert!(ContentCache::load(&path).is_empty());
    }

    #[test]
    fn test_source_success_flag() {
        assert!(ContentSource::Encyclopedia.is_success());
        assert!(ContentSource::WebSearch.is_success());
        assert!(ContentSource::Unrecorded.is_success());
        assert!(!ContentSource::Unavailable.is_success());
    }
}
