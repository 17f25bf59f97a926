//! Cache module for incremental generation
//!
//! Tracks content hashes of newsletter issues to avoid regenerating
//! unchanged output. The archive page aggregates every issue, so any
//! change to the issue set also schedules an archive rebuild.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Cache file name
const CACHE_FILE: &str = ".newsroom-cache/db.json";

/// Cached state of a single issue source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Content hash of the source file
    pub content_hash: u64,
    /// Output path relative to the public dir
    pub output_path: String,
}

/// Cache database for tracking file changes
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CacheDb {
    /// Version of the cache format
    pub version: u32,
    /// Hash of the site config (changes trigger full rebuild)
    pub config_hash: u64,
    /// Cached issues, keyed by source path
    pub entries: HashMap<String, CacheEntry>,
    /// Total issue count (for detecting additions/deletions)
    pub entry_count: usize,
}

impl CacheDb {
    /// Current cache format version
    const VERSION: u32 = 1;

    /// Load cache from disk, or create a new empty cache
    pub fn load(base_dir: &Path) -> Self {
        let cache_path = base_dir.join(CACHE_FILE);
        if let Ok(content) = fs::read_to_string(&cache_path) {
            if let Ok(cache) = serde_json::from_str::<CacheDb>(&content) {
                if cache.version == Self::VERSION {
                    return cache;
                }
                tracing::info!("Cache version mismatch, rebuilding cache");
            }
        }
        Self::default()
    }

    /// Save cache to disk
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let cache_path = base_dir.join(CACHE_FILE);
        if let Some(parent) = cache_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(cache_path, content)?;
        Ok(())
    }

    /// Create a new cache with version set
    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            ..Default::default()
        }
    }
}

/// Change detection result
#[derive(Debug, Clone)]
pub struct ChangeSet {
    /// Issues that need regeneration (source path)
    pub changed_entries: Vec<String>,
    /// Issues that were deleted (source path)
    pub deleted_entries: Vec<String>,
    /// Whether the archive page and feed need regeneration
    pub rebuild_archive: bool,
    /// Whether to regenerate everything (config changed)
    pub full_rebuild: bool,
}

impl ChangeSet {
    /// Create a changeset indicating full rebuild is needed
    pub fn full_rebuild() -> Self {
        Self {
            changed_entries: Vec::new(),
            deleted_entries: Vec::new(),
            rebuild_archive: true,
            full_rebuild: true,
        }
    }

    /// Create an empty changeset (no changes)
    pub fn empty() -> Self {
        Self {
            changed_entries: Vec::new(),
            deleted_entries: Vec::new(),
            rebuild_archive: false,
            full_rebuild: false,
        }
    }

    /// Check if any changes were detected
    pub fn has_changes(&self) -> bool {
        self.full_rebuild
            || self.rebuild_archive
            || !self.changed_entries.is_empty()
            || !self.deleted_entries.is_empty()
    }

    /// Get summary of changes for logging
    pub fn summary(&self) -> String {
        if self.full_rebuild {
            return "full rebuild required".to_string();
        }

        let mut parts = Vec::new();
        if !self.changed_entries.is_empty() {
            parts.push(format!("{} issues changed", self.changed_entries.len()));
        }
        if !self.deleted_entries.is_empty() {
            parts.push(format!("{} issues deleted", self.deleted_entries.len()));
        }
        if self.rebuild_archive {
            parts.push("archive page".to_string());
        }

        if parts.is_empty() {
            "no changes".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Calculate a hash for file content
pub fn hash_content(content: &str) -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

/// Calculate a hash for a file on disk
pub fn hash_file(path: &Path) -> Result<u64> {
    let content = fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Detect changes between the current issue set and the cached state
pub fn detect_changes(
    cache: &CacheDb,
    base_dir: &Path,
    current_entries: &[(String, u64)], // (source, hash)
) -> Result<ChangeSet> {
    // Check config changes
    let config_path = base_dir.join("_config.yml");
    let config_hash = if config_path.exists() {
        hash_file(&config_path)?
    } else {
        0
    };

    if config_hash != cache.config_hash && cache.config_hash != 0 {
        tracing::info!("Config changed, full rebuild required");
        return Ok(ChangeSet::full_rebuild());
    }

    let mut changeset = ChangeSet::empty();

    // Changed or new issues
    for (source, hash) in current_entries {
        match cache.entries.get(source) {
            Some(cached) if cached.content_hash == *hash => {}
            Some(_) => {
                tracing::debug!("Issue changed: {}", source);
                changeset.changed_entries.push(source.clone());
                changeset.rebuild_archive = true;
            }
            None => {
                tracing::debug!("New issue: {}", source);
                changeset.changed_entries.push(source.clone());
                changeset.rebuild_archive = true;
            }
        }
    }

    // Deleted issues
    let current_sources: HashSet<&str> =
        current_entries.iter().map(|(s, _)| s.as_str()).collect();

    for source in cache.entries.keys() {
        if !current_sources.contains(source.as_str()) {
            tracing::debug!("Deleted issue: {}", source);
            changeset.deleted_entries.push(source.clone());
            changeset.rebuild_archive = true;
        }
    }

    if current_entries.len() != cache.entry_count {
        changeset.rebuild_archive = true;
    }

    Ok(changeset)
}

/// Update cache with current state
pub fn update_cache(
    cache: &mut CacheDb,
    base_dir: &Path,
    entries: &[(String, u64, String)], // (source, hash, output_path)
) -> Result<()> {
    cache.version = CacheDb::VERSION;

    let config_path = base_dir.join("_config.yml");
    cache.config_hash = if config_path.exists() {
        hash_file(&config_path)?
    } else {
        0
    };

    cache.entries.clear();
    for (source, hash, output_path) in entries {
        cache.entries.insert(
            source.clone(),
            CacheEntry {
                content_hash: *hash,
                output_path: output_path.clone(),
            },
        );
    }

    cache.entry_count = entries.len();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cached(entries: &[(&str, u64)]) -> CacheDb {
        let mut cache = CacheDb::new();
        for (source, hash) in entries {
            cache.entries.insert(
                source.to_string(),
                CacheEntry {
                    content_hash: *hash,
                    output_path: format!("newsletter/{}/", source),
                },
            );
        }
        cache.entry_count = entries.len();
        cache
    }

    #[test]
    fn test_no_changes() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = cached(&[("a.md", 1), ("b.md", 2)]);

        let changeset = detect_changes(
            &cache,
            tmp.path(),
            &[("a.md".to_string(), 1), ("b.md".to_string(), 2)],
        )
        .unwrap();

        assert!(!changeset.has_changes());
        assert_eq!(changeset.summary(), "no changes");
    }

    #[test]
    fn test_changed_issue_rebuilds_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = cached(&[("a.md", 1)]);

        let changeset =
            detect_changes(&cache, tmp.path(), &[("a.md".to_string(), 99)]).unwrap();

        assert_eq!(changeset.changed_entries, vec!["a.md"]);
        assert!(changeset.rebuild_archive);
        assert!(!changeset.full_rebuild);
    }

    #[test]
    fn test_new_and_deleted_issues() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = cached(&[("old.md", 1)]);

        let changeset =
            detect_changes(&cache, tmp.path(), &[("new.md".to_string(), 5)]).unwrap();

        assert_eq!(changeset.changed_entries, vec!["new.md"]);
        assert_eq!(changeset.deleted_entries, vec!["old.md"]);
        assert!(changeset.rebuild_archive);
    }

    #[test]
    fn test_config_change_forces_full_rebuild() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("_config.yml"), "title: Changed").unwrap();

        let mut cache = cached(&[("a.md", 1)]);
        cache.config_hash = 12345; // stale hash from an earlier config

        let changeset =
            detect_changes(&cache, tmp.path(), &[("a.md".to_string(), 1)]).unwrap();

        assert!(changeset.full_rebuild);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();

        let mut cache = CacheDb::new();
        update_cache(
            &mut cache,
            tmp.path(),
            &[("a.md".to_string(), 7, "newsletter/2023/a/".to_string())],
        )
        .unwrap();
        cache.save(tmp.path()).unwrap();

        let loaded = CacheDb::load(tmp.path());
        assert_eq!(loaded.entry_count, 1);
        assert_eq!(loaded.entries["a.md"].content_hash, 7);
    }

    #[test]
    fn test_hash_content_stable() {
        assert_eq!(hash_content("abc"), hash_content("abc"));
        assert_ne!(hash_content("abc"), hash_content("abd"));
    }
}
