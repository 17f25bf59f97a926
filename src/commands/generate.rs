//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::fs;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::cache::{self, CacheDb, ChangeSet};
use crate::content::loader::{group_by_year, ContentLoader};
use crate::generator::Generator;
use crate::Newsroom;

/// Generate the static site (with incremental support)
pub fn run(site: &Newsroom) -> Result<()> {
    run_with_options(site, false)
}

/// Generate with force option
pub fn run_with_options(site: &Newsroom, force: bool) -> Result<()> {
    let start = std::time::Instant::now();

    // Load content
    let loader = ContentLoader::new(site);
    let entries = loader.load_entries()?;

    tracing::info!("Loaded {} newsletter issues", entries.len());

    // Load cache and hash the current sources
    let cache_db = CacheDb::load(&site.base_dir);

    let current: Vec<(String, u64)> = entries
        .iter()
        .map(|e| {
            let hash = cache::hash_file(&e.full_source).unwrap_or_else(|_| {
                // Fall back to the in-memory body when the file vanished mid-run
                cache::hash_content(&e.raw)
            });
            (e.source.clone(), hash)
        })
        .collect();

    // Detect changes
    let changeset = if force || cache_db.entry_count == 0 {
        tracing::info!(
            "Full generation (force={}, cache_empty={})",
            force,
            cache_db.entry_count == 0
        );
        ChangeSet::full_rebuild()
    } else {
        cache::detect_changes(&cache_db, &site.base_dir, &current)?
    };

    if !changeset.has_changes() {
        tracing::info!("No changes detected, skipping generation");
        let duration = start.elapsed();
        tracing::info!("Completed in {:.2}s (no changes)", duration.as_secs_f64());
        return Ok(());
    }

    tracing::info!("Changes detected: {}", changeset.summary());

    // Remove output of deleted issues before regenerating
    for source in &changeset.deleted_entries {
        if let Some(cached) = cache_db.entries.get(source) {
            let stale = site.public_dir.join(&cached.output_path);
            if stale.exists() {
                if let Err(e) = fs::remove_dir_all(&stale) {
                    tracing::warn!("Failed to remove stale output {:?}: {}", stale, e);
                }
            }
        }
    }

    // Generate
    let generator = Generator::new(site)?;
    let groups = group_by_year(entries.clone());

    if changeset.full_rebuild {
        generator.generate(&entries, groups)?;
    } else {
        generator.generate_incremental(&entries, groups, &changeset)?;
    }

    // Update cache
    let mut new_cache = CacheDb::new();
    let entries_for_cache: Vec<(String, u64, String)> = entries
        .iter()
        .zip(current.iter())
        .map(|(e, (_, hash))| {
            (
                e.source.clone(),
                *hash,
                e.path.trim_start_matches('/').to_string(),
            )
        })
        .collect();

    cache::update_cache(&mut new_cache, &site.base_dir, &entries_for_cache)?;
    new_cache.save(&site.base_dir)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(site: &Newsroom) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // Watch source directory
    if site.source_dir.exists() {
        watcher.watch(site.source_dir.as_ref(), notify::RecursiveMode::Recursive)?;
    }

    // Watch config file
    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes (incremental mode). Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = run(site) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Continue waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
