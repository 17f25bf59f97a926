//! Content loader - loads newsletter issues from the source directory

use anyhow::Result;
use chrono::Local;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, NewsletterEntry};
use crate::archive::YearGroup;
use crate::helpers::{encode_url, full_url_for, strip_html, truncate, url_for};
use crate::Newsroom;

/// Directory under source/ that holds newsletter issues
const ISSUES_DIR: &str = "_newsletters";

/// Length of the card description derived from an issue body
const DESCRIPTION_LENGTH: usize = 150;

/// Loads newsletter issues from the source directory
pub struct ContentLoader<'a> {
    site: &'a Newsroom,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Newsroom) -> Self {
        let renderer = MarkdownRenderer::with_theme(&site.config.highlight.theme);
        Self { site, renderer }
    }

    /// Load all issues from source/_newsletters, oldest first
    pub fn load_entries(&self) -> Result<Vec<NewsletterEntry>> {
        let issues_dir = self.site.source_dir.join(ISSUES_DIR);
        if !issues_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for dirent in WalkDir::new(&issues_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = dirent.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_entry(path) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => {
                        tracing::warn!("Failed to load issue {:?}: {}", path, e);
                    }
                }
            }
        }

        // Chronological order; the archive view re-orders years, not issues
        entries.sort_by(|a, b| a.date.cmp(&b.date));

        Ok(entries)
    }

    /// Load issues grouped by publication year
    pub fn year_groups(&self) -> Result<Vec<YearGroup>> {
        Ok(group_by_year(self.load_entries()?))
    }

    /// Load a single issue from a file
    fn load_entry(&self, path: &Path) -> Result<NewsletterEntry> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        // Get file metadata for dates
        let metadata = fs::metadata(path)?;
        let file_modified = metadata
            .modified()
            .ok()
            .map(|t| chrono::DateTime::<Local>::from(t));

        let date = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));

        // Title from front-matter or filename
        let title = fm.title.unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        });

        let source = path
            .strip_prefix(&self.site.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let slug = slug::slugify(
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("untitled"),
        );
        let slug = if slug.is_empty() {
            "untitled".to_string()
        } else {
            slug
        };

        let content_html = self.renderer.render(body)?;

        // Card description: front-matter wins, otherwise the opening of the body
        let description = match fm.description {
            Some(d) => d,
            None => truncate(strip_html(&content_html).trim(), DESCRIPTION_LENGTH, None),
        };

        let mut entry = NewsletterEntry::new(title, date, source);
        let issue_path = format!(
            "{}/{}/{}/",
            self.site.config.issue_dir,
            entry.year_label(),
            encode_url(&slug)
        );
        entry.description = description;
        entry.link = fm.link;
        entry.monthly = fm.monthly;
        entry.slug = slug;
        entry.full_source = path.to_path_buf();
        entry.raw = body.to_string();
        entry.content = content_html;
        entry.path = url_for(&self.site.config, &issue_path);
        entry.permalink = full_url_for(&self.site.config, &issue_path);

        Ok(entry)
    }
}

/// Bucket issues by year label, preserving issue order within each year
pub fn group_by_year(entries: Vec<NewsletterEntry>) -> Vec<YearGroup> {
    let mut years: BTreeMap<String, Vec<NewsletterEntry>> = BTreeMap::new();

    for entry in entries {
        years.entry(entry.year_label()).or_default().push(entry);
    }

    years
        .into_iter()
        .map(|(year, entries)| YearGroup { year, entries })
        .collect()
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
