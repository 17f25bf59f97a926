//! Newsletter issue model

use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single newsletter issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterEntry {
    /// Stable identifier (relative source path)
    pub id: String,

    /// Issue title
    pub title: String,

    /// Short description shown on the archive card
    pub description: String,

    /// External URL of the hosted issue, if any
    pub link: Option<String>,

    /// Publication date
    pub date: DateTime<Local>,

    /// Whether this is a regular monthly issue
    pub monthly: bool,

    /// Slug (URL-friendly name, derived from the source filename)
    pub slug: String,

    /// Source file path (relative)
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML body
    pub content: String,

    /// URL path of the generated issue page (with root)
    pub path: String,

    /// Full permalink URL
    pub permalink: String,
}

impl NewsletterEntry {
    /// Create a new issue with minimal required fields
    pub fn new(title: String, date: DateTime<Local>, source: String) -> Self {
        let slug = slug::slugify(&title);
        Self {
            id: source.clone(),
            title,
            description: String::new(),
            link: None,
            date,
            monthly: false,
            slug,
            source: source.clone(),
            full_source: PathBuf::from(&source),
            raw: String::new(),
            content: String::new(),
            path: String::new(),
            permalink: String::new(),
        }
    }

    /// Year label used for grouping ("2023")
    pub fn year_label(&self) -> String {
        format!("{:04}", self.date.year())
    }

    /// Destination of the archive card: the hosted issue when a link is
    /// set, the generated issue page otherwise
    pub fn card_link(&self) -> &str {
        self.link.as_deref().unwrap_or(&self.path)
    }

    /// Whether the issue carries a markdown body worth a page of its own
    pub fn has_body(&self) -> bool {
        !self.raw.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_year_label() {
        let date = Local.with_ymd_and_hms(2023, 5, 30, 0, 0, 0).unwrap();
        let entry = NewsletterEntry::new("May issue".to_string(), date, "a.md".to_string());
        assert_eq!(entry.year_label(), "2023");
    }

    #[test]
    fn test_card_link_prefers_external() {
        let date = Local.with_ymd_and_hms(2023, 5, 30, 0, 0, 0).unwrap();
        let mut entry = NewsletterEntry::new("May issue".to_string(), date, "a.md".to_string());
        entry.path = "/newsletter/2023/may-issue/".to_string();
        assert_eq!(entry.card_link(), "/newsletter/2023/may-issue/");

        entry.link = Some("https://mailchi.mp/abc/may".to_string());
        assert_eq!(entry.card_link(), "https://mailchi.mp/abc/may");
    }
}
