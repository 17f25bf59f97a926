//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub keywords: Option<Vec<String>>,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    /// Directory (under root) where generated issue pages live
    pub issue_dir: String,

    // Writing
    pub new_issue_name: String,

    // Date format (Moment.js style, used by templates)
    pub date_format: String,

    // Feed
    pub feed_limit: usize,

    // Newsletter page
    #[serde(default)]
    pub newsletter: NewsletterConfig,

    // Code highlighting
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Newsroom".to_string(),
            description: String::new(),
            keywords: None,
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            issue_dir: "newsletter".to_string(),

            new_issue_name: ":year-:month-:title.md".to_string(),

            date_format: "YYYY-MM-DD".to_string(),

            feed_limit: 20,

            newsletter: NewsletterConfig::default(),
            highlight: HighlightConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Newsletter page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    /// Heading of the signup section
    pub heading: String,
    /// Copy shown under the signup heading
    pub body_copy: String,
    /// Hero image of the signup section
    pub image: String,
    /// Heading of the archive section
    pub archive_heading: String,
    /// Form action for the email capture form
    pub signup_action: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            heading: "Newsletter".to_string(),
            body_copy: "Subscribe to our developer newsletter to stay up-to-date on the \
                        newest community activities, posts, and tutorials."
                .to_string(),
            image: "/img/newsletter/page.svg".to_string(),
            archive_heading: "Newsletter Archive".to_string(),
            signup_action: "/subscribe".to_string(),
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Syntect theme used for fenced code blocks
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Newsroom");
        assert_eq!(config.issue_dir, "newsletter");
        assert_eq!(config.feed_limit, 20);
        assert_eq!(config.newsletter.heading, "Newsletter");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: HPE Developer
author: Dev Community Team
url: https://developer.example.com
issue_dir: issues
newsletter:
  heading: Stay in the loop
  archive_heading: Past issues
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "HPE Developer");
        assert_eq!(config.author, "Dev Community Team");
        assert_eq!(config.issue_dir, "issues");
        assert_eq!(config.newsletter.heading, "Stay in the loop");
        assert_eq!(config.newsletter.archive_heading, "Past issues");
        // Untouched fields keep their defaults
        assert_eq!(config.public_dir, "public");
    }

    #[test]
    fn test_unknown_keys_collected() {
        let yaml = r#"
title: Portal
analytics_id: UA-12345
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.extra.contains_key("analytics_id"));
    }
}
