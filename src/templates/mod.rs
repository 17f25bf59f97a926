//! Built-in portal theme templates using the Tera template engine
//!
//! All templates are embedded directly in the binary; a site needs no
//! theme directory on disk.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::archive::Card;
use crate::helpers;

/// Template renderer with the embedded portal theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all portal templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Autoescaping is off: contexts carry pre-rendered HTML and
        // already-resolved URLs
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("portal/layout.html")),
            ("archive.html", include_str!("portal/archive.html")),
            ("issue.html", include_str!("portal/issue.html")),
            (
                "partials/head.html",
                include_str!("portal/partials/head.html"),
            ),
            (
                "partials/header.html",
                include_str!("portal/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("portal/partials/footer.html"),
            ),
            (
                "partials/card.html",
                include_str!("portal/partials/card.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(helpers::strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };

    Ok(tera::Value::String(helpers::truncate(&s, length, None)))
}

/// Tera filter: format a YYYY-MM-DD date string
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        // "LL" is the long locale format, e.g. "June 1, 2023"
        let rendered = if format == "LL" {
            date.format("%B %-d, %Y").to_string()
        } else {
            date.format(&helpers::moment_to_chrono_format(&format))
                .to_string()
        };
        return Ok(tera::Value::String(rendered));
    }

    Ok(tera::Value::String(s))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub root: String,
    pub css_url: String,
    pub feed_url: String,
    pub keyword: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsletterData {
    pub heading: String,
    pub body_copy: String,
    pub image: String,
    pub archive_heading: String,
    pub signup_action: String,
}

/// One year tab header
#[derive(Debug, Clone, Serialize)]
pub struct TabData {
    pub year: String,
    pub active: bool,
}

/// One year panel: the card grid behind a tab
#[derive(Debug, Clone, Serialize)]
pub struct PanelData {
    pub year: String,
    pub active: bool,
    pub cards: Vec<Card>,
}

/// A single issue page
#[derive(Debug, Clone, Serialize)]
pub struct IssueData {
    pub title: String,
    pub date: String,
    pub content: String,
    pub link: Option<String>,
    pub monthly: bool,
}
