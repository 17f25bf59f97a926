//! Generator module - renders the portal to static HTML using the
//! embedded Tera templates

use anyhow::Result;
use chrono::{Datelike, Local};
use std::fs;

use tera::Context;
use walkdir::WalkDir;

use crate::archive::{layout_for, ArchiveView, Breakpoint, YearGroup};
use crate::cache::ChangeSet;
use crate::content::NewsletterEntry;
use crate::helpers::{html_escape, url_for};
use crate::templates::{
    ConfigData, IssueData, NewsletterData, PanelData, TabData, TemplateRenderer,
};
use crate::Newsroom;

/// Base stylesheet of the portal theme
const BASE_STYLESHEET: &str = include_str!("../templates/portal/style.css");

/// Static site generator for the newsletter portal
pub struct Generator {
    site: Newsroom,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Newsroom) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, entries: &[NewsletterEntry], groups: Vec<YearGroup>) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        self.copy_source_assets()?;
        self.generate_stylesheet()?;

        let view = ArchiveView::new(groups);
        self.generate_archive_page(&view)?;
        self.generate_issue_pages(entries)?;
        self.generate_atom_feed(entries)?;

        Ok(())
    }

    /// Regenerate only what a changeset touched
    pub fn generate_incremental(
        &self,
        entries: &[NewsletterEntry],
        groups: Vec<YearGroup>,
        changeset: &ChangeSet,
    ) -> Result<()> {
        if changeset.full_rebuild {
            return self.generate(entries, groups);
        }

        fs::create_dir_all(&self.site.public_dir)?;

        for entry in entries
            .iter()
            .filter(|e| changeset.changed_entries.contains(&e.source))
        {
            self.generate_issue_page(entry)?;
        }

        if changeset.rebuild_archive {
            let view = ArchiveView::new(groups);
            self.generate_archive_page(&view)?;
            self.generate_atom_feed(entries)?;
        }

        Ok(())
    }

    /// Build config data for templates
    fn build_config_data(&self) -> ConfigData {
        let config = &self.site.config;

        ConfigData {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root: config.root.clone(),
            css_url: url_for(config, "css/style.css"),
            feed_url: url_for(config, "atom.xml"),
            keyword: config
                .keywords
                .as_ref()
                .map(|k| k.join(", "))
                .unwrap_or_default(),
        }
    }

    /// Create a base context with common variables
    fn create_base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.build_config_data());
        context.insert(
            "newsletter",
            &NewsletterData {
                heading: self.site.config.newsletter.heading.clone(),
                body_copy: self.site.config.newsletter.body_copy.clone(),
                image: self.site.config.newsletter.image.clone(),
                archive_heading: self.site.config.newsletter.archive_heading.clone(),
                signup_action: self.site.config.newsletter.signup_action.clone(),
            },
        );
        context.insert("current_year", &Local::now().year().to_string());
        context
    }

    /// Generate the signup/archive page
    fn generate_archive_page(&self, view: &ArchiveView) -> Result<()> {
        let selected = view.selected_index();

        let tabs: Vec<TabData> = view
            .tabs()
            .iter()
            .enumerate()
            .map(|(i, year)| TabData {
                year: year.to_string(),
                active: i == selected,
            })
            .collect();

        let panels: Vec<PanelData> = view
            .groups()
            .iter()
            .zip(view.panels())
            .enumerate()
            .map(|(i, (group, cards))| PanelData {
                year: group.year.clone(),
                active: i == selected,
                cards,
            })
            .collect();

        let mut context = self.create_base_context();
        context.insert("page_title", "Newsletter Signup");
        context.insert("tabs", &tabs);
        context.insert("panels", &panels);

        let html = self.renderer.render("archive.html", &context)?;

        let output_path = self.site.public_dir.join("index.html");
        fs::write(&output_path, html)?;
        tracing::info!("Generated archive page ({} years)", tabs.len());

        Ok(())
    }

    /// Generate individual issue pages
    fn generate_issue_pages(&self, entries: &[NewsletterEntry]) -> Result<()> {
        let mut count = 0;
        for entry in entries {
            if entry.has_body() {
                self.generate_issue_page(entry)?;
                count += 1;
            }
        }

        tracing::info!("Generated {} issue pages", count);
        Ok(())
    }

    /// Generate a single issue page
    fn generate_issue_page(&self, entry: &NewsletterEntry) -> Result<()> {
        if !entry.has_body() {
            return Ok(());
        }

        let mut context = self.create_base_context();
        context.insert("page_title", &entry.title);
        context.insert(
            "issue",
            &IssueData {
                title: entry.title.clone(),
                date: entry.date.format("%Y-%m-%d").to_string(),
                content: entry.content.clone(),
                link: entry.link.clone(),
                monthly: entry.monthly,
            },
        );

        let html = self.renderer.render("issue.html", &context)?;

        let clean_path = entry.path.trim_start_matches('/');
        let output_path = self.site.public_dir.join(clean_path).join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated issue: {:?}", output_path);

        Ok(())
    }

    /// Generate the Atom feed, newest issue first
    fn generate_atom_feed(&self, entries: &[NewsletterEntry]) -> Result<()> {
        let config = &self.site.config;

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", html_escape(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}/atom.xml\" rel=\"self\"/>\n",
            config.url.trim_end_matches('/')
        ));
        feed.push_str(&format!(
            "  <link href=\"{}/\"/>\n",
            config.url.trim_end_matches('/')
        ));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            Local::now().to_rfc3339()
        ));
        feed.push_str(&format!("  <id>{}/</id>\n", config.url.trim_end_matches('/')));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            html_escape(&config.author)
        ));

        for entry in entries.iter().rev().take(config.feed_limit) {
            let href = entry
                .link
                .clone()
                .unwrap_or_else(|| entry.permalink.clone());

            feed.push_str("  <entry>\n");
            feed.push_str(&format!(
                "    <title>{}</title>\n",
                html_escape(&entry.title)
            ));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", href));
            feed.push_str(&format!("    <id>{}</id>\n", entry.permalink));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                entry.date.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                entry.date.to_rfc3339()
            ));
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                html_escape(&entry.description)
            ));
            if entry.has_body() {
                feed.push_str(&format!(
                    "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                    entry.content.replace("]]>", "]]&gt;")
                ));
            }
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.site.public_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Write the stylesheet: base styles plus the responsive grid rules
    fn generate_stylesheet(&self) -> Result<()> {
        let mut css = String::from(BASE_STYLESHEET);
        css.push('\n');

        for breakpoint in Breakpoint::ALL {
            let layout = layout_for(breakpoint);
            css.push_str(&format!(
                "/* {} */\n@media (min-width: {}px) {{\n  .card-grid {{\n    grid-template-columns: repeat({}, minmax(0, 1fr));\n    grid-template-rows: repeat({}, minmax(0, auto));\n  }}\n}}\n",
                breakpoint.name(),
                breakpoint.min_width(),
                layout.columns,
                layout.rows
            ));
        }

        let css_dir = self.site.public_dir.join("css");
        fs::create_dir_all(&css_dir)?;
        fs::write(css_dir.join("style.css"), css)?;

        Ok(())
    }

    /// Copy source assets (images, etc.) to the public directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        for dirent in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = dirent.path();
            if !path.is_file() {
                continue;
            }

            // Markdown issues are processed separately
            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown")) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;

            // Skip underscore directories (issue sources, drafts)
            let first_component = relative
                .components()
                .next()
                .and_then(|c| c.as_os_str().to_str());
            if matches!(first_component, Some(first) if first.starts_with('_')) {
                continue;
            }

            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }

        Ok(())
    }
}
