//! Initialize a new newsletter portal

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default site configuration written by `init`
const DEFAULT_CONFIG: &str = r#"# Newsroom Configuration

# Site
title: Newsroom
description: ''
keywords:
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public
issue_dir: newsletter

# Writing
new_issue_name: :year-:month-:title.md

# Date / Time format
date_format: YYYY-MM-DD

# Feed
feed_limit: 20

# Newsletter page
newsletter:
  heading: Newsletter
  body_copy: >-
    Subscribe to our developer newsletter to stay up-to-date on the newest
    community activities, posts, and tutorials.
  image: /img/newsletter/page.svg
  archive_heading: Newsletter Archive
  signup_action: /subscribe
"#;

/// Default scaffold for new issues
const DEFAULT_SCAFFOLD: &str = r#"---
title: {{ title }}
date: {{ date }}
description:
link:
monthly: false
---
"#;

/// Initialize a new portal in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("source/_newsletters"))?;
    fs::create_dir_all(target_dir.join("source/img/newsletter"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Directory already contains a _config.yml: {:?}", target_dir);
    }
    fs::write(&config_path, DEFAULT_CONFIG)?;

    fs::write(
        target_dir.join("scaffolds/newsletter.md"),
        DEFAULT_SCAFFOLD,
    )?;

    // A first issue so the archive page has something to show
    let now = chrono::Local::now();
    let sample = format!(
        r#"---
title: Welcome to the Newsletter
date: {}
description: The first issue of our developer newsletter.
monthly: false
---

Welcome! This issue was created by `newsroom-rs init`. Replace it with
your own content in `source/_newsletters/`.
"#,
        now.format("%Y-%m-%d")
    );
    fs::write(
        target_dir.join("source/_newsletters/welcome.md"),
        sample,
    )?;

    fs::write(target_dir.join(".gitignore"), "public/\n.newsroom-cache/\n")?;

    tracing::info!("Initialized portal in {:?}", target_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_scaffolds_portal() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();

        assert!(tmp.path().join("_config.yml").exists());
        assert!(tmp.path().join("scaffolds/newsletter.md").exists());
        assert!(tmp.path().join("source/_newsletters/welcome.md").exists());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }

    #[test]
    fn test_initialized_site_generates() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();

        let site = crate::Newsroom::new(tmp.path()).unwrap();
        site.generate().unwrap();

        let index = std::fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(index.contains("Welcome to the Newsletter"));
    }
}
