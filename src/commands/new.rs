//! Create a new newsletter issue

use anyhow::Result;
use std::fs;

use crate::Newsroom;

/// Create a new issue under source/_newsletters
pub fn create_issue(site: &Newsroom, title: &str, path: Option<&str>) -> Result<()> {
    let now = chrono::Local::now();

    let target_dir = site.source_dir.join("_newsletters");
    fs::create_dir_all(&target_dir)?;

    // Generate filename
    let filename = if let Some(p) = path {
        format!("{}.md", p)
    } else {
        let issue_name = &site.config.new_issue_name;
        let slug = slug::slugify(title);

        issue_name
            .replace(":title", &slug)
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
    };

    let file_path = target_dir.join(&filename);

    // Load scaffold template
    let scaffold_path = site.base_dir.join("scaffolds").join("newsletter.md");
    let scaffold_content = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        // Default scaffold
        "---\ntitle: {{ title }}\ndate: {{ date }}\ndescription:\nlink:\nmonthly: false\n---\n"
            .to_string()
    };

    let content = scaffold_content
        .replace("{{ title }}", title)
        .replace("{{ date }}", &now.format("%Y-%m-%d").to_string());

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_create_issue() {
        let tmp = tempfile::tempdir().unwrap();
        let site = Newsroom::new(tmp.path()).unwrap();

        create_issue(&site, "June 2026 Newsletter", None).unwrap();

        let now = chrono::Local::now();
        let expected = site.source_dir.join("_newsletters").join(format!(
            "{}-{:02}-june-2026-newsletter.md",
            now.year(),
            now.month()
        ));
        assert!(expected.exists());

        let content = fs::read_to_string(expected).unwrap();
        assert!(content.contains("title: June 2026 Newsletter"));
        assert!(content.contains("monthly: false"));
    }

    #[test]
    fn test_create_issue_refuses_duplicate() {
        let tmp = tempfile::tempdir().unwrap();
        let site = Newsroom::new(tmp.path()).unwrap();

        create_issue(&site, "Duplicate", None).unwrap();
        assert!(create_issue(&site, "Duplicate", None).is_err());
    }

    #[test]
    fn test_create_issue_explicit_path() {
        let tmp = tempfile::tempdir().unwrap();
        let site = Newsroom::new(tmp.path()).unwrap();

        create_issue(&site, "Special", Some("2026-special")).unwrap();
        assert!(site
            .source_dir
            .join("_newsletters/2026-special.md")
            .exists());
    }
}
