//! List portal content

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::helpers::format_date;
use crate::Newsroom;

/// List portal content by type
pub fn run(site: &Newsroom, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(site);

    match content_type {
        "issue" | "issues" => {
            let entries = loader.load_entries()?;
            println!("Issues ({}):", entries.len());
            for entry in entries {
                println!(
                    "  {} - {} [{}]",
                    format_date(&entry.date, &site.config.date_format),
                    entry.title,
                    entry.source
                );
            }
        }
        "year" | "years" => {
            let groups = loader.year_groups()?;
            println!("Years ({}):", groups.len());
            for group in groups.iter().rev() {
                println!("  {} ({} issues)", group.year, group.entries.len());
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown content type: {} (expected 'issue' or 'year')",
                content_type
            );
        }
    }

    Ok(())
}
