//! Newsletter archive view
//!
//! The archive page shows one tab per publication year, newest year first,
//! with the selected year's issues laid out as a responsive card grid.
//! This module owns the view logic only: ordering the year groups, tracking
//! which tab is selected, and resolving each issue into display-ready card
//! data. Rendering is left to the template layer.

mod grid;

pub use grid::{layout_for, Breakpoint, GridLayout};

use serde::Serialize;

use crate::content::NewsletterEntry;

/// A bucket of newsletter issues published in the same calendar year
#[derive(Debug, Clone, Serialize)]
pub struct YearGroup {
    /// Year label, e.g. "2023"
    pub year: String,
    /// Issues of that year, in the order supplied by the loader
    pub entries: Vec<NewsletterEntry>,
}

/// One archive card, fully resolved for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub link: String,
    pub date: String,
    pub monthly: bool,
    /// Archive cards always render in newsletter mode
    pub newsletter: bool,
    /// The stars indicator is never shown on archive cards
    pub stars: bool,
}

impl Card {
    fn from_entry(entry: &NewsletterEntry) -> Self {
        Self {
            title: entry.title.clone(),
            description: entry.description.clone(),
            link: entry.card_link().to_string(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            monthly: entry.monthly,
            newsletter: true,
            stars: false,
        }
    }
}

/// The newsletter archive view: year tabs over per-year card grids
#[derive(Debug, Clone)]
pub struct ArchiveView {
    groups: Vec<YearGroup>,
    selected: usize,
}

impl ArchiveView {
    /// Build the view from year groups in any order.
    ///
    /// Tabs display the newest year first. Selection starts at the first
    /// tab and is only ever changed through [`select`](Self::select).
    pub fn new(mut groups: Vec<YearGroup>) -> Self {
        groups.sort_by(|a, b| b.year.cmp(&a.year));
        Self {
            groups,
            selected: 0,
        }
    }

    /// Year labels in display order
    pub fn tabs(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.year.as_str()).collect()
    }

    /// Select the tab at `index`; out-of-range selections are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.groups.len() {
            self.selected = index;
        }
    }

    /// Index of the selected tab (0 when the archive is empty)
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The year group whose issues are currently shown
    pub fn selected_group(&self) -> Option<&YearGroup> {
        self.groups.get(self.selected)
    }

    /// All year groups in display order
    pub fn groups(&self) -> &[YearGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Cards of the selected tab, one per issue
    pub fn selected_cards(&self) -> Vec<Card> {
        self.selected_group()
            .map(|g| g.entries.iter().map(Card::from_entry).collect())
            .unwrap_or_default()
    }

    /// Cards for every tab, in display order
    pub fn panels(&self) -> Vec<Vec<Card>> {
        self.groups
            .iter()
            .map(|g| g.entries.iter().map(Card::from_entry).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn entry(title: &str, year: i32, month: u32) -> NewsletterEntry {
        let date = Local.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap();
        let mut e = NewsletterEntry::new(title.to_string(), date, format!("{}.md", title));
        e.description = format!("{} description", title);
        e.path = format!("/newsletter/{}/{}/", year, slug::slugify(title));
        e
    }

    fn group(year: &str, entries: Vec<NewsletterEntry>) -> YearGroup {
        YearGroup {
            year: year.to_string(),
            entries,
        }
    }

    #[test]
    fn test_tabs_ordered_newest_first() {
        let view = ArchiveView::new(vec![
            group("2021", vec![entry("a", 2021, 3)]),
            group("2023", vec![entry("b", 2023, 5)]),
            group("2022", vec![entry("c", 2022, 7)]),
        ]);

        assert_eq!(view.tabs(), vec!["2023", "2022", "2021"]);
    }

    #[test]
    fn test_tab_order_non_increasing() {
        let view = ArchiveView::new(vec![
            group("2019", vec![]),
            group("2024", vec![]),
            group("2020", vec![]),
            group("2023", vec![]),
        ]);

        let tabs = view.tabs();
        assert!(tabs.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_default_selection_is_newest_year() {
        let view = ArchiveView::new(vec![
            group("2022", vec![entry("old", 2022, 1)]),
            group("2023", vec![entry("new", 2023, 1)]),
        ]);

        assert_eq!(view.selected_index(), 0);
        assert_eq!(view.selected_group().unwrap().year, "2023");
    }

    #[test]
    fn test_select_shows_only_that_groups_entries() {
        let mut view = ArchiveView::new(vec![
            group("2022", vec![entry("march", 2022, 3), entry("june", 2022, 6)]),
            group("2023", vec![entry("jan", 2023, 1)]),
        ]);

        view.select(1);
        let cards = view.selected_cards();
        let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["march", "june"]);
    }

    #[test]
    fn test_out_of_range_selection_ignored() {
        let mut view = ArchiveView::new(vec![group("2023", vec![])]);

        view.select(5);
        assert_eq!(view.selected_index(), 0);

        view.select(0);
        assert_eq!(view.selected_index(), 0);
    }

    #[test]
    fn test_empty_archive() {
        let mut view = ArchiveView::new(Vec::new());

        assert!(view.is_empty());
        assert!(view.tabs().is_empty());
        assert!(view.selected_cards().is_empty());
        assert!(view.selected_group().is_none());

        // Selection stays clamped at zero
        view.select(1);
        assert_eq!(view.selected_index(), 0);
    }

    #[test]
    fn test_card_fields_mirror_entry() {
        let mut e = entry("June 2023", 2023, 6);
        e.monthly = true;
        e.link = Some("https://example.com/june".to_string());
        let view = ArchiveView::new(vec![group("2023", vec![e])]);

        let cards = view.selected_cards();
        assert_eq!(cards.len(), 1);
        let card = &cards[0];
        assert_eq!(card.title, "June 2023");
        assert_eq!(card.description, "June 2023 description");
        assert_eq!(card.link, "https://example.com/june");
        assert_eq!(card.date, "2023-06-01");
        assert!(card.monthly);
        assert!(card.newsletter);
        assert!(!card.stars);
    }

    #[test]
    fn test_card_link_falls_back_to_issue_page() {
        let view = ArchiveView::new(vec![group("2022", vec![entry("march", 2022, 3)])]);
        let cards = view.selected_cards();
        assert_eq!(cards[0].link, "/newsletter/2022/march/");
    }

    #[test]
    fn test_panels_match_groups() {
        let view = ArchiveView::new(vec![
            group("2021", vec![entry("a", 2021, 3)]),
            group("2023", vec![entry("b", 2023, 5), entry("c", 2023, 8)]),
        ]);

        let panels = view.panels();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].len(), 2); // 2023 first
        assert_eq!(panels[1].len(), 1);
    }
}
