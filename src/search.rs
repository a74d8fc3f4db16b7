//! Card search.
//!
//! Matching is a case-insensitive substring test over a card's visible text,
//! the same rule the page script applies to rendered cards.

use crate::category::Category;
use crate::loader::Portal;
use serde::Serialize;

/// One searchable card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchEntry {
    pub category: Category,
    pub tab: String,
    pub title: String,
    pub text: String,
}

impl SearchEntry {
    /// Empty terms match everything
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty() || self.title.to_lowercase().contains(&term) || self.text.contains(&term)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    /// Index every data card; notices are skipped
    pub fn build(portal: &Portal) -> Self {
        let entries = portal
            .panels
            .iter()
            .flat_map(|panel| {
                panel.data_cards().iter().map(move |card| SearchEntry {
                    category: panel.category,
                    tab: panel.category.tab_id().to_string(),
                    title: card.title().to_string(),
                    text: card.text().to_lowercase(),
                })
            })
            .collect();
        Self { entries }
    }

    pub fn search<'a>(&'a self, term: &'a str) -> impl Iterator<Item = &'a SearchEntry> + 'a {
        self.entries.iter().filter(move |e| e.matches(term))
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
