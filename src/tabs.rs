// Tab state for the portal page

use crate::category::Category;
use serde::Serialize;

/// Nav tab paired with the content section of the same id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub id: String,
    pub label: String,
}

/// Ordered tabs with at most one active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSet {
    tabs: Vec<Tab>,
    active: Option<usize>,
}

impl TabSet {
    /// Create a tab set with the first tab active
    pub fn new(tabs: Vec<Tab>) -> Self {
        let active = if tabs.is_empty() { None } else { Some(0) };
        Self { tabs, active }
    }

    /// One tab per category, in category order
    pub fn for_categories() -> Self {
        Self::new(
            Category::ALL
                .iter()
                .map(|c| Tab {
                    id: c.tab_id().to_string(),
                    label: c.label().to_string(),
                })
                .collect(),
        )
    }

    /// Make `id` the only active tab. Unknown ids leave the state untouched.
    pub fn activate(&mut self, id: &str) -> bool {
        match self.tabs.iter().position(|t| t.id == id) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active().is_some_and(|t| t.id == id)
    }

    /// Tabs paired with their active flag, for rendering
    pub fn states(&self) -> impl Iterator<Item = (&Tab, bool)> + '_ {
        self.tabs
            .iter()
            .enumerate()
            .map(move |(i, tab)| (tab, Some(i) == self.active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(tabs: &TabSet) -> usize {
        tabs.states().filter(|(_, active)| *active).count()
    }

    #[test]
    fn test_first_tab_active_by_default() {
        let tabs = TabSet::for_categories();
        assert_eq!(tabs.active().map(|t| t.id.as_str()), Some("home"));
        assert_eq!(active_count(&tabs), 1);
    }

    #[test]
    fn test_activate_switches_single_tab() {
        let mut tabs = TabSet::for_categories();
        assert!(tabs.activate("scholarships"));
        assert!(tabs.is_active("scholarships"));
        assert!(!tabs.is_active("home"));
        assert_eq!(active_count(&tabs), 1);
    }

    #[test]
    fn test_activate_is_idempotent() {
        let mut tabs = TabSet::for_categories();
        tabs.activate("resources");
        let before = tabs.clone();
        assert!(tabs.activate("resources"));
        assert_eq!(tabs, before);
        assert_eq!(active_count(&tabs), 1);
    }

    #[test]
    fn test_activate_unknown_keeps_state() {
        let mut tabs = TabSet::for_categories();
        tabs.activate("top_institutes");
        assert!(!tabs.activate("missing"));
        assert!(tabs.is_active("top_institutes"));
    }

    #[test]
    fn test_empty_tab_set() {
        let mut tabs = TabSet::new(Vec::new());
        assert!(tabs.active().is_none());
        assert!(!tabs.activate("home"));
        assert_eq!(active_count(&tabs), 0);
    }
}
