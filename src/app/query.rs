//! Query state: the search text, the active category, and the requested page.
//!
//! [`QueryState`] is the only mutable input of the filter/paginate pipeline. Its
//! mutators encode the reset rules: changing the search text or the category sends
//! the user back to page 1, page navigation leaves the query untouched.

use crate::catalog::ALL_CATEGORY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_text: String,
    active_category: String,
    current_page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            active_category: ALL_CATEGORY.to_string(),
            current_page: 1,
        }
    }
}

impl QueryState {
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    /// Requested page (1-based). May exceed the page count until the next clamp.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Whether the category gate is open (no category filter).
    #[must_use]
    pub fn is_all_categories(&self) -> bool {
        self.active_category == ALL_CATEGORY
    }

    /// Replaces the search text and resets to page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.current_page = 1;
    }

    /// Appends a character to the search text and resets to page 1.
    pub fn push_search_char(&mut self, c: char) {
        self.search_text.push(c);
        self.current_page = 1;
    }

    /// Removes the last search character and resets to page 1.
    ///
    /// Returns `false` (and leaves the page alone) when the text was already empty.
    pub fn pop_search_char(&mut self) -> bool {
        if self.search_text.pop().is_some() {
            self.current_page = 1;
            true
        } else {
            false
        }
    }

    /// Selects a category label and resets to page 1.
    pub fn set_category(&mut self, label: impl Into<String>) {
        self.active_category = label.into();
        self.current_page = 1;
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Steps back one page; never goes below 1.
    pub fn prev_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Stores the page the paginator settled on.
    pub fn clamp_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_and_page_one() {
        let query = QueryState::default();
        assert_eq!(query.active_category(), "All");
        assert!(query.is_all_categories());
        assert_eq!(query.current_page(), 1);
        assert_eq!(query.search_text(), "");
    }

    #[test]
    fn query_changes_reset_page() {
        let mut query = QueryState::default();
        query.next_page();
        query.next_page();
        assert_eq!(query.current_page(), 3);

        query.push_search_char('a');
        assert_eq!(query.current_page(), 1);

        query.next_page();
        query.set_category("Fiction");
        assert_eq!(query.current_page(), 1);
        assert_eq!(query.search_text(), "a");

        query.next_page();
        assert!(query.pop_search_char());
        assert_eq!(query.current_page(), 1);
    }

    #[test]
    fn navigation_keeps_query() {
        let mut query = QueryState::default();
        query.set_search("dune");
        query.set_category("Fiction");
        query.next_page();
        query.prev_page();
        query.prev_page();
        assert_eq!(query.current_page(), 1);
        assert_eq!(query.search_text(), "dune");
        assert_eq!(query.active_category(), "Fiction");
    }

    #[test]
    fn popping_empty_search_is_noop() {
        let mut query = QueryState::default();
        query.next_page();
        assert!(!query.pop_search_char());
        assert_eq!(query.current_page(), 2);
    }
}
