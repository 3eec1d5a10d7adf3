use std::collections::{BTreeSet, HashSet};

use super::filter::ActiveFilters;
use super::sort::{self, SortingState};

/// Interaction state of one mounted table.
///
/// Selection is keyed by row id, so it survives paging, sorting and
/// filtering; rows that drop out of the filtered view stay selected but
/// are not counted or acted upon until they are visible again.
#[derive(Debug, Clone, PartialEq)]
pub struct TableState {
    pub sorting: SortingState,
    pub column_filters: ActiveFilters,
    pub global_search: String,
    /// Search text supplied by the owning page; replaces `global_search`
    pub external_search: Option<String>,
    pub selected: HashSet<String>,
    pub hidden_columns: HashSet<String>,
    pub page: usize,
    pub page_size: usize,
}

impl TableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            sorting: SortingState::new(),
            column_filters: ActiveFilters::new(),
            global_search: String::new(),
            external_search: None,
            selected: HashSet::new(),
            hidden_columns: HashSet::new(),
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn set_global_search(&mut self, search: impl Into<String>) {
        self.global_search = search.into();
        self.page = 0;
    }

    /// Sets the page-driven search; a different text starts over from page 0
    pub fn set_external_search(&mut self, search: Option<String>) {
        if self.external_search != search {
            self.external_search = search;
            self.page = 0;
        }
    }

    /// Search text in effect: the external one when set
    pub fn active_search(&self) -> &str {
        self.external_search.as_deref().unwrap_or(&self.global_search)
    }

    /// Replaces the selection of one facet; an empty set clears it
    pub fn set_column_filter(&mut self, key: &str, values: BTreeSet<String>) {
        if values.is_empty() {
            self.column_filters.remove(key);
        } else {
            self.column_filters.insert(key.to_string(), values);
        }
        self.page = 0;
    }

    /// Adds or removes one value of a facet.
    ///
    /// Single-select facets hold at most one value: picking a new one
    /// replaces the previous selection.
    pub fn toggle_filter_value(&mut self, key: &str, value: &str, multi: bool) {
        let mut values = self.column_filters.get(key).cloned().unwrap_or_default();
        if values.contains(value) {
            values.remove(value);
        } else {
            if !multi {
                values.clear();
            }
            values.insert(value.to_string());
        }
        self.set_column_filter(key, values);
    }

    pub fn clear_filters(&mut self) {
        self.column_filters.clear();
        self.page = 0;
    }

    pub fn active_filter_count(&self) -> usize {
        self.column_filters.values().map(BTreeSet::len).sum()
    }

    pub fn toggle_sort(&mut self, column_id: &str, multi: bool) {
        sort::toggle_sort(&mut self.sorting, column_id, multi);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 0;
    }

    pub fn toggle_row(&mut self, id: &str, checked: bool) {
        if checked {
            self.selected.insert(id.to_string());
        } else {
            self.selected.remove(id);
        }
    }

    /// Selects or deselects a batch of rows, e.g. the current page
    pub fn set_rows_selected<I>(&mut self, ids: I, checked: bool)
    where
        I: IntoIterator<Item = String>,
    {
        for id in ids {
            if checked {
                self.selected.insert(id);
            } else {
                self.selected.remove(&id);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Hides or shows a column. Columns that are not hideable stay visible.
    pub fn toggle_column_visibility(&mut self, column_id: &str, hideable: bool) {
        if !self.hidden_columns.remove(column_id) && hideable {
            self.hidden_columns.insert(column_id.to_string());
        }
    }

    pub fn is_column_visible(&self, column_id: &str) -> bool {
        !self.hidden_columns.contains(column_id)
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new(25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_and_search_changes_reset_page() {
        let mut state = TableState::new(10);
        state.set_page(4);
        state.set_global_search("abc");
        assert_eq!(state.page, 0);

        state.set_page(3);
        state.toggle_filter_value("status", "PENDING", false);
        assert_eq!(state.page, 0);

        state.set_page(2);
        state.clear_filters();
        assert_eq!(state.page, 0);

        state.set_page(2);
        state.set_page_size(50);
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_external_search_change_resets_page() {
        let mut state = TableState::new(10);
        state.set_external_search(Some("kandy".into()));
        state.set_page(3);

        state.set_external_search(Some("kandy".into()));
        assert_eq!(state.page, 3);

        state.set_external_search(Some("colombo".into()));
        assert_eq!(state.page, 0);
        assert_eq!(state.active_search(), "colombo");

        state.set_page(2);
        state.set_external_search(None);
        assert_eq!(state.page, 0);
        assert_eq!(state.active_search(), "");
    }

    #[test]
    fn test_single_select_filter_replaces_value() {
        let mut state = TableState::default();
        state.toggle_filter_value("status", "PENDING", false);
        state.toggle_filter_value("status", "DONE", false);
        assert_eq!(
            state.column_filters.get("status"),
            Some(&BTreeSet::from(["DONE".to_string()]))
        );
        state.toggle_filter_value("status", "DONE", false);
        assert!(state.column_filters.is_empty());
    }

    #[test]
    fn test_multi_select_filter_accumulates() {
        let mut state = TableState::default();
        state.toggle_filter_value("city", "A", true);
        state.toggle_filter_value("city", "B", true);
        assert_eq!(state.active_filter_count(), 2);
    }

    #[test]
    fn test_column_visibility_respects_hideable() {
        let mut state = TableState::default();
        state.toggle_column_visibility("name", true);
        assert!(!state.is_column_visible("name"));
        state.toggle_column_visibility("name", true);
        assert!(state.is_column_visible("name"));

        state.toggle_column_visibility("actions", false);
        assert!(state.is_column_visible("actions"));
    }

    #[test]
    fn test_selection_by_id() {
        let mut state = TableState::default();
        state.set_rows_selected(vec!["1".to_string(), "2".to_string()], true);
        state.toggle_row("2", false);
        assert!(state.is_selected("1"));
        assert!(!state.is_selected("2"));
        state.clear_selection();
        assert!(state.selected.is_empty());
    }
}
