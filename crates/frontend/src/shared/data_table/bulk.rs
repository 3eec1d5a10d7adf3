use super::filter::FilterOption;
use super::pipeline::{selected_filtered_ids, TableSnapshot};
use super::row::Row;
use super::state::TableState;

/// A field offered in the bulk-change menu with its allowed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkChangeOption {
    pub field: String,
    pub label: String,
    pub options: Vec<FilterOption>,
}

impl BulkChangeOption {
    pub fn new(field: impl Into<String>, label: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            options,
        }
    }
}

/// Collects the ids a bulk action applies to and clears the selection.
///
/// The selection is emptied before the caller's callback runs, so it ends
/// up empty whatever the callback does. Returns `None` when nothing
/// visible is selected.
pub fn take_bulk_ids(
    snapshot: &TableSnapshot,
    rows: &[Row],
    state: &mut TableState,
    id_key: &str,
) -> Option<Vec<String>> {
    let ids = selected_filtered_ids(snapshot, rows, state, id_key);
    state.clear_selection();
    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

/// Open/closed state of the cascading bulk-change menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkMenuState {
    pub open: bool,
    /// Field whose values are currently expanded
    pub field: Option<String>,
}

impl BulkMenuState {
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.field = None;
    }

    pub fn expand(&mut self, field: &str) {
        self.field = Some(field.to_string());
    }

    pub fn close(&mut self) {
        self.open = false;
        self.field = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::column::ColumnDef;
    use crate::shared::data_table::pipeline::compute_view;
    use serde_json::json;
    use std::cell::RefCell;

    fn data() -> Vec<Row> {
        (1..=12)
            .map(|i| json!({"id": i, "status": if i % 2 == 0 { "EVEN" } else { "ODD" }}))
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_bulk_delete_passes_n_ids_and_clears_selection() {
        let rows = data();
        let columns = vec![ColumnDef::accessor("id", "ID"), ColumnDef::accessor("status", "Status")];
        let mut state = TableState::new(5);
        state.set_rows_selected(vec!["2".into(), "7".into(), "11".into()], true);

        let snapshot = compute_view(&rows, &columns, &state);
        let received = RefCell::new(Vec::new());
        let on_bulk_delete = |ids: Vec<String>| -> Result<(), String> {
            *received.borrow_mut() = ids;
            Err("backend unavailable".into())
        };

        let ids = take_bulk_ids(&snapshot, &rows, &mut state, "id").unwrap();
        let result = on_bulk_delete(ids);

        assert!(result.is_err());
        assert_eq!(*received.borrow(), vec!["2", "7", "11"]);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn test_bulk_ids_skip_rows_filtered_out() {
        let rows = data();
        let columns = vec![ColumnDef::accessor("id", "ID"), ColumnDef::accessor("status", "Status")];
        let mut state = TableState::new(5);
        state.set_rows_selected(vec!["2".into(), "3".into()], true);
        state.toggle_filter_value("status", "EVEN", false);

        let snapshot = compute_view(&rows, &columns, &state);
        assert_eq!(take_bulk_ids(&snapshot, &rows, &mut state, "id"), Some(vec!["2".to_string()]));
        assert!(state.selected.is_empty());
    }

    #[test]
    fn test_nothing_selected_yields_none() {
        let rows = data();
        let mut state = TableState::new(5);
        let snapshot = compute_view(&rows, &[], &state);
        assert_eq!(take_bulk_ids(&snapshot, &rows, &mut state, "id"), None);
    }

    #[test]
    fn test_bulk_menu_state() {
        let mut menu = BulkMenuState::default();
        menu.toggle();
        menu.expand("status");
        assert_eq!(menu.field.as_deref(), Some("status"));
        menu.close();
        assert_eq!(menu, BulkMenuState::default());
    }
}
