//! Row pipeline: search → column filters → sort → page.
//!
//! Everything works on indices into the caller's `data`, which is never
//! copied or mutated.

use super::column::ColumnDef;
use super::filter::row_matches_filters;
use super::row::{cell_text, row_id, Row};
use super::sort::sort_rows;
use super::state::TableState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableSnapshot {
    /// Indices passing search and filters, in display order
    pub filtered: Vec<usize>,
    /// Slice of `filtered` shown on the current page
    pub page_rows: Vec<usize>,
    /// Current page, clamped into range
    pub page: usize,
    pub page_count: usize,
    pub total_count: usize,
}

impl TableSnapshot {
    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

/// Number of pages for `count` rows; an empty table still has one page
pub fn page_count(count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    if count == 0 {
        1
    } else {
        count.div_ceil(page_size)
    }
}

/// Case-insensitive substring match over every accessor-keyed cell.
///
/// Hidden columns are still searched; visibility only affects display and
/// export.
pub fn matches_search(row: &Row, columns: &[ColumnDef], needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    columns
        .iter()
        .filter_map(|c| c.accessor_key.as_deref())
        .any(|key| cell_text(row, key).to_lowercase().contains(needle_lower))
}

/// Runs the full pipeline with the state's active search text
pub fn compute_view(rows: &[Row], columns: &[ColumnDef], state: &TableState) -> TableSnapshot {
    let search = state.active_search().to_lowercase();

    let mut filtered: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| matches_search(row, columns, &search))
        .filter(|(_, row)| row_matches_filters(row, &state.column_filters))
        .map(|(i, _)| i)
        .collect();

    sort_rows(&mut filtered, rows, columns, &state.sorting);

    let page_count = page_count(filtered.len(), state.page_size);
    let page = state.page.min(page_count - 1);
    let start = (page * state.page_size).min(filtered.len());
    let end = (start + state.page_size).min(filtered.len());
    let page_rows = filtered[start..end].to_vec();

    TableSnapshot {
        filtered,
        page_rows,
        page,
        page_count,
        total_count: rows.len(),
    }
}

/// Ids of the given row indices
pub fn ids_of(indices: &[usize], rows: &[Row], id_key: &str) -> Vec<String> {
    indices
        .iter()
        .filter_map(|&i| rows.get(i).map(|row| row_id(row, id_key, i)))
        .collect()
}

/// Selected rows that are currently visible through search and filters,
/// in display order
pub fn selected_filtered_ids(
    snapshot: &TableSnapshot,
    rows: &[Row],
    state: &TableState,
    id_key: &str,
) -> Vec<String> {
    ids_of(&snapshot.filtered, rows, id_key)
        .into_iter()
        .filter(|id| state.is_selected(id))
        .collect()
}

/// Footer numbers: "`selected` of `filtered` selected"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    pub selected: usize,
    pub filtered: usize,
}

pub fn selection_summary(
    snapshot: &TableSnapshot,
    rows: &[Row],
    state: &TableState,
    id_key: &str,
) -> SelectionSummary {
    SelectionSummary {
        selected: selected_filtered_ids(snapshot, rows, state, id_key).len(),
        filtered: snapshot.filtered_count(),
    }
}
