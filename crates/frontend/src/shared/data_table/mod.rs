//! Generic client-side table over JSON rows.
//!
//! The pure pipeline (search, facets, sort, paging, selection, export)
//! lives in the submodules and is unit tested without a browser; the
//! [`DataTable`] component wires it to signals.

pub mod bulk;
pub mod column;
pub mod component;
pub mod error;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod row;
pub mod sort;
pub mod state;

pub use bulk::{take_bulk_ids, BulkChangeOption, BulkMenuState};
pub use column::{
    is_reserved_column, parse_columns, validate_columns, CellContext, CellDef, ColumnDef, ColumnSpec,
    HeaderContext, HeaderDef,
};
pub use component::DataTable;
pub use error::TableError;
pub use export::{build_csv, export_file_name};
pub use filter::{
    effective_filters, infer_dynamic_filters, parse_filters, ActiveFilters, FilterDef, FilterOption,
    FilterOrigin, InferenceBounds,
};
pub use pipeline::{compute_view, selection_summary, SelectionSummary, TableSnapshot};
pub use row::{cell_text, row_id, to_row, value_text, Row, DEFAULT_ID_KEY};
pub use sort::{sort_direction, ColumnSort, SortDirection, SortingState};
pub use state::TableState;
