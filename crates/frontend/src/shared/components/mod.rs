pub mod filter_panel;
pub mod page_header;
pub mod pagination_controls;
pub mod table;
pub mod ui;

pub use filter_panel::{FilterPanel, FilterTag};
pub use page_header::PageHeader;
pub use pagination_controls::PaginationControls;
