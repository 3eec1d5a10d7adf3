//! Column definitions.
//!
//! Columns are built either in code through the [`ColumnDef`] builder or
//! from loose JSON config through [`ColumnSpec`]. Both paths end in
//! [`validate_columns`], which is the only place malformed definitions are
//! dealt with; the rendering path assumes well-formed columns.

use leptos::prelude::AnyView;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::error::TableError;
use super::row::Row;

/// Column ids the table treats as UI columns rather than data
pub const RESERVED_COLUMN_IDS: &[&str] = &["select", "actions"];

pub fn is_reserved_column(id: &str) -> bool {
    RESERVED_COLUMN_IDS.contains(&id)
}

/// Data available to a header renderer
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderContext {
    pub column_id: String,
    /// `Some(desc)` when the column is currently sorted
    pub sorted: Option<bool>,
}

/// Data available to a cell renderer
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    pub column_id: &'a str,
    pub row: &'a Row,
    pub row_id: &'a str,
    /// Value under the column's accessor key, if any
    pub value: Option<&'a Value>,
}

pub type HeaderRenderer = Arc<dyn Fn(&HeaderContext) -> AnyView + Send + Sync>;
/// Cell renderers may fail; the table surfaces the error instead of the body
pub type CellRenderer = Arc<dyn Fn(&CellContext<'_>) -> Result<AnyView, TableError> + Send + Sync>;

#[derive(Clone)]
pub enum HeaderDef {
    Literal(String),
    Rendered(HeaderRenderer),
}

#[derive(Clone)]
pub enum CellDef {
    /// Text of the accessor value
    Value,
    Rendered(CellRenderer),
}

#[derive(Clone)]
pub struct ColumnDef {
    pub id: String,
    pub accessor_key: Option<String>,
    pub header: HeaderDef,
    pub cell: CellDef,
    pub sortable: bool,
    pub hideable: bool,
}

impl ColumnDef {
    /// Data column reading `key` from every row
    pub fn accessor(key: impl Into<String>, header: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id: key.clone(),
            accessor_key: Some(key),
            header: HeaderDef::Literal(header.into()),
            cell: CellDef::Value,
            sortable: true,
            hideable: true,
        }
    }

    /// Computed or action column without an accessor key
    pub fn display(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            accessor_key: None,
            header: HeaderDef::Literal(header.into()),
            cell: CellDef::Value,
            sortable: false,
            hideable: false,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn hideable(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }

    pub fn cell<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellContext<'_>) -> AnyView + Send + Sync + 'static,
    {
        self.cell = CellDef::Rendered(Arc::new(move |ctx| Ok(render(ctx))));
        self
    }

    pub fn try_cell<F>(mut self, render: F) -> Self
    where
        F: Fn(&CellContext<'_>) -> Result<AnyView, TableError> + Send + Sync + 'static,
    {
        self.cell = CellDef::Rendered(Arc::new(render));
        self
    }

    pub fn header_view<F>(mut self, render: F) -> Self
    where
        F: Fn(&HeaderContext) -> AnyView + Send + Sync + 'static,
    {
        self.header = HeaderDef::Rendered(Arc::new(render));
        self
    }

    /// Plain header text, used by the column-visibility menu and facets
    pub fn header_text(&self) -> &str {
        match &self.header {
            HeaderDef::Literal(text) => text,
            HeaderDef::Rendered(_) => &self.id,
        }
    }

    /// Whether sorting can be applied, which needs a value to compare
    pub fn can_sort(&self) -> bool {
        self.sortable && self.accessor_key.is_some()
    }
}

impl fmt::Debug for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("id", &self.id)
            .field("accessor_key", &self.accessor_key)
            .field("header", &self.header_text())
            .field("sortable", &self.sortable)
            .field("hideable", &self.hideable)
            .finish()
    }
}

impl PartialEq for ColumnDef {
    /// Renderers cannot be compared; columns are equal when their
    /// configuration is.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.accessor_key == other.accessor_key
            && self.header_text() == other.header_text()
            && self.sortable == other.sortable
            && self.hideable == other.hideable
    }
}

/// Column config as it arrives from JSON
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub id: Option<String>,
    pub accessor_key: Option<String>,
    pub header: Option<String>,
    pub sortable: Option<bool>,
    pub hideable: Option<bool>,
}

impl TryFrom<ColumnSpec> for ColumnDef {
    type Error = TableError;

    fn try_from(spec: ColumnSpec) -> Result<Self, Self::Error> {
        if let Some(key) = &spec.accessor_key {
            if key.trim().is_empty() {
                return Err(TableError::InvalidColumn("empty accessor key".into()));
            }
        }
        let id = spec
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| spec.accessor_key.clone())
            .ok_or_else(|| TableError::InvalidColumn("column has neither id nor accessor key".into()))?;
        let header = spec.header.clone().unwrap_or_else(|| id.clone());
        let has_accessor = spec.accessor_key.is_some();

        Ok(ColumnDef {
            id,
            accessor_key: spec.accessor_key,
            header: HeaderDef::Literal(header),
            cell: CellDef::Value,
            sortable: spec.sortable.unwrap_or(has_accessor),
            hideable: spec.hideable.unwrap_or(has_accessor),
        })
    }
}

/// Parses a JSON array of column configs, skipping bad entries
pub fn parse_columns(config: &Value) -> Vec<ColumnDef> {
    let Some(entries) = config.as_array() else {
        log::warn!("Column config is not an array, ignoring it");
        return Vec::new();
    };

    let columns = entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let spec = match serde_json::from_value::<ColumnSpec>(entry.clone()) {
                Ok(spec) => spec,
                Err(e) => {
                    log::warn!("Skipping column #{}: {}", i, e);
                    return None;
                }
            };
            match ColumnDef::try_from(spec) {
                Ok(column) => Some(column),
                Err(e) => {
                    log::warn!("Skipping column #{}: {}", i, e);
                    None
                }
            }
        })
        .collect();

    validate_columns(columns)
}

/// Drops columns the table cannot render: empty ids, duplicate ids and
/// blank accessor keys. Each drop is logged.
pub fn validate_columns(columns: Vec<ColumnDef>) -> Vec<ColumnDef> {
    let mut seen = HashSet::new();
    columns
        .into_iter()
        .filter(|column| {
            if column.id.trim().is_empty() {
                log::warn!("Skipping column with empty id");
                return false;
            }
            if column
                .accessor_key
                .as_deref()
                .is_some_and(|key| key.trim().is_empty())
            {
                log::warn!("Skipping column '{}': empty accessor key", column.id);
                return false;
            }
            if !seen.insert(column.id.clone()) {
                log::warn!("Skipping duplicate column '{}'", column.id);
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessor_builder_defaults() {
        let col = ColumnDef::accessor("status", "Status");
        assert_eq!(col.id, "status");
        assert_eq!(col.accessor_key.as_deref(), Some("status"));
        assert!(col.can_sort());
        assert!(col.hideable);
        assert_eq!(col.header_text(), "Status");
    }

    #[test]
    fn test_display_column_cannot_sort() {
        let col = ColumnDef::display("actions", "").sortable(true);
        assert!(!col.can_sort());
    }

    #[test]
    fn test_spec_without_id_or_key_is_rejected() {
        let spec = ColumnSpec {
            id: None,
            accessor_key: None,
            header: Some("Name".into()),
            sortable: None,
            hideable: None,
        };
        assert!(matches!(
            ColumnDef::try_from(spec),
            Err(TableError::InvalidColumn(_))
        ));
    }

    #[test]
    fn test_parse_columns_skips_bad_entries() {
        let config = json!([
            {"accessorKey": "name", "header": "Name"},
            "not an object",
            {"accessorKey": ""},
            {"header": "Orphan"},
            {"id": "actions"},
            {"accessorKey": "name", "header": "Duplicate"}
        ]);
        let columns = parse_columns(&config);
        let ids: Vec<&str> = columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "actions"]);
        assert!(!columns[1].sortable);
    }

    #[test]
    fn test_parse_columns_rejects_non_array() {
        assert!(parse_columns(&json!({"accessorKey": "name"})).is_empty());
    }

    #[test]
    fn test_validate_columns() {
        let mut blank = ColumnDef::accessor("x", "X");
        blank.accessor_key = Some("  ".into());
        let columns = vec![
            ColumnDef::accessor("a", "A"),
            ColumnDef::display("", "Nothing"),
            blank,
            ColumnDef::accessor("a", "Again"),
            ColumnDef::accessor("b", "B"),
        ];
        let ids: Vec<String> = validate_columns(columns).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
