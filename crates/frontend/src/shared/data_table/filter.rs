//! Facet filters: static definitions, inferred ones, and row matching.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::column::{is_reserved_column, ColumnDef};
use super::error::TableError;
use super::row::{is_primitive, value_text, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOrigin {
    Static,
    Dynamic,
}

/// A discrete-valued facet over one accessor key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDef {
    pub key: String,
    pub label: String,
    pub options: Vec<FilterOption>,
    /// Whether several values may be selected at once (OR within the facet)
    pub multi: bool,
    pub origin: FilterOrigin,
}

impl FilterDef {
    pub fn new(key: impl Into<String>, label: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            options,
            multi: false,
            origin: FilterOrigin::Static,
        }
    }

    pub fn multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    pub fn option_label(&self, value: &str) -> String {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| value.to_string())
    }
}

/// Selected values per facet key. An empty set never stays in the map.
pub type ActiveFilters = BTreeMap<String, BTreeSet<String>>;

/// Inclusive distinct-value bounds for inferred facets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for InferenceBounds {
    fn default() -> Self {
        Self { min: 2, max: 10 }
    }
}

/// Parses loosely-typed filter config.
///
/// Expected shape: `[{"key": "...", "label": "...", "multi": bool,
/// "options": [{"value": "...", "label": "..."} | "value"]}]`. Entries that
/// are not objects, lack a key, or carry a non-array option list are
/// skipped with a warning, as are option entries without a value.
pub fn parse_filters(config: &Value) -> Vec<FilterDef> {
    let Some(entries) = config.as_array() else {
        log::warn!("Filter config is not an array, ignoring it");
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            parse_filter(i, entry)
                .inspect_err(|e| log::warn!("Skipping filter #{}: {}", i, e))
                .ok()
        })
        .collect()
}

fn parse_filter(index: usize, entry: &Value) -> Result<FilterDef, TableError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| TableError::InvalidFilter(format!("entry {} is not an object", index)))?;
    let key = obj
        .get("key")
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| TableError::InvalidFilter(format!("entry {} has no key", index)))?;
    let raw_options = obj
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| TableError::InvalidFilter(format!("options of '{}' is not an array", key)))?;

    let options = raw_options
        .iter()
        .filter_map(|option| match option {
            Value::Object(o) => {
                let value = o.get("value").filter(|v| is_primitive(v) && !v.is_null())?;
                let value = value_text(value);
                let label = o
                    .get("label")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| value.clone());
                Some(FilterOption { value, label })
            }
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                let value = value_text(option);
                Some(FilterOption::new(value.clone(), value))
            }
            _ => {
                log::warn!("Skipping malformed option in filter '{}'", key);
                None
            }
        })
        .collect();

    let label = obj
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or(key)
        .to_string();
    let multi = obj.get("multi").and_then(Value::as_bool).unwrap_or(false);

    Ok(FilterDef {
        key: key.to_string(),
        label,
        options,
        multi,
        origin: FilterOrigin::Static,
    })
}

/// Proposes facets for low-cardinality columns of the current data.
///
/// A column is a candidate when it has an accessor key, is neither the id
/// column nor a reserved UI column, and holds only scalar values. It
/// becomes a facet when its distinct non-empty values number within
/// `bounds`, which keeps free-text and constant columns out.
pub fn infer_dynamic_filters(
    rows: &[Row],
    columns: &[ColumnDef],
    id_key: &str,
    bounds: InferenceBounds,
) -> Vec<FilterDef> {
    if rows.is_empty() {
        return Vec::new();
    }

    columns
        .iter()
        .filter_map(|column| {
            let key = column.accessor_key.as_deref()?;
            if key == id_key || is_reserved_column(&column.id) || is_reserved_column(key) {
                return None;
            }

            let mut distinct = BTreeSet::new();
            for row in rows {
                let Some(value) = row.get(key) else { continue };
                if !is_primitive(value) {
                    return None;
                }
                let text = value_text(value);
                if text.is_empty() {
                    continue;
                }
                distinct.insert(text);
                if distinct.len() > bounds.max {
                    return None;
                }
            }

            if distinct.len() < bounds.min {
                return None;
            }

            Some(FilterDef {
                key: key.to_string(),
                label: column.header_text().to_string(),
                options: distinct
                    .into_iter()
                    .map(|value| FilterOption::new(value.clone(), value))
                    .collect(),
                multi: true,
                origin: FilterOrigin::Dynamic,
            })
        })
        .collect()
}

/// Static filters followed by inferred ones for keys not already covered
pub fn effective_filters(
    static_filters: &[FilterDef],
    enable_dynamic: bool,
    rows: &[Row],
    columns: &[ColumnDef],
    id_key: &str,
    bounds: InferenceBounds,
) -> Vec<FilterDef> {
    let mut filters = static_filters.to_vec();
    if enable_dynamic {
        let covered: HashSet<&str> = static_filters.iter().map(|f| f.key.as_str()).collect();
        let dynamic: Vec<FilterDef> = infer_dynamic_filters(rows, columns, id_key, bounds)
            .into_iter()
            .filter(|f| !covered.contains(f.key.as_str()))
            .collect();
        filters.extend(dynamic);
    }
    filters
}

/// AND across facets, OR within one facet's selected values
pub fn row_matches_filters(row: &Row, active: &ActiveFilters) -> bool {
    active.iter().all(|(key, selected)| {
        if selected.is_empty() {
            return true;
        }
        let value = row.get(key).map(value_text).unwrap_or_default();
        selected.contains(&value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: Vec<Value>) -> Vec<Row> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn rows_with_n_statuses(n: usize) -> Vec<Row> {
        rows((0..20).map(|i| json!({"id": i, "status": format!("S{}", i % n)})).collect())
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::accessor("id", "ID"),
            ColumnDef::accessor("status", "Status"),
        ]
    }

    #[test]
    fn test_single_value_column_is_not_a_facet() {
        let filters = infer_dynamic_filters(&rows_with_n_statuses(1), &columns(), "id", InferenceBounds::default());
        assert!(filters.is_empty());
    }

    #[test]
    fn test_eleven_values_is_not_a_facet() {
        let filters = infer_dynamic_filters(&rows_with_n_statuses(11), &columns(), "id", InferenceBounds::default());
        assert!(filters.is_empty());
    }

    #[test]
    fn test_two_to_ten_values_is_a_facet() {
        for n in 2..=10 {
            let filters =
                infer_dynamic_filters(&rows_with_n_statuses(n), &columns(), "id", InferenceBounds::default());
            assert_eq!(filters.len(), 1, "n = {}", n);
            assert_eq!(filters[0].key, "status");
            assert_eq!(filters[0].options.len(), n);
            assert_eq!(filters[0].origin, FilterOrigin::Dynamic);
        }
    }

    #[test]
    fn test_id_reserved_and_nested_columns_are_skipped() {
        let data = rows(vec![
            json!({"id": 1, "ref": 1, "meta": {"a": 1}, "actions": "x"}),
            json!({"id": 2, "ref": 2, "meta": {"a": 2}, "actions": "y"}),
        ]);
        let cols = vec![
            ColumnDef::accessor("id", "ID"),
            ColumnDef::accessor("ref", "Ref"),
            ColumnDef::accessor("meta", "Meta"),
            ColumnDef::accessor("actions", "Actions"),
        ];
        let filters = infer_dynamic_filters(&data, &cols, "id", InferenceBounds::default());
        let keys: Vec<&str> = filters.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["ref"]);
    }

    #[test]
    fn test_static_filter_takes_precedence() {
        let data = rows_with_n_statuses(3);
        let static_filters = vec![FilterDef::new(
            "status",
            "Status",
            vec![FilterOption::new("S0", "First")],
        )];
        let filters = effective_filters(&static_filters, true, &data, &columns(), "id", InferenceBounds::default());
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].origin, FilterOrigin::Static);

        let filters = effective_filters(&[], false, &data, &columns(), "id", InferenceBounds::default());
        assert!(filters.is_empty());
    }

    #[test]
    fn test_row_matching_and_across_or_within() {
        let row = rows(vec![json!({"status": "PENDING", "city": "A"})]).remove(0);

        let mut active = ActiveFilters::new();
        active.insert("status".into(), BTreeSet::from(["PENDING".to_string(), "DONE".to_string()]));
        assert!(row_matches_filters(&row, &active));

        active.insert("city".into(), BTreeSet::from(["B".to_string()]));
        assert!(!row_matches_filters(&row, &active));

        active.insert("city".into(), BTreeSet::from(["A".to_string()]));
        assert!(row_matches_filters(&row, &active));
    }

    #[test]
    fn test_parse_filters_is_defensive() {
        let config = json!([
            {"key": "status", "label": "Status", "options": [
                {"value": "PENDING", "label": "Pending"},
                "DONE",
                {"label": "no value"},
                [1, 2]
            ]},
            "garbage",
            {"label": "No key", "options": []},
            {"key": "city", "options": "A,B"},
            {"key": "vip", "multi": true, "options": [true, false]}
        ]);
        let filters = parse_filters(&config);
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].options, vec![
            FilterOption::new("PENDING", "Pending"),
            FilterOption::new("DONE", "DONE"),
        ]);
        assert_eq!(filters[1].key, "vip");
        assert_eq!(filters[1].label, "vip");
        assert!(filters[1].multi);
        assert_eq!(filters[1].option_label("true"), "true");
    }

    #[test]
    fn test_parse_filter_reports_invalid_entry() {
        assert!(matches!(parse_filter(0, &json!("garbage")), Err(TableError::InvalidFilter(_))));
        assert_eq!(
            parse_filter(2, &json!({"key": "city", "options": "A,B"})),
            Err(TableError::InvalidFilter("options of 'city' is not an array".into()))
        );
        assert!(parse_filter(1, &json!({"key": "city", "options": []})).is_ok());
    }
}
