//! Row records and their text form.

use serde_json::{Map, Value};

/// One domain record as handed to the table.
///
/// The table never assumes a shape; it only reads fields named by column
/// accessor keys.
pub type Row = Map<String, Value>;

/// Default name of the identifier field
pub const DEFAULT_ID_KEY: &str = "id";

/// Text form of a cell value, used for search, facets and export
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        nested => nested.to_string(),
    }
}

/// Text of the field `key` in `row`, empty when absent
pub fn cell_text(row: &Row, key: &str) -> String {
    row.get(key).map(value_text).unwrap_or_default()
}

/// Whether a value is a scalar a facet can be built from
pub fn is_primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::String(_) | Value::Bool(_) | Value::Number(_)
    )
}

/// Identity of a row for selection and bulk actions.
///
/// Rows lacking the id field fall back to their position in `data`; that
/// identity is only stable while the data set is unchanged. See
/// [`missing_id_count`] for reporting such rows.
pub fn row_id(row: &Row, id_key: &str, index: usize) -> String {
    match row.get(id_key) {
        Some(value) if !value.is_null() => value_text(value),
        _ => format!("#{}", index),
    }
}

/// Number of rows without a usable `id_key` field
pub fn missing_id_count(rows: &[Row], id_key: &str) -> usize {
    rows.iter()
        .filter(|row| row.get(id_key).map_or(true, Value::is_null))
        .count()
}

/// Converts any serializable record into a row.
///
/// Non-object values produce `None`; callers skip them.
pub fn to_row<T: serde::Serialize>(record: &T) -> Option<Row> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            log::warn!("Record is not an object ({}), skipping", other);
            None
        }
        Err(e) => {
            log::warn!("Record could not be serialized: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!("abc")), "abc");
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(1.5)), "1.5");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_row_id_uses_id_field() {
        let r = row(json!({"id": 7, "uuid": "x-1"}));
        assert_eq!(row_id(&r, "id", 0), "7");
        assert_eq!(row_id(&r, "uuid", 0), "x-1");
    }

    #[test]
    fn test_row_id_falls_back_to_position() {
        let r = row(json!({"name": "A"}));
        assert_eq!(row_id(&r, "id", 3), "#3");
    }

    #[test]
    fn test_missing_id_count() {
        let rows = vec![
            row(json!({"id": 1})),
            row(json!({"name": "A"})),
            row(json!({"id": null})),
            row(json!({"id": "x"})),
        ];
        assert_eq!(missing_id_count(&rows, "id"), 2);
        assert_eq!(missing_id_count(&rows, "name"), 3);
        assert_eq!(missing_id_count(&[], "id"), 0);
    }

    #[test]
    fn test_to_row() {
        #[derive(serde::Serialize)]
        struct Rec {
            id: u32,
        }
        assert_eq!(to_row(&Rec { id: 1 }).unwrap().get("id"), Some(&json!(1)));
        assert!(to_row(&5).is_none());
    }
}
