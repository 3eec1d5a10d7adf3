//! CSV export of the filtered rows.

use csv::{QuoteStyle, WriterBuilder};

use super::column::{is_reserved_column, ColumnDef};
use super::error::TableError;
use super::row::{cell_text, Row};
use super::state::TableState;

/// Visible columns in display order, without the selection/action columns
pub fn export_columns<'a>(columns: &'a [ColumnDef], state: &TableState) -> Vec<&'a ColumnDef> {
    columns
        .iter()
        .filter(|c| state.is_column_visible(&c.id) && !is_reserved_column(&c.id))
        .collect()
}

/// Header and field name of an exported column: the accessor key, or the
/// column id for computed columns
fn export_field(column: &ColumnDef) -> &str {
    column.accessor_key.as_deref().unwrap_or(&column.id)
}

/// Builds the CSV document for `indices` (filtered rows, pagination ignored).
///
/// Fields containing a comma, a quote or a line break are wrapped in
/// double quotes with embedded quotes doubled.
pub fn build_csv(
    rows: &[Row],
    indices: &[usize],
    columns: &[ColumnDef],
    state: &TableState,
) -> Result<String, TableError> {
    if indices.is_empty() {
        return Err(TableError::NoData);
    }

    let columns = export_columns(columns, state);
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| export_field(c)))?;
    for &i in indices {
        let Some(row) = rows.get(i) else { continue };
        writer.write_record(columns.iter().map(|c| cell_text(row, export_field(c))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TableError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TableError::Csv(e.to_string()))
}

/// `export_<epoch-millis>.csv`
pub fn export_file_name(now_ms: i64) -> String {
    format!("export_{}.csv", now_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Row> {
        vec![
            json!({"id": 1, "name": "Plain", "note": "a, b", "quote": "say \"hi\""}),
            json!({"id": 2, "name": "Multi\nline", "note": "", "quote": "\"\""}),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
    }

    fn columns() -> Vec<ColumnDef> {
        vec![
            ColumnDef::accessor("id", "ID"),
            ColumnDef::accessor("name", "Name"),
            ColumnDef::accessor("note", "Note"),
            ColumnDef::accessor("quote", "Quote"),
            ColumnDef::display("actions", ""),
        ]
    }

    #[test]
    fn test_quoting() {
        let csv = build_csv(&rows(), &[0], &columns(), &TableState::default()).unwrap();
        assert_eq!(csv, "id,name,note,quote\n1,Plain,\"a, b\",\"say \"\"hi\"\"\"\n");
    }

    #[test]
    fn test_round_trip_through_reader() {
        let data = rows();
        let csv = build_csv(&data, &[0, 1], &columns(), &TableState::default()).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
        assert_eq!(headers, vec!["id", "name", "note", "quote"]);

        let parsed: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        for (record, row) in parsed.iter().zip(&data) {
            for (field, header) in record.iter().zip(&headers) {
                assert_eq!(field, &cell_text(row, header));
            }
        }
    }

    #[test]
    fn test_hidden_columns_are_not_exported() {
        let mut state = TableState::default();
        state.toggle_column_visibility("note", true);
        state.toggle_column_visibility("quote", true);
        let csv = build_csv(&rows(), &[1, 0], &columns(), &state).unwrap();
        assert_eq!(csv, "id,name\n2,\"Multi\nline\"\n1,Plain\n");
    }

    #[test]
    fn test_computed_column_uses_id_as_header() {
        let cols = vec![ColumnDef::accessor("id", "ID"), ColumnDef::display("name", "Name")];
        let csv = build_csv(&rows(), &[0], &cols, &TableState::default()).unwrap();
        assert_eq!(csv, "id,name\n1,Plain\n");
    }

    #[test]
    fn test_no_rows_is_an_error() {
        assert_eq!(
            build_csv(&rows(), &[], &columns(), &TableState::default()),
            Err(TableError::NoData)
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(export_file_name(1700000000123), "export_1700000000123.csv");
    }
}
