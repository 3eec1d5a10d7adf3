use serde_json::Value;
use std::cmp::Ordering;

use super::column::ColumnDef;
use super::row::{value_text, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSort {
    pub id: String,
    pub desc: bool,
}

/// Ordered sort keys; the first entry has the highest priority
pub type SortingState = Vec<ColumnSort>;

/// Header indicator state of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    None,
    Asc,
    Desc,
}

pub fn sort_direction(sorting: &SortingState, column_id: &str) -> SortDirection {
    match sorting.iter().find(|s| s.id == column_id) {
        Some(ColumnSort { desc: false, .. }) => SortDirection::Asc,
        Some(ColumnSort { desc: true, .. }) => SortDirection::Desc,
        None => SortDirection::None,
    }
}

/// Advances a column through none → ascending → descending → none.
///
/// Without `multi`, the column becomes the only sort key.
pub fn toggle_sort(sorting: &mut SortingState, column_id: &str, multi: bool) {
    let next = match sort_direction(sorting, column_id) {
        SortDirection::None => Some(false),
        SortDirection::Asc => Some(true),
        SortDirection::Desc => None,
    };

    if multi {
        match (sorting.iter().position(|s| s.id == column_id), next) {
            (Some(pos), Some(desc)) => sorting[pos].desc = desc,
            (Some(pos), None) => {
                sorting.remove(pos);
            }
            (None, Some(desc)) => sorting.push(ColumnSort {
                id: column_id.to_string(),
                desc,
            }),
            (None, None) => {}
        }
    } else {
        sorting.clear();
        if let Some(desc) = next {
            sorting.push(ColumnSort {
                id: column_id.to_string(),
                desc,
            });
        }
    }
}

/// Sort rank of a present value: numbers, then booleans, then text
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Bool(_) => 1,
        _ => 2,
    }
}

/// Compares two cell values.
///
/// Values of different kinds order by kind first (numbers, booleans, text),
/// so a column mixing `1250` and `"n/a"` still sorts consistently. Within a
/// kind, numbers compare numerically, booleans as booleans and everything
/// else by case-insensitive text. Missing and null values sort after
/// present ones.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => type_rank(x).cmp(&type_rank(y)).then_with(|| match (x, y) {
            (Value::Number(x), Value::Number(y)) => {
                let x = x.as_f64().unwrap_or(0.0);
                let y = y.as_f64().unwrap_or(0.0);
                x.total_cmp(&y)
            }
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            _ => value_text(x)
                .to_lowercase()
                .cmp(&value_text(y).to_lowercase()),
        }),
    }
}

/// Stable sort of row indices by the active sort keys.
///
/// Keys naming unknown or non-sortable columns are ignored.
pub fn sort_rows(indices: &mut [usize], rows: &[Row], columns: &[ColumnDef], sorting: &SortingState) {
    let keys: Vec<(&str, bool)> = sorting
        .iter()
        .filter_map(|sort| {
            let column = columns.iter().find(|c| c.id == sort.id && c.can_sort())?;
            Some((column.accessor_key.as_deref()?, sort.desc))
        })
        .collect();

    if keys.is_empty() {
        return;
    }

    indices.sort_by(|&a, &b| {
        for (key, desc) in &keys {
            let mut ord = compare_values(rows[a].get(*key), rows[b].get(*key));
            if *desc {
                // Keep missing values last in both directions
                let a_missing = rows[a].get(*key).map_or(true, Value::is_null);
                let b_missing = rows[b].get(*key).map_or(true, Value::is_null);
                if !a_missing && !b_missing {
                    ord = ord.reverse();
                }
            }
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
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

    #[test]
    fn test_toggle_cycles_single_column() {
        let mut sorting = SortingState::new();
        toggle_sort(&mut sorting, "name", false);
        assert_eq!(sort_direction(&sorting, "name"), SortDirection::Asc);
        toggle_sort(&mut sorting, "name", false);
        assert_eq!(sort_direction(&sorting, "name"), SortDirection::Desc);
        toggle_sort(&mut sorting, "name", false);
        assert_eq!(sort_direction(&sorting, "name"), SortDirection::None);
        assert!(sorting.is_empty());
    }

    #[test]
    fn test_single_sort_replaces_other_column() {
        let mut sorting = SortingState::new();
        toggle_sort(&mut sorting, "name", false);
        toggle_sort(&mut sorting, "city", false);
        assert_eq!(sorting, vec![ColumnSort { id: "city".into(), desc: false }]);
    }

    #[test]
    fn test_multi_sort_keeps_other_columns() {
        let mut sorting = SortingState::new();
        toggle_sort(&mut sorting, "name", true);
        toggle_sort(&mut sorting, "city", true);
        toggle_sort(&mut sorting, "name", true);
        assert_eq!(
            sorting,
            vec![
                ColumnSort { id: "name".into(), desc: true },
                ColumnSort { id: "city".into(), desc: false },
            ]
        );
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values(Some(&json!(2)), Some(&json!(10))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!("b")), Some(&json!("A"))), Ordering::Greater);
        assert_eq!(compare_values(None, Some(&json!("a"))), Ordering::Greater);
        assert_eq!(compare_values(Some(&json!(null)), Some(&json!(1))), Ordering::Greater);
    }

    #[test]
    fn test_mixed_kinds_order_by_kind_first() {
        assert_eq!(compare_values(Some(&json!(10)), Some(&json!("1a"))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!("1a")), Some(&json!(2))), Ordering::Greater);
        assert_eq!(compare_values(Some(&json!(true)), Some(&json!(3))), Ordering::Greater);
        assert_eq!(compare_values(Some(&json!(false)), Some(&json!("x"))), Ordering::Less);
    }

    #[test]
    fn test_sort_mixed_number_and_text_column() {
        // Numbers and "<n>a" strings interleaved, enough rows for the
        // general sort path rather than the small-slice one
        let data: Vec<Row> = (0..2000u64)
            .map(|i| {
                let n = (i * 7919) % 1013;
                let amount = if i % 3 == 0 { json!(format!("{}a", n)) } else { json!(n) };
                json!({"id": i, "amount": amount}).as_object().cloned().unwrap()
            })
            .collect();
        let columns = vec![ColumnDef::accessor("amount", "Amount")];

        for desc in [false, true] {
            let mut indices: Vec<usize> = (0..data.len()).collect();
            sort_rows(&mut indices, &data, &columns, &vec![ColumnSort { id: "amount".into(), desc }]);

            assert_eq!(indices.len(), data.len());
            for pair in indices.windows(2) {
                let ord = compare_values(data[pair[0]].get("amount"), data[pair[1]].get("amount"));
                let expected = if desc { Ordering::Less } else { Ordering::Greater };
                assert_ne!(ord, expected, "rows {} and {} out of order", pair[0], pair[1]);
            }
        }

        let mut indices: Vec<usize> = (0..data.len()).collect();
        sort_rows(&mut indices, &data, &columns, &vec![ColumnSort { id: "amount".into(), desc: false }]);
        let first_text = indices.iter().position(|&i| data[i]["amount"].is_string()).unwrap();
        assert!(indices[first_text..].iter().all(|&i| data[i]["amount"].is_string()));
    }

    #[test]
    fn test_sort_is_stable_and_keeps_missing_last() {
        let data = rows(vec![
            json!({"id": 1, "fare": 10}),
            json!({"id": 2}),
            json!({"id": 3, "fare": 5}),
            json!({"id": 4, "fare": 10}),
        ]);
        let columns = vec![ColumnDef::accessor("fare", "Fare")];
        let mut indices: Vec<usize> = (0..data.len()).collect();

        let asc = vec![ColumnSort { id: "fare".into(), desc: false }];
        sort_rows(&mut indices, &data, &columns, &asc);
        assert_eq!(indices, vec![2, 0, 3, 1]);

        let mut indices: Vec<usize> = (0..data.len()).collect();
        let desc = vec![ColumnSort { id: "fare".into(), desc: true }];
        sort_rows(&mut indices, &data, &columns, &desc);
        assert_eq!(indices, vec![0, 3, 2, 1]);
    }

    #[test]
    fn test_unsortable_column_is_ignored() {
        let data = rows(vec![json!({"n": 2}), json!({"n": 1})]);
        let columns = vec![ColumnDef::accessor("n", "N").sortable(false)];
        let mut indices = vec![0, 1];
        sort_rows(&mut indices, &data, &columns, &vec![ColumnSort { id: "n".into(), desc: false }]);
        assert_eq!(indices, vec![0, 1]);
    }
}
