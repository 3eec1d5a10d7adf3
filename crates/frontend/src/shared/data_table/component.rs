//! `DataTable`: the interactive table component.
//!
//! ```rust,ignore
//! <DataTable
//!     columns=columns
//!     data=rows
//!     filters=status_filters
//!     enable_dynamic_filters=true
//!     enable_bulk_delete=true
//!     on_bulk_delete=Callback::new(move |ids| delete_bookings(ids))
//! />
//! ```

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

use super::bulk::{take_bulk_ids, BulkChangeOption, BulkMenuState};
use super::column::{is_reserved_column, validate_columns, CellContext, CellDef, ColumnDef, HeaderContext, HeaderDef};
use super::error::TableError;
use super::export::{build_csv, export_file_name};
use super::filter::{effective_filters, FilterDef, InferenceBounds};
use super::pipeline::{compute_view, ids_of, selection_summary, TableSnapshot};
use super::row::{missing_id_count, row_id, value_text, Row, DEFAULT_ID_KEY};
use super::sort::{sort_direction, SortDirection};
use super::state::TableState;
use crate::config::AppConfig;
use crate::shared::components::table::{SortableHeaderCell, TableCellCheckbox, TableHeaderCheckbox};
use crate::shared::components::{FilterPanel, PaginationControls};
use crate::shared::export::{alert, download_text_file, CSV_MIME};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};

#[component]
pub fn DataTable(
    #[prop(into)]
    columns: Signal<Vec<ColumnDef>>,

    #[prop(into)]
    data: Signal<Vec<Row>>,

    #[prop(optional, into)]
    search_placeholder: String,

    #[prop(optional)]
    hide_search: bool,

    /// When set, replaces the search box: the caller drives the search text
    #[prop(optional, into)]
    external_search: MaybeProp<String>,

    /// Static facets; listed before inferred ones
    #[prop(optional, into)]
    filters: Option<Signal<Vec<FilterDef>>>,

    /// Adds facets for low-cardinality columns of the current data
    #[prop(optional)]
    enable_dynamic_filters: bool,

    #[prop(optional, default = true)]
    enable_filters: bool,

    #[prop(optional, default = true)]
    enable_column_visibility: bool,

    #[prop(optional, default = true)]
    enable_export: bool,

    #[prop(optional)]
    enable_bulk_delete: bool,

    #[prop(optional)]
    enable_bulk_change: bool,

    /// Shift-click on a header adds a sort key instead of replacing it
    #[prop(optional)]
    enable_multi_sort: bool,

    /// Shows every filtered row on one page
    #[prop(optional)]
    hide_pagination: bool,

    /// Receives the ids of the selected, filtered rows
    #[prop(optional)]
    on_bulk_delete: Option<Callback<Vec<String>>>,

    /// Receives (ids, field, value)
    #[prop(optional)]
    on_bulk_change: Option<Callback<(Vec<String>, String, String)>>,

    /// Replaces the CSV download; receives every filtered row
    #[prop(optional)]
    on_export: Option<Callback<Vec<Row>>>,

    #[prop(optional)]
    bulk_change_options: Vec<BulkChangeOption>,

    /// Row field used as the row identity, `"id"` by default
    #[prop(optional, into)]
    id_key: Option<String>,

    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,

    #[prop(optional, into)]
    empty_message: Option<String>,

    #[prop(optional, into)]
    is_loading: MaybeProp<bool>,
) -> impl IntoView {
    let config = &AppConfig::get().table;
    let bounds = InferenceBounds {
        min: config.dynamic_filter_min,
        max: config.dynamic_filter_max,
    };
    let page_size = if hide_pagination {
        usize::MAX
    } else {
        config.default_page_size
    };

    let id_key = StoredValue::new(id_key.unwrap_or_else(|| DEFAULT_ID_KEY.to_string()));
    let empty_message = StoredValue::new(empty_message.unwrap_or_else(|| "No results.".to_string()));
    let search_placeholder = StoredValue::new(search_placeholder);
    let bulk_options = StoredValue::new(bulk_change_options);
    let page_size_options = StoredValue::new(page_size_options);
    let show_select = enable_bulk_delete || enable_bulk_change;

    let state = RwSignal::new(TableState {
        external_search: external_search.get_untracked(),
        ..TableState::new(page_size)
    });
    let filters_open = RwSignal::new(false);
    let columns_menu_open = RwSignal::new(false);
    let bulk_menu = RwSignal::new(BulkMenuState::default());

    let valid_columns = Memo::new(move |_| validate_columns(columns.get()));
    let visible_columns = Memo::new(move |_| {
        let cols = valid_columns.get();
        state.with(|s| {
            cols.into_iter()
                .filter(|c| s.is_column_visible(&c.id))
                .collect::<Vec<_>>()
        })
    });

    // Positional ids only matter once rows can be selected
    if show_select {
        Effect::new(move |_| {
            let key = id_key.get_value();
            let missing = data.with(|rows| missing_id_count(rows, &key));
            if missing > 0 {
                log::warn!("{} rows have no '{}' field, using their positions", missing, key);
            }
        });
    }

    let external = Memo::new(move |_| external_search.get());
    Effect::new(move |_| {
        let search = external.get();
        state.update(|s| s.set_external_search(search));
    });
    let active_search = Memo::new(move |_| state.with(|s| s.active_search().to_string()));

    let effective = Memo::new(move |_| {
        let static_filters = filters.map(|f| f.get()).unwrap_or_default();
        let key = id_key.get_value();
        data.with(|rows| {
            valid_columns.with(|cols| {
                effective_filters(&static_filters, enable_dynamic_filters, rows, cols, &key, bounds)
            })
        })
    });

    let snapshot = Memo::new(move |_| {
        data.with(|rows| valid_columns.with(|cols| state.with(|s| compute_view(rows, cols, s))))
    });

    let selected = Memo::new(move |_| state.with(|s| s.selected.clone()));
    let summary = Memo::new(move |_| {
        let key = id_key.get_value();
        data.with(|rows| snapshot.with(|snap| state.with(|s| selection_summary(snap, rows, s, &key))))
    });
    let page_ids = Memo::new(move |_| {
        let key = id_key.get_value();
        data.with(|rows| snapshot.with(|snap| ids_of(&snap.page_rows, rows, &key)))
    });
    let active_filters = Signal::derive(move || state.with(|s| s.column_filters.clone()));

    let on_sort = Callback::new(move |(id, shift): (String, bool)| {
        state.update(|s| s.toggle_sort(&id, enable_multi_sort && shift));
    });
    let on_select_row = Callback::new(move |(id, checked): (String, bool)| {
        state.update(|s| s.toggle_row(&id, checked));
    });
    let on_select_page = Callback::new(move |checked: bool| {
        let ids = page_ids.get_untracked();
        state.update(|s| s.set_rows_selected(ids, checked));
    });
    let on_filter_toggle = Callback::new(move |(key, value, multi): (String, String, bool)| {
        state.update(|s| s.toggle_filter_value(&key, &value, multi));
    });
    let on_filter_clear = Callback::new(move |_: ()| state.update(TableState::clear_filters));
    let on_page_change = Callback::new(move |page: usize| state.update(|s| s.set_page(page)));
    let on_page_size_change = Callback::new(move |size: usize| state.update(|s| s.set_page_size(size)));
    let on_search = Callback::new(move |text: String| state.update(|s| s.set_global_search(text)));

    // Ids for a bulk action; the selection is cleared before the callback runs
    let take_selection = move || -> Option<Vec<String>> {
        let key = id_key.get_value();
        let snap = snapshot.get_untracked();
        let mut ids = None;
        data.with_untracked(|rows| state.update(|s| ids = take_bulk_ids(&snap, rows, s, &key)));
        ids
    };

    let bulk_delete = move |_: leptos::ev::MouseEvent| {
        let Some(ids) = take_selection() else { return };
        log::info!("Bulk delete requested for {} rows", ids.len());
        if let Some(callback) = on_bulk_delete {
            callback.run(ids);
        }
    };

    let bulk_change = move |field: String, value: String| {
        bulk_menu.update(BulkMenuState::close);
        let Some(ids) = take_selection() else { return };
        log::info!("Bulk change of '{}' to '{}' requested for {} rows", field, value, ids.len());
        if let Some(callback) = on_bulk_change {
            callback.run((ids, field, value));
        }
    };

    let export = move |_: leptos::ev::MouseEvent| {
        let snap = snapshot.get_untracked();
        if let Some(callback) = on_export {
            let rows = data.with_untracked(|rows| {
                snap.filtered
                    .iter()
                    .filter_map(|&i| rows.get(i).cloned())
                    .collect::<Vec<_>>()
            });
            callback.run(rows);
            return;
        }

        let csv = data.with_untracked(|rows| {
            valid_columns.with_untracked(|cols| state.with_untracked(|s| build_csv(rows, &snap.filtered, cols, s)))
        });
        let file_name = export_file_name(chrono::Utc::now().timestamp_millis());
        match csv.and_then(|content| download_text_file(&content, &file_name, CSV_MIME)) {
            Ok(()) => log::info!("Exported {} rows to {}", snap.filtered_count(), file_name),
            Err(TableError::NoData) => alert("No data to export."),
            Err(e) => {
                log::error!("Export failed: {}", e);
                alert(&e.to_string());
            }
        }
    };

    let header_cells = move || {
        visible_columns
            .get()
            .into_iter()
            .map(|column| header_cell(column, state, on_sort))
            .collect_view()
    };

    let body = move || -> Result<AnyView, TableError> {
        let colspan = (visible_columns.with(Vec::len) + usize::from(show_select)).to_string();
        if is_loading.get().unwrap_or(false) {
            return Ok(view! {
                <tr><td class="data-table__message" colspan=colspan>"Loading..."</td></tr>
            }
            .into_any());
        }

        let snap = snapshot.get();
        if snap.is_empty() {
            return Ok(view! {
                <tr><td class="data-table__message" colspan=colspan>{empty_message.get_value()}</td></tr>
            }
            .into_any());
        }

        let search = active_search.get();
        let key = id_key.get_value();
        let rows = data
            .with(|rows| {
                visible_columns.with(|cols| {
                    render_rows(rows, cols, &snap, &key, &search, show_select, selected, on_select_row)
                })
            })
            .inspect_err(|e| log::error!("Table body failed to render: {:?}", e))?;

        Ok(view! { <>{rows}</> }.into_any())
    };

    view! {
        <div class="data-table">
            <div class="data-table__toolbar">
                {(!hide_search).then(|| view! {
                    <Show when=move || external.with(Option::is_none)>
                        <SearchInput
                            value=Signal::derive(move || state.with(|s| s.global_search.clone()))
                            on_change=on_search
                            placeholder=search_placeholder.get_value()
                        />
                    </Show>
                })}

                <div class="data-table__actions">
                    {enable_column_visibility.then(|| view! {
                        <div class="data-table__menu">
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| columns_menu_open.update(|open| *open = !*open)
                            >
                                {icon("columns")}
                                "Columns"
                            </Button>
                            <Show when=move || columns_menu_open.get()>
                                <div class="data-table__dropdown">
                                    {move || {
                                        valid_columns
                                            .get()
                                            .into_iter()
                                            .filter(|c| c.hideable && !is_reserved_column(&c.id))
                                            .map(|c| column_toggle(c, state))
                                            .collect_view()
                                    }}
                                </div>
                            </Show>
                        </div>
                    })}

                    {enable_export.then(|| view! {
                        <Button appearance=ButtonAppearance::Subtle on_click=export>
                            {icon("download")}
                            "Export"
                        </Button>
                    })}

                    {enable_bulk_change.then(|| view! {
                        <div class="data-table__menu">
                            <Button
                                appearance=ButtonAppearance::Secondary
                                disabled=Signal::derive(move || summary.get().selected == 0)
                                on_click=move |_| bulk_menu.update(BulkMenuState::toggle)
                            >
                                {icon("edit")}
                                {move || format!("Change ({})", summary.get().selected)}
                            </Button>
                            <Show when=move || bulk_menu.with(|m| m.open)>
                                <div class="data-table__dropdown">
                                    {bulk_options.get_value().into_iter().map(|option| {
                                        let field = option.field.clone();
                                        let is_expanded = move || {
                                            bulk_menu.with(|m| m.field.as_deref() == Some(field.as_str()))
                                        };
                                        let expand_field = option.field.clone();
                                        let values = StoredValue::new(option.options.clone());
                                        let value_field = StoredValue::new(option.field.clone());
                                        view! {
                                            <div class="data-table__dropdown-group">
                                                <div
                                                    class="data-table__dropdown-item"
                                                    on:click=move |_| bulk_menu.update(|m| m.expand(&expand_field))
                                                >
                                                    {option.label.clone()}
                                                    {icon("chevron-right")}
                                                </div>
                                                <Show when=is_expanded>
                                                    <div class="data-table__dropdown-submenu">
                                                        {values.get_value().into_iter().map(|value| {
                                                            let picked = value.value.clone();
                                                            view! {
                                                                <div
                                                                    class="data-table__dropdown-item"
                                                                    on:click=move |_| bulk_change(value_field.get_value(), picked.clone())
                                                                >
                                                                    {value.label}
                                                                </div>
                                                            }
                                                        }).collect_view()}
                                                    </div>
                                                </Show>
                                            </div>
                                        }
                                    }).collect_view()}
                                </div>
                            </Show>
                        </div>
                    })}

                    {enable_bulk_delete.then(|| view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || summary.get().selected == 0)
                            on_click=bulk_delete
                        >
                            {icon("trash")}
                            {move || format!("Delete ({})", summary.get().selected)}
                        </Button>
                    })}
                </div>
            </div>

            {enable_filters.then(|| view! {
                <Show when=move || effective.with(|f| !f.is_empty())>
                    <FilterPanel
                        is_expanded=filters_open
                        filters=effective
                        active=active_filters
                        on_toggle=on_filter_toggle
                        on_clear=on_filter_clear
                    />
                </Show>
            })}

            <ErrorBoundary fallback=|errors| view! {
                <div class="data-table__error" role="alert">
                    {icon("alert")}
                    <div>
                        <strong>"The table could not be displayed."</strong>
                        <ul>
                            {move || {
                                errors
                                    .get()
                                    .into_iter()
                                    .map(|(_, e)| {
                                        let message = e.to_string();
                                        let detail = format!("{:?}", e);
                                        view! {
                                            <li>
                                                <div>{message}</div>
                                                <pre class="data-table__error-detail">{detail}</pre>
                                            </li>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </ul>
                    </div>
                </div>
            }>
                <Table class="data-table__table">
                    <TableHeader>
                        <TableRow>
                            {show_select.then(|| view! {
                                <TableHeaderCheckbox ids=page_ids selected=selected on_change=on_select_page />
                            })}
                            {header_cells}
                        </TableRow>
                    </TableHeader>
                    <TableBody>{body}</TableBody>
                </Table>
            </ErrorBoundary>

            <div class="data-table__footer">
                <span class="data-table__selection">
                    {move || {
                        let s = summary.get();
                        format!("{} of {} selected", s.selected, s.filtered)
                    }}
                </span>
                {(!hide_pagination).then(|| view! {
                    <PaginationControls
                        current_page=Signal::derive(move || snapshot.with(|s| s.page))
                        total_pages=Signal::derive(move || snapshot.with(|s| s.page_count))
                        total_count=Signal::derive(move || snapshot.with(TableSnapshot::filtered_count))
                        page_size=Signal::derive(move || state.with(|s| s.page_size))
                        on_page_change=on_page_change
                        on_page_size_change=on_page_size_change
                        page_size_options=page_size_options.get_value().unwrap_or_else(|| config.page_size_options.clone())
                    />
                })}
            </div>
        </div>
    }
}

fn header_cell(column: ColumnDef, state: RwSignal<TableState>, on_sort: Callback<(String, bool)>) -> AnyView {
    let id = column.id.clone();
    let direction = Signal::derive(move || state.with(|s| sort_direction(&s.sorting, &id)));
    let sortable = column.can_sort();

    match column.header {
        HeaderDef::Literal(label) if sortable => view! {
            <SortableHeaderCell label=label column_id=column.id direction=direction on_sort=on_sort />
        }
        .into_any(),
        HeaderDef::Literal(label) => view! { <TableHeaderCell>{label}</TableHeaderCell> }.into_any(),
        HeaderDef::Rendered(render) => {
            let column_id = column.id.clone();
            let click_id = column.id;
            view! {
                <TableHeaderCell>
                    <div
                        class="table__sortable-header"
                        on:click=move |ev: leptos::ev::MouseEvent| {
                            if sortable {
                                on_sort.run((click_id.clone(), ev.shift_key()));
                            }
                        }
                    >
                        {move || {
                            let sorted = match direction.get() {
                                SortDirection::None => None,
                                SortDirection::Asc => Some(false),
                                SortDirection::Desc => Some(true),
                            };
                            render(&HeaderContext {
                                column_id: column_id.clone(),
                                sorted,
                            })
                        }}
                    </div>
                </TableHeaderCell>
            }
            .into_any()
        }
    }
}

fn column_toggle(column: ColumnDef, state: RwSignal<TableState>) -> impl IntoView {
    let id = column.id.clone();
    let toggle_id = column.id.clone();
    let hideable = column.hideable;

    view! {
        <label class="data-table__dropdown-item">
            <input
                type="checkbox"
                prop:checked=move || state.with(|s| s.is_column_visible(&id))
                on:change=move |_| state.update(|s| s.toggle_column_visibility(&toggle_id, hideable))
            />
            {column.header_text().to_string()}
        </label>
    }
}

#[allow(clippy::too_many_arguments)]
fn render_rows(
    rows: &[Row],
    columns: &[ColumnDef],
    snapshot: &TableSnapshot,
    id_key: &str,
    search: &str,
    show_select: bool,
    selected: Memo<HashSet<String>>,
    on_select: Callback<(String, bool)>,
) -> Result<Vec<AnyView>, TableError> {
    snapshot
        .page_rows
        .iter()
        .map(|&index| {
            let row = rows.get(index).ok_or_else(|| {
                TableError::render(
                    "A row disappeared while rendering",
                    format!("index {} of {} rows", index, rows.len()),
                )
            })?;
            let id = row_id(row, id_key, index);
            let cells = columns
                .iter()
                .map(|column| render_cell(column, row, &id, search))
                .collect::<Result<Vec<_>, _>>()?;
            let checkbox = show_select.then(|| {
                view! { <TableCellCheckbox item_id=id.clone() selected=selected on_change=on_select /> }
            });

            Ok(view! { <TableRow>{checkbox}{cells}</TableRow> }.into_any())
        })
        .collect()
}

fn render_cell(column: &ColumnDef, row: &Row, row_id: &str, search: &str) -> Result<AnyView, TableError> {
    let value = column.accessor_key.as_deref().and_then(|key| row.get(key));
    let content = match &column.cell {
        CellDef::Value => highlight_matches(&value.map(value_text).unwrap_or_default(), search),
        CellDef::Rendered(render) => render(&CellContext {
            column_id: &column.id,
            row,
            row_id,
            value,
        })
        .map_err(|e| match e {
            TableError::Render { .. } => e,
            other => TableError::render(
                format!("Column '{}' failed to render row '{}'", column.id, row_id),
                other.to_string(),
            ),
        })?,
    };

    Ok(view! {
        <TableCell>
            <TableCellLayout>{content}</TableCellLayout>
        </TableCell>
    }
    .into_any())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failing_cell_becomes_render_error() {
        let column = ColumnDef::display("fare", "Fare")
            .try_cell(|ctx| Err(TableError::InvalidColumn(format!("no fare on {}", ctx.row_id))));
        let row = json!({"id": 5}).as_object().cloned().unwrap();

        let err = render_cell(&column, &row, "5", "").err().unwrap();
        assert_eq!(
            err,
            TableError::render(
                "Column 'fare' failed to render row '5'",
                "invalid column definition: no fare on 5"
            )
        );
        assert!(err.detail().is_some());
    }
}
