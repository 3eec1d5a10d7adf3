pub mod state;

use contracts::domain::a002_driver::DriverStatus;
use contracts::shared::bulk::BulkResult;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::{create_state, driver_row};
use crate::domain::a002_driver::api;
use crate::shared::components::ui::StatusBadge;
use crate::shared::components::PageHeader;
use crate::shared::data_table::{
    value_text, BulkChangeOption, ColumnDef, DataTable, FilterDef, FilterOption, TableError,
};
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

fn status_options() -> Vec<FilterOption> {
    DriverStatus::all()
        .into_iter()
        .map(|s| FilterOption::new(s.as_str(), s.label()))
        .collect()
}

fn driver_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::accessor("fullName", "Name").hideable(false),
        ColumnDef::accessor("phone", "Phone"),
        ColumnDef::accessor("licenseNumber", "License"),
        ColumnDef::accessor("status", "Status").cell(|ctx| {
            let status = ctx.value.map(value_text).unwrap_or_default();
            view! { <StatusBadge status=status.clone()>{status}</StatusBadge> }.into_any()
        }),
        ColumnDef::accessor("vehiclePlate", "Vehicle"),
        ColumnDef::accessor("city", "City"),
        ColumnDef::accessor("rating", "Rating").try_cell(|ctx| {
            let rating = ctx.value.and_then(|v| v.as_f64()).ok_or_else(|| {
                TableError::render(
                    format!("Driver {} has no rating", ctx.row_id),
                    format!("rating = {:?}", ctx.value),
                )
            })?;
            Ok(view! { <span class="cell-number">{format!("{:.1} ★", rating)}</span> }.into_any())
        }),
        ColumnDef::accessor("joinedAt", "Joined"),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn DriverList() -> impl IntoView {
    let state = create_state();

    let fetch = move || {
        state.update(|s| s.is_loading = true);
        spawn_local(async move {
            let result = api::fetch_drivers().await;
            let _ = state.try_update(|s| {
                s.is_loading = false;
                match result {
                    Ok(drivers) => {
                        s.drivers = drivers;
                        s.error = None;
                    }
                    Err(e) => {
                        log::error!("Failed to load drivers: {}", e);
                        s.error = Some(e);
                    }
                }
            });
        });
    };

    let report = move |result: Result<BulkResult, String>| match result {
        Ok(r) if r.failed_ids.is_empty() => log::info!("{} drivers affected", r.affected),
        Ok(r) => {
            let _ = state.try_update(|s| {
                s.error = Some(format!("{} drivers were not updated", r.failed_ids.len()))
            });
        }
        Err(e) => {
            let _ = state.try_update(|s| s.error = Some(e));
        }
    };

    let on_bulk_delete = Callback::new(move |ids: Vec<String>| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete {} drivers?", ids.len())).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            report(api::delete_drivers(ids).await);
            fetch();
        });
    });

    let on_bulk_change = Callback::new(move |(ids, field, value): (Vec<String>, String, String)| {
        spawn_local(async move {
            report(api::change_drivers(ids, field, value).await);
            fetch();
        });
    });

    let rows = Signal::derive(move || {
        state.with(|s| s.drivers.iter().filter_map(driver_row).collect::<Vec<_>>())
    });
    let search = Signal::derive(move || state.with(|s| s.search.clone()));
    let filters = vec![FilterDef::new("status", "Status", status_options())];
    let bulk_options = vec![BulkChangeOption::new("status", "Status", status_options())];

    fetch();

    view! {
        <PageFrame page_id="a002_driver--list" category=PAGE_CAT_LIST>
            <PageHeader title="Drivers">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |text: String| state.update(|s| s.search = text))
                    placeholder="Name, phone or license..."
                />
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Refresh"
                </Button>
            </PageHeader>

            {move || state.with(|s| s.error.clone()).map(|message| view! {
                <div class="alert alert--error">
                    {icon("alert")}
                    <span>{message}</span>
                    <button
                        class="alert__close"
                        on:click=move |_| state.update(|s| s.error = None)
                    >
                        {icon("x")}
                    </button>
                </div>
            })}

            <div class="page__content">
                <DataTable
                    columns=driver_columns()
                    data=rows
                    external_search=search
                    filters=filters
                    enable_dynamic_filters=true
                    enable_bulk_delete=true
                    enable_bulk_change=true
                    on_bulk_delete=on_bulk_delete
                    on_bulk_change=on_bulk_change
                    bulk_change_options=bulk_options
                    empty_message="No drivers found."
                    is_loading=Signal::derive(move || state.with(|s| s.is_loading))
                />
            </div>
        </PageFrame>
    }
}
