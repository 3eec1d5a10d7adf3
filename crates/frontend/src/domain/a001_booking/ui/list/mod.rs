pub mod state;

use contracts::domain::a001_booking::BookingStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::state::{booking_rows, create_state};
use crate::domain::a001_booking::api;
use crate::shared::components::ui::StatusBadge;
use crate::shared::components::PageHeader;
use crate::shared::data_table::{
    value_text, BulkChangeOption, ColumnDef, DataTable, FilterDef, FilterOption, TableError,
};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;

fn status_options() -> Vec<FilterOption> {
    BookingStatus::all()
        .into_iter()
        .map(|s| FilterOption::new(s.as_str(), s.label()))
        .collect()
}

fn booking_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::accessor("bookingNumber", "Booking #").hideable(false),
        ColumnDef::accessor("passengerName", "Passenger"),
        ColumnDef::accessor("passengerPhone", "Phone"),
        ColumnDef::accessor("pickupAddress", "Pickup"),
        ColumnDef::accessor("dropoffAddress", "Drop-off"),
        ColumnDef::accessor("pickupAt", "Pickup time"),
        ColumnDef::accessor("status", "Status").cell(|ctx| {
            let status = ctx.value.map(value_text).unwrap_or_default();
            let label = BookingStatus::all()
                .into_iter()
                .find(|s| s.as_str() == status)
                .map(|s| s.label().to_string())
                .unwrap_or_else(|| status.clone());
            view! { <StatusBadge status=status>{label}</StatusBadge> }.into_any()
        }),
        ColumnDef::accessor("vehicleType", "Vehicle"),
        ColumnDef::accessor("city", "City"),
        ColumnDef::accessor("fare", "Fare").try_cell(|ctx| {
            let fare = ctx.value.and_then(|v| v.as_f64()).ok_or_else(|| {
                TableError::render(
                    format!("Booking {} has no fare", ctx.row_id),
                    format!("fare = {:?}", ctx.value),
                )
            })?;
            Ok(view! { <span class="cell-number">{format!("{:.2}", fare)}</span> }.into_any())
        }),
        ColumnDef::accessor("driverName", "Driver").cell(|ctx| {
            match ctx.value.filter(|v| !v.is_null()) {
                Some(name) => view! { <span>{value_text(name)}</span> }.into_any(),
                None => view! { <span class="text-muted">"Unassigned"</span> }.into_any(),
            }
        }),
    ]
}

#[component]
#[allow(non_snake_case)]
pub fn BookingList(
    /// Restricts the list to one status, for the per-status sub-pages
    #[prop(optional)]
    status: Option<BookingStatus>,
) -> impl IntoView {
    let state = create_state();

    let fetch = move || {
        state.update(|s| s.is_loading = true);
        spawn_local(async move {
            let result = api::fetch_bookings().await;
            // The page may be gone by now; try_update drops the write then
            let _ = state.try_update(|s| {
                s.is_loading = false;
                match result {
                    Ok(bookings) => {
                        s.bookings = bookings;
                        s.error = None;
                    }
                    Err(e) => {
                        log::error!("Failed to load bookings: {}", e);
                        s.error = Some(e);
                    }
                }
            });
        });
    };

    let report = move |action: &'static str, result: Result<contracts::shared::bulk::BulkResult, String>| {
        match result {
            Ok(r) => {
                log::info!("Bulk {}: {} bookings affected", action, r.affected);
                if !r.failed_ids.is_empty() {
                    let _ = state.try_update(|s| {
                        s.error = Some(format!("{} bookings could not be {}", r.failed_ids.len(), action))
                    });
                }
            }
            Err(e) => {
                let _ = state.try_update(|s| s.error = Some(e));
            }
        }
    };

    let on_bulk_delete = Callback::new(move |ids: Vec<String>| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete {} bookings?", ids.len())).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            report("deleted", api::delete_bookings(ids).await);
            fetch();
        });
    });

    let on_bulk_change = Callback::new(move |(ids, field, value): (Vec<String>, String, String)| {
        spawn_local(async move {
            report("updated", api::change_bookings(ids, field, value).await);
            fetch();
        });
    });

    let rows = Signal::derive(move || state.with(|s| booking_rows(&s.bookings, status)));
    let filters = Signal::derive(move || {
        let mut filters = vec![FilterDef::new("vehicleType", "Vehicle", vec![
            FilterOption::new("TUK", "TUK"),
            FilterOption::new("CAR", "Car"),
            FilterOption::new("VAN", "Van"),
        ])];
        if status.is_none() {
            filters.insert(0, FilterDef::new("status", "Status", status_options()));
        }
        filters
    });
    let bulk_options = vec![BulkChangeOption::new("status", "Status", status_options())];

    let title = match status {
        Some(s) => format!("{} bookings", s.label()),
        None => "All bookings".to_string(),
    };

    fetch();

    view! {
        <PageFrame page_id="a001_booking--list" category=PAGE_CAT_LIST>
            <PageHeader title=title>
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
                    columns=booking_columns()
                    data=rows
                    search_placeholder="Search bookings..."
                    filters=filters
                    enable_dynamic_filters=true
                    enable_multi_sort=true
                    enable_bulk_delete=true
                    enable_bulk_change=true
                    on_bulk_delete=on_bulk_delete
                    on_bulk_change=on_bulk_change
                    bulk_change_options=bulk_options
                    empty_message="No bookings found."
                    is_loading=Signal::derive(move || state.with(|s| s.is_loading))
                />
            </div>
        </PageFrame>
    }
}
