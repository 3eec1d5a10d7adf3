//! Sortable table header cell.
//!
//! ```rust,ignore
//! <SortableHeaderCell
//!     label="Status"
//!     column_id="status"
//!     direction=Signal::derive(move || state.with(|s| sort_direction(&s.sorting, "status")))
//!     on_sort=Callback::new(move |(id, multi)| toggle_sort(id, multi))
//! />
//! ```

use crate::shared::data_table::SortDirection;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

/// Header cell that toggles sorting when clicked.
///
/// Shift-click reports a multi-column sort request.
#[component]
pub fn SortableHeaderCell(
    #[prop(into)]
    label: String,

    #[prop(into)]
    column_id: String,

    #[prop(into)]
    direction: Signal<SortDirection>,

    /// (column id, shift held)
    on_sort: Callback<(String, bool)>,

    #[prop(optional, default = 100.0)]
    min_width: f64,
) -> impl IntoView {
    let handle_click = move |ev: leptos::ev::MouseEvent| {
        on_sort.run((column_id.clone(), ev.shift_key()));
    };

    view! {
        <TableHeaderCell min_width=min_width>
            <div class="table__sortable-header" on:click=handle_click>
                {label}
                <span class=move || get_sort_class(direction.get())>
                    {move || get_sort_indicator(direction.get())}
                </span>
            </div>
        </TableHeaderCell>
    }
}
