//! Select-all checkbox for the rows of the current page.

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;
use wasm_bindgen::JsCast;

/// Header checkbox over `ids`.
///
/// Checked when every id is selected, indeterminate when some are.
#[component]
pub fn TableHeaderCheckbox(
    /// Row ids covered by the checkbox
    #[prop(into)]
    ids: Signal<Vec<String>>,

    #[prop(into)]
    selected: Signal<HashSet<String>>,

    /// true = select all, false = clear all
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_state = Signal::derive(move || {
        let sel = selected.get();
        ids.with(|ids| checkbox_state(ids, &sel))
    });

    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    Effect::new(move |_| {
        if let Some(input) = checkbox_ref.get() {
            let state = checkbox_state.get();
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                input_el.set_indeterminate(matches!(state, CheckboxState::Indeterminate));
            }
        }
    });

    view! {
        <TableHeaderCell class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || matches!(checkbox_state.get(), CheckboxState::Checked)
                disabled=move || ids.with(|ids| ids.is_empty())
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </TableHeaderCell>
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

fn checkbox_state(ids: &[String], selected: &HashSet<String>) -> CheckboxState {
    let count = ids.iter().filter(|id| selected.contains(*id)).count();
    if count == 0 {
        CheckboxState::Unchecked
    } else if count == ids.len() {
        CheckboxState::Checked
    } else {
        CheckboxState::Indeterminate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_state() {
        let ids: Vec<String> = vec!["1".into(), "2".into()];
        let mut selected = HashSet::new();
        assert_eq!(checkbox_state(&ids, &selected), CheckboxState::Unchecked);
        selected.insert("1".to_string());
        selected.insert("9".to_string());
        assert_eq!(checkbox_state(&ids, &selected), CheckboxState::Indeterminate);
        selected.insert("2".to_string());
        assert_eq!(checkbox_state(&ids, &selected), CheckboxState::Checked);
        assert_eq!(checkbox_state(&[], &selected), CheckboxState::Unchecked);
    }
}
