use crate::shared::data_table::{ActiveFilters, FilterDef, FilterOrigin};
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible facet panel.
///
/// Each facet lists its options as toggle chips; active selections are
/// repeated as removable tags under the facets.
#[component]
pub fn FilterPanel(
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    #[prop(into)]
    filters: Signal<Vec<FilterDef>>,

    #[prop(into)]
    active: Signal<ActiveFilters>,

    /// (facet key, option value, facet allows several values)
    on_toggle: Callback<(String, String, bool)>,

    on_clear: Callback<()>,
) -> impl IntoView {
    let active_count = Signal::derive(move || active.with(|a| a.values().map(|v| v.len()).sum::<usize>()));

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=move |_| is_expanded.update(|e| *e = !*e)>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-down")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filters"</span>
                    <Show when=move || { active_count.get() > 0 }>
                        <span class="badge badge--primary">{move || active_count.get()}</span>
                    </Show>
                </div>
                <Show when=move || { active_count.get() > 0 }>
                    <button class="filter-panel__clear" on:click=move |_| on_clear.run(())>
                        "Clear filters"
                    </button>
                </Show>
            </div>

            <Show when=move || is_expanded.get()>
                <div class="filter-panel-content">
                    <For
                        each=move || filters.get()
                        key=|f| f.key.clone()
                        children=move |filter: FilterDef| {
                            let filter = StoredValue::new(filter);
                            view! {
                                <div class="filter-group">
                                    <span class="filter-group__label">
                                        {filter.with_value(|f| f.label.clone())}
                                        {filter.with_value(|f| (f.origin == FilterOrigin::Dynamic).then_some(" (auto)"))}
                                    </span>
                                    <div class="filter-group__options">
                                        {filter.with_value(|f| f.options.clone()).into_iter().map(|option| {
                                            let value = option.value.clone();
                                            let is_on = move || {
                                                let key = filter.with_value(|f| f.key.clone());
                                                active.with(|a| a.get(&key).is_some_and(|v| v.contains(&value)))
                                            };
                                            let value = option.value.clone();
                                            view! {
                                                <button
                                                    class=move || if is_on() { "filter-chip filter-chip--active" } else { "filter-chip" }
                                                    on:click=move |_| {
                                                        let (key, multi) = filter.with_value(|f| (f.key.clone(), f.multi));
                                                        on_toggle.run((key, value.clone(), multi));
                                                    }
                                                >
                                                    {option.label}
                                                </button>
                                            }
                                        }).collect_view()}
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </Show>

            <div class="filter-panel__tags">
                {move || {
                    let defs = filters.get();
                    active.get().into_iter().flat_map(|(key, values)| {
                        let def = defs.iter().find(|f| f.key == key).cloned();
                        values.into_iter().map(move |value| {
                            let (label, multi) = match &def {
                                Some(f) => (format!("{}: {}", f.label, f.option_label(&value)), f.multi),
                                None => (format!("{}: {}", key, value), true),
                            };
                            let key = key.clone();
                            view! {
                                <FilterTag
                                    label=label
                                    on_remove=Callback::new(move |_| on_toggle.run((key.clone(), value.clone(), multi)))
                                />
                            }
                        })
                        .collect::<Vec<_>>()
                    })
                    .collect_view()
                }}
            </div>
        </div>
    }
}

/// Removable chip for one active filter value
#[component]
pub fn FilterTag(
    #[prop(into)]
    label: String,

    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}
