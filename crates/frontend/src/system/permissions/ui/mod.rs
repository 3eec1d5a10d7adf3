//! Settings page that edits which sections each role may see.

use contracts::system::roles::Role;
use leptos::prelude::*;
use thaw::*;

use super::context::use_permissions;
use super::gate::{PermissionEditor, SectionEntry, SettingsCategory};
use super::store::PermissionStore;
use crate::shared::components::PageHeader;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;

const ALL_CATEGORIES_VALUE: &str = "";

#[component]
pub fn PermissionSettingsPage() -> impl IntoView {
    let permissions = use_permissions();
    let editor = RwSignal::new(PermissionEditor::new(
        permissions.gate().menu().to_vec(),
        permissions.gate().map().clone(),
    ));

    let selected_role = RwSignal::new(Role::Admin.as_str().to_string());
    let role = Memo::new(move |_| {
        selected_role
            .get()
            .parse::<Role>()
            .unwrap_or(Role::Admin)
    });
    let category = RwSignal::new(SettingsCategory::All);
    let error = RwSignal::new(None::<String>);

    let section_titles: Vec<&'static str> =
        permissions.gate().menu().iter().map(|item| item.title).collect();
    let entries = Memo::new(move |_| {
        let category = category.get();
        editor.with(|e| e.category_keys(&category))
    });
    let is_dirty = Signal::derive(move || editor.with(PermissionEditor::is_dirty));

    let save = move |_| {
        let store = PermissionStore::browser();
        if let Some(Err(e)) = editor.try_update(|e| e.save(&store)) {
            log::error!("Failed to save permissions: {}", e);
            error.set(Some(e.to_string()));
        }
    };

    let reset = move |_| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("Restore default permissions for all roles?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let store = PermissionStore::browser();
        if let Some(Err(e)) = editor.try_update(|e| e.reset(&store)) {
            log::error!("Failed to reset permissions: {}", e);
            error.set(Some(e.to_string()));
        }
    };

    view! {
        <PageFrame page_id="sys_permissions--system" category=PAGE_CAT_SYSTEM>
            <PageHeader title="Permissions" subtitle="Menu sections visible to each role".to_string()>
                <Show when=move || is_dirty.get()>
                    <span class="permissions__dirty">"Unsaved changes"</span>
                </Show>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || !is_dirty.get())
                    on_click=move |_| editor.update(PermissionEditor::discard)
                >
                    "Discard"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=reset>
                    {icon("refresh")}
                    "Reset to defaults"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !is_dirty.get())
                    on_click=save
                >
                    {icon("check")}
                    "Save"
                </Button>
            </PageHeader>

            {move || error.get().map(|message| view! {
                <div class="alert alert--error">
                    {icon("alert")}
                    <span>{message}</span>
                    <button class="alert__close" on:click=move |_| error.set(None)>
                        {icon("x")}
                    </button>
                </div>
            })}

            <div class="page__content permissions">
                <TabList selected_value=selected_role>
                    {Role::all()
                        .into_iter()
                        .map(|role| view! { <Tab value=role.as_str()>{role.label()}</Tab> })
                        .collect_view()}
                </TabList>

                <div class="permissions__toolbar">
                    <select
                        class="permissions__category"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            category.set(if value == ALL_CATEGORIES_VALUE {
                                SettingsCategory::All
                            } else {
                                SettingsCategory::Section(value)
                            });
                        }
                    >
                        <option value=ALL_CATEGORIES_VALUE>"All sections"</option>
                        {section_titles
                            .into_iter()
                            .map(|title| view! { <option value=title>{title}</option> })
                            .collect_view()}
                    </select>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            let category = category.get_untracked();
                            editor.update(|e| e.select_all(role.get_untracked(), &category, true));
                        }
                    >
                        "Select all"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            let category = category.get_untracked();
                            editor.update(|e| e.select_none(role.get_untracked(), &category));
                        }
                    >
                        "Select none"
                    </Button>
                </div>

                <div class="permissions__tree">
                    {move || {
                        entries
                            .get()
                            .into_iter()
                            .map(|entry| permission_row(entry, editor, role))
                            .collect_view()
                    }}
                </div>
            </div>
        </PageFrame>
    }
}

/// One checkbox of the tree. A granted child under a revoked parent is
/// marked dormant: it is stored but unreachable.
fn permission_row(
    entry: SectionEntry,
    editor: RwSignal<PermissionEditor>,
    role: Memo<Role>,
) -> impl IntoView {
    let SectionEntry {
        key,
        title,
        parent_key,
    } = entry;
    let is_child = parent_key.is_some();

    let checked_key = key.clone();
    let is_checked = move || editor.with(|e| e.is_checked(role.get(), &checked_key));

    let dormant_key = key.clone();
    let dormant_parent = parent_key.clone();
    let is_dormant = move || {
        dormant_parent.as_deref().is_some_and(|parent| {
            editor.with(|e| {
                let role = role.get();
                e.is_checked(role, &dormant_key) && !e.is_checked(role, parent)
            })
        })
    };

    let on_change = move |ev| {
        let checked = event_target_checked(&ev);
        editor.update(|e| e.toggle(role.get_untracked(), &key, checked, parent_key.as_deref()));
    };

    view! {
        <label
            class="permissions__item"
            class:permissions__item--child=is_child
            class:permissions__item--dormant=is_dormant
        >
            <input type="checkbox" prop:checked=is_checked on:change=on_change />
            <span>{title}</span>
        </label>
    }
}
