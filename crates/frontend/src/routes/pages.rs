//! Small routed pages: dashboard, access denied, not found and the
//! placeholder for menu entries without a dedicated page.

use contracts::system::menu::{resolve_path, split_section_key};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::shared::components::PageHeader;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{PAGE_CAT_CUSTOM, PAGE_CAT_SYSTEM};
use crate::system::auth::context::current_role;
use crate::system::permissions::use_permissions;

/// Landing page: one card per section the role may open
#[component]
pub fn DashboardPage() -> impl IntoView {
    let permissions = use_permissions();
    let role = current_role();

    let sections = move || {
        role.get()
            .map(|role| permissions.gate().visible_menu(role))
            .unwrap_or_default()
    };

    view! {
        <PageFrame page_id="dashboard--custom" category=PAGE_CAT_CUSTOM>
            <PageHeader
                title="Dashboard"
                subtitle=Signal::derive(move || role.get().map(|r| format!("Signed in as {}", r.label())))
            >
                {()}
            </PageHeader>
            <div class="page__content dashboard">
                {move || {
                    sections()
                        .into_iter()
                        .filter_map(|item| {
                            let href = item.path.or_else(|| item.children.first().and_then(|c| c.path))?;
                            Some(view! {
                                <A href=href attr:class="dashboard__card">
                                    {icon(item.icon)}
                                    <span class="dashboard__card-title">{item.title}</span>
                                    <span class="dashboard__card-meta">
                                        {format!("{} pages", item.children.len().max(1))}
                                    </span>
                                </A>
                            })
                        })
                        .collect_view()
                }}
            </div>
        </PageFrame>
    }
}

#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    let role = current_role();

    view! {
        <PageFrame page_id="unauthorized--system" category=PAGE_CAT_SYSTEM>
            <div class="page__content empty-state">
                {icon("shield")}
                <h2>"Access denied"</h2>
                <p>
                    {move || match role.get() {
                        Some(role) => format!("The {} role may not open this page.", role.label()),
                        None => "Sign in to use the admin console.".to_string(),
                    }}
                </p>
                <A href="/admin/dashboard">"Back to dashboard"</A>
            </div>
        </PageFrame>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <PageFrame page_id="not_found--system" category=PAGE_CAT_SYSTEM>
            <div class="page__content empty-state">
                {icon("alert")}
                <h2>"Page not found"</h2>
                <A href="/admin/dashboard">"Back to dashboard"</A>
            </div>
        </PageFrame>
    }
}

/// Stand-in for menu entries whose forms live outside this console
#[component]
pub fn SectionPlaceholderPage() -> impl IntoView {
    let permissions = use_permissions();
    let location = use_location();

    let title = move || {
        let path = location.pathname.get();
        match resolve_path(permissions.gate().menu(), &path) {
            Some(section) => match section.child_key.as_deref().map(split_section_key) {
                Some((parent, Some(child))) => format!("{} / {}", parent, child),
                _ => section.parent_key,
            },
            None => path,
        }
    };

    view! {
        <PageFrame page_id="section--custom" category=PAGE_CAT_CUSTOM>
            <div class="page__content empty-state">
                {icon("file")}
                <h2>{title}</h2>
                <p>"This section has no page yet."</p>
            </div>
        </PageFrame>
    }
}
