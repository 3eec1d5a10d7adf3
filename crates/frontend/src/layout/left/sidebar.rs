//! Sidebar with collapsible menu groups, filtered by role permissions

use contracts::system::menu::MenuItem;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::shared::icons::icon;
use crate::system::auth::context::current_role;
use crate::system::permissions::use_permissions;

/// Whether `path` is the route itself or one of its sub-pages
fn is_active(current: &str, route: &str) -> bool {
    current == route
        || (current.starts_with(route) && current.as_bytes().get(route.len()) == Some(&b'/'))
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let permissions = use_permissions();
    let role = current_role();
    let location = use_location();
    let pathname = location.pathname;

    let expanded_groups = RwSignal::new(Vec::<&'static str>::new());

    let items = Memo::new(move |_| match role.get() {
        Some(role) => permissions.gate().visible_menu(role),
        None => Vec::new(),
    });

    view! {
        <nav class="app-sidebar__content">
            <Show
                when=move || items.with(|items| !items.is_empty())
                fallback=|| view! { <div class="app-sidebar__empty">"No sections available"</div> }
            >
                {move || {
                    items
                        .get()
                        .into_iter()
                        .map(|item| menu_group(item, expanded_groups, pathname))
                        .collect_view()
                }}
            </Show>
        </nav>
    }
}

fn menu_group(
    item: MenuItem,
    expanded_groups: RwSignal<Vec<&'static str>>,
    pathname: Memo<String>,
) -> AnyView {
    let title = item.title;

    if !item.has_children() {
        let route = item.path.unwrap_or("/");
        return view! {
            <A href=route attr:class="app-sidebar__item">
                <div
                    class="app-sidebar__item-content"
                    class:app-sidebar__item-content--active=move || pathname.with(|p| is_active(p, route))
                >
                    {icon(item.icon)}
                    <span>{title}</span>
                </div>
            </A>
        }
        .into_any();
    }

    let is_expanded = move || expanded_groups.with(|groups| groups.contains(&title));
    let toggle = move |_| {
        expanded_groups.update(|groups| {
            if let Some(pos) = groups.iter().position(|g| *g == title) {
                groups.remove(pos);
            } else {
                groups.push(title);
            }
        })
    };
    let children = StoredValue::new(item.children.clone());

    view! {
        <div class="app-sidebar__group">
            <div class="app-sidebar__item" style:padding-left="12px" on:click=toggle>
                <div class="app-sidebar__item-content">
                    {icon(item.icon)}
                    <span>{title}</span>
                </div>
                <div
                    class="app-sidebar__chevron"
                    class:app-sidebar__chevron--expanded=is_expanded
                >
                    {icon("chevron-right")}
                </div>
            </div>

            <Show when=is_expanded>
                <div class="app-sidebar__children">
                    {children
                        .get_value()
                        .into_iter()
                        .filter_map(|child| {
                            let route = child.path?;
                            Some(view! {
                                <A href=route attr:class="app-sidebar__item">
                                    <div
                                        class="app-sidebar__item-content"
                                        class:app-sidebar__item-content--active=move || {
                                            pathname.with(|p| p == route)
                                        }
                                        style:padding-left="10px"
                                    >
                                        {icon(child.icon)}
                                        <span>{child.title}</span>
                                    </div>
                                </A>
                            })
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active_on_segment_boundary() {
        assert!(is_active("/admin/dashboard", "/admin/dashboard"));
        assert!(is_active("/admin/dashboard/today", "/admin/dashboard"));
        assert!(!is_active("/admin/dashboards", "/admin/dashboard"));
    }
}
