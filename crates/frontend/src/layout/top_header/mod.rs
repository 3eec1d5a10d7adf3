//! Top bar: sidebar toggle, application title, signed-in user and logout.

use leptos::prelude::*;

use crate::shared::components::ui::badge::Badge;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};

#[component]
pub fn TopHeader(sidebar_open: RwSignal<bool>) -> impl IntoView {
    let (auth_state, _) = use_auth();

    let toggle_sidebar = move |_| sidebar_open.update(|open| *open = !*open);
    let logout = move |_| {
        do_logout();
        log::info!("Signed out");
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if sidebar_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("list")}
                </button>
                <span class="top-header__title">"Fleet Admin"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("users")}
                    <span>
                        {move || auth_state.with(|s| {
                            s.user_info
                                .as_ref()
                                .map(|u| u.full_name.clone().unwrap_or_else(|| u.username.clone()))
                                .unwrap_or_else(|| "Guest".to_string())
                        })}
                    </span>
                    {move || auth_state.with(|s| s.role()).map(|role| view! {
                        <Badge variant="neutral">{role.label()}</Badge>
                    })}
                </div>

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
