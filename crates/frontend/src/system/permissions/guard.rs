use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use super::context::use_permissions;
use crate::system::auth::context::current_role;

pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Renders `children` only while the signed-in role may enter the current
/// path, otherwise redirects to the unauthorized page.
///
/// Without a session there is no role to check and access is denied.
#[component]
pub fn RequirePermission(children: ChildrenFn) -> impl IntoView {
    let permissions = use_permissions();
    let role = current_role();
    let location = use_location();

    let allowed = Memo::new(move |_| {
        let path = location.pathname.get();
        match role.get() {
            Some(role) => permissions.gate().is_path_allowed(&path, role),
            None => false,
        }
    });

    Effect::new(move |_| {
        if !allowed.get() {
            log::warn!(
                "Access to {} denied for role {:?}",
                location.pathname.get_untracked(),
                role.get_untracked()
            );
        }
    });

    view! {
        <Show
            when=move || allowed.get()
            fallback=|| view! { <Redirect path=UNAUTHORIZED_PATH /> }
        >
            {children()}
        </Show>
    }
}
