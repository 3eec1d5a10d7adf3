use crate::routes::AppRoutes;
use crate::system::auth::context::AuthProvider;
use crate::system::permissions::PermissionProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <AuthProvider>
            <PermissionProvider>
                <AppRoutes />
            </PermissionProvider>
        </AuthProvider>
    }
}
