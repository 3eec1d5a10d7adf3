use contracts::system::auth::UserInfo;
use contracts::system::roles::Role;
use leptos::prelude::*;

use super::storage;

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        self.user_info.as_ref().map(|u| u.role)
    }
}

/// Auth context provider component.
///
/// Restores the session written by the login flow from localStorage.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let initial = AuthState {
        access_token: storage::get_access_token(),
        user_info: storage::get_user_info(),
    };
    if initial.user_info.is_none() {
        log::info!("No stored session, navigation will be restricted");
    }
    let (auth_state, set_auth_state) = signal(initial);

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Role of the signed-in user, reactive
pub fn current_role() -> Signal<Option<Role>> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || auth_state.with(|s| s.role()))
}

/// Helper: sign out locally
pub fn do_logout() {
    storage::clear_session();
    let (_, set_auth_state) = use_auth();
    set_auth_state.set(AuthState::default());
}
