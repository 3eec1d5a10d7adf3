use contracts::system::menu::admin_menu;
use leptos::prelude::*;
use std::sync::Arc;

use super::gate::PermissionGate;
use super::store::PermissionStore;

/// Committed permissions, loaded once per page life
#[derive(Clone, Debug)]
pub struct PermissionContext {
    gate: Arc<PermissionGate>,
}

impl PermissionContext {
    pub fn new(gate: PermissionGate) -> Self {
        Self {
            gate: Arc::new(gate),
        }
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }
}

/// Reads the stored map (or the defaults) and shares it with the menu,
/// the route guard and the settings page.
///
/// Save and reset reload the page, so the map never changes while mounted.
#[component]
pub fn PermissionProvider(children: Children) -> impl IntoView {
    let menu = admin_menu();
    let map = PermissionStore::browser().effective_map(&menu);
    provide_context(PermissionContext::new(PermissionGate::new(map, menu)));

    children()
}

pub fn use_permissions() -> PermissionContext {
    use_context::<PermissionContext>().expect("PermissionProvider not found in component tree")
}
