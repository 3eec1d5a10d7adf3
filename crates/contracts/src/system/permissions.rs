use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::menu::MenuItem;
use super::roles::Role;

/// Section key → allowed flag for one role
pub type RolePermissions = BTreeMap<String, bool>;

/// Role → section key → allowed.
///
/// Serialized as a plain JSON object so the stored blob reads as
/// `{"admin": {"Home": true, "Bookings:Pending": true}}`. A key absent from
/// a role's entry means "never granted".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMap(BTreeMap<String, RolePermissions>);

impl PermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Role, key: &str) -> bool {
        self.0
            .get(role.as_str())
            .and_then(|perms| perms.get(key))
            .copied()
            .unwrap_or(false)
    }

    /// Stored value of a key, `None` when the key was never written
    pub fn stored(&self, role: Role, key: &str) -> Option<bool> {
        self.0.get(role.as_str()).and_then(|perms| perms.get(key)).copied()
    }

    pub fn set(&mut self, role: Role, key: &str, allowed: bool) {
        self.role_mut(role).insert(key.to_string(), allowed);
    }

    pub fn role(&self, role: Role) -> Option<&RolePermissions> {
        self.0.get(role.as_str())
    }

    pub fn role_mut(&mut self, role: Role) -> &mut RolePermissions {
        self.0.entry(role.as_str().to_string()).or_default()
    }

    /// Role names present in the map, including ones this build does not know
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

const ACCOUNTANT_SECTIONS: &[&str] = &[
    "Home",
    "Bookings",
    "TUK Booking",
    "Manage Fares",
    "Corporate Portal",
    "Reports",
];

const CALL_CENTER_SECTIONS: &[&str] = &["Home", "Bookings", "TUK Booking"];

/// Permission map used while nothing has been saved yet.
///
/// `admin` sees everything, `accountant` and `callCenterAgent` see fixed
/// allow-lists of top-level sections with all their children. `corporate`
/// and `driver` get empty entries; their access is decided by route
/// allow-lists outside the menu gate.
pub fn default_permission_map(menu: &[MenuItem]) -> PermissionMap {
    let mut map = PermissionMap::new();

    for role in Role::all() {
        let perms = map.role_mut(role);
        let allow_list: Option<&[&str]> = match role {
            Role::Admin => None,
            Role::Accountant => Some(ACCOUNTANT_SECTIONS),
            Role::CallCenterAgent => Some(CALL_CENTER_SECTIONS),
            Role::Corporate | Role::Driver => Some(&[]),
        };

        for item in menu {
            let granted = allow_list.map_or(true, |list| list.contains(&item.title));
            if !granted {
                continue;
            }
            perms.insert(item.title.to_string(), true);
            for key in item.child_keys() {
                perms.insert(key, true);
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::menu::admin_menu;

    #[test]
    fn test_admin_defaults_cover_every_key() {
        let menu = admin_menu();
        let map = default_permission_map(&menu);
        for key in MenuItem::all_section_keys(&menu) {
            assert!(map.get(Role::Admin, &key), "admin should see {}", key);
        }
    }

    #[test]
    fn test_accountant_defaults() {
        let map = default_permission_map(&admin_menu());
        assert!(map.get(Role::Accountant, "Manage Fares"));
        assert!(map.get(Role::Accountant, "Reports:Revenue Reports"));
        assert!(!map.get(Role::Accountant, "Drivers"));
        assert!(!map.get(Role::Accountant, "Settings:Permissions"));
    }

    #[test]
    fn test_call_center_defaults() {
        let map = default_permission_map(&admin_menu());
        assert!(map.get(Role::CallCenterAgent, "Bookings:Pending"));
        assert!(map.get(Role::CallCenterAgent, "TUK Booking"));
        assert!(!map.get(Role::CallCenterAgent, "Reports"));
    }

    #[test]
    fn test_corporate_and_driver_get_nothing() {
        let map = default_permission_map(&admin_menu());
        assert!(map.role(Role::Driver).map_or(true, |perms| perms.is_empty()));
        assert!(map.role(Role::Corporate).map_or(true, |perms| perms.is_empty()));
    }

    #[test]
    fn test_blob_shape() {
        let mut map = PermissionMap::new();
        map.set(Role::CallCenterAgent, "Bookings:Pending", true);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"callCenterAgent":{"Bookings:Pending":true}}"#);

        let parsed: PermissionMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
        assert_eq!(parsed.stored(Role::CallCenterAgent, "Bookings"), None);
    }
}
