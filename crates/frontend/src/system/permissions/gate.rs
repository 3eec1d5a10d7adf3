//! Role-based access decisions over the menu tree, and the working copy
//! edited on the settings page.

use contracts::system::menu::{resolve_path, section_key, split_section_key, MenuItem};
use contracts::system::permissions::{default_permission_map, PermissionMap};
use contracts::system::roles::Role;

use super::store::{KeyValueStorage, PageReloader, PermissionError, PermissionStore};

/// Committed permissions, read by the sidebar and the route guard
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionGate {
    map: PermissionMap,
    menu: Vec<MenuItem>,
}

impl PermissionGate {
    pub fn new(map: PermissionMap, menu: Vec<MenuItem>) -> Self {
        Self { map, menu }
    }

    pub fn map(&self) -> &PermissionMap {
        &self.map
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    /// Whether `role` may enter `path`.
    ///
    /// The owning top-level section must be granted, and so must the
    /// sub-section when the path belongs to one. Paths the menu does not
    /// know are left to other guards and allowed here.
    pub fn is_path_allowed(&self, path: &str, role: Role) -> bool {
        let Some(section) = resolve_path(&self.menu, path) else {
            return true;
        };
        self.map.get(role, &section.parent_key)
            && section
                .child_key
                .as_deref()
                .map_or(true, |child| self.map.get(role, child))
    }

    /// A child section is only visible while its parent is
    pub fn is_section_visible(&self, role: Role, key: &str) -> bool {
        match split_section_key(key) {
            (parent, Some(_)) => self.map.get(role, parent) && self.map.get(role, key),
            (parent, None) => self.map.get(role, parent),
        }
    }

    /// The menu tree pruned to what `role` may see
    pub fn visible_menu(&self, role: Role) -> Vec<MenuItem> {
        self.menu
            .iter()
            .filter(|item| self.map.get(role, item.title))
            .map(|item| MenuItem {
                children: item
                    .children
                    .iter()
                    .filter(|child| self.map.get(role, &section_key(item.title, Some(child.title))))
                    .cloned()
                    .collect(),
                ..item.clone()
            })
            .collect()
    }
}

/// Section filter of the settings page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SettingsCategory {
    #[default]
    All,
    /// One top-level section and its children, by title
    Section(String),
}

/// A checkbox row of the settings page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub key: String,
    pub title: String,
    pub parent_key: Option<String>,
}

/// Unsaved working copy of the permission map.
///
/// Edits stay in memory until `save`, which commits the whole map at once.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionEditor {
    menu: Vec<MenuItem>,
    committed: PermissionMap,
    working: PermissionMap,
}

impl PermissionEditor {
    pub fn new(menu: Vec<MenuItem>, committed: PermissionMap) -> Self {
        Self {
            menu,
            working: committed.clone(),
            committed,
        }
    }

    pub fn working(&self) -> &PermissionMap {
        &self.working
    }

    pub fn is_checked(&self, role: Role, key: &str) -> bool {
        self.working.get(role, key)
    }

    pub fn is_dirty(&self) -> bool {
        self.working != self.committed
    }

    /// Sets one key.
    ///
    /// Granting a child also grants its parent; granting a parent grants
    /// all of its children. Revoking a parent leaves the children's stored
    /// values alone: they stay dormant until the parent is granted again.
    pub fn toggle(&mut self, role: Role, key: &str, checked: bool, parent_key: Option<&str>) {
        self.working.set(role, key, checked);
        if !checked {
            return;
        }

        let parent = parent_key.or_else(|| match split_section_key(key) {
            (parent, Some(_)) => Some(parent),
            (_, None) => None,
        });
        match parent {
            Some(parent) => self.working.set(role, parent, true),
            None => {
                let children = self
                    .menu
                    .iter()
                    .find(|item| item.title == key)
                    .map(MenuItem::child_keys)
                    .unwrap_or_default();
                for child in children {
                    self.working.set(role, &child, true);
                }
            }
        }
    }

    /// Checkbox rows of a category, each parent followed by its children
    pub fn category_keys(&self, category: &SettingsCategory) -> Vec<SectionEntry> {
        self.menu
            .iter()
            .filter(|item| match category {
                SettingsCategory::All => true,
                SettingsCategory::Section(title) => item.title == title,
            })
            .flat_map(|item| {
                let parent = SectionEntry {
                    key: item.title.to_string(),
                    title: item.title.to_string(),
                    parent_key: None,
                };
                let children = item.children.iter().map(move |child| SectionEntry {
                    key: section_key(item.title, Some(child.title)),
                    title: child.title.to_string(),
                    parent_key: Some(item.title.to_string()),
                });
                std::iter::once(parent).chain(children)
            })
            .collect()
    }

    /// Applies `toggle` to every key of the category
    pub fn select_all(&mut self, role: Role, category: &SettingsCategory, checked: bool) {
        for entry in self.category_keys(category) {
            self.toggle(role, &entry.key, checked, entry.parent_key.as_deref());
        }
    }

    pub fn select_none(&mut self, role: Role, category: &SettingsCategory) {
        self.select_all(role, category, false);
    }

    /// Drops unsaved edits
    pub fn discard(&mut self) {
        self.working = self.committed.clone();
    }

    /// Commits the working copy; the store reloads the page afterwards
    pub fn save<S: KeyValueStorage, R: PageReloader>(
        &mut self,
        store: &PermissionStore<S, R>,
    ) -> Result<(), PermissionError> {
        store.save(&self.working)?;
        self.committed = self.working.clone();
        Ok(())
    }

    /// Removes the stored map; the defaults apply after the reload
    pub fn reset<S: KeyValueStorage, R: PageReloader>(
        &mut self,
        store: &PermissionStore<S, R>,
    ) -> Result<(), PermissionError> {
        store.reset()?;
        self.committed = default_permission_map(&self.menu);
        self.working = self.committed.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::permissions::store::{CountingReloader, MemoryStorage};
    use contracts::system::menu::admin_menu;

    fn default_gate() -> PermissionGate {
        let menu = admin_menu();
        PermissionGate::new(default_permission_map(&menu), menu)
    }

    fn store() -> PermissionStore<MemoryStorage, CountingReloader> {
        PermissionStore::new(MemoryStorage::default(), CountingReloader::default(), "menuPermissions")
    }

    #[test]
    fn test_defaults_admin_allowed_driver_denied() {
        let gate = default_gate();
        assert!(gate.is_path_allowed("/admin/bookings/pending", Role::Admin));
        assert!(!gate.is_path_allowed("/admin/bookings/pending", Role::Driver));
        assert!(gate.is_path_allowed("/admin/reports/revenue", Role::Accountant));
        assert!(!gate.is_path_allowed("/admin/drivers", Role::CallCenterAgent));
    }

    #[test]
    fn test_unknown_paths_are_left_to_other_guards() {
        let gate = default_gate();
        assert!(gate.is_path_allowed("/unauthorized", Role::Driver));
        assert!(gate.is_path_allowed("/driver/trips", Role::Driver));
    }

    #[test]
    fn test_revoking_parent_does_not_cascade() {
        let menu = admin_menu();
        let mut editor = PermissionEditor::new(menu.clone(), default_permission_map(&menu));

        editor.toggle(Role::Admin, "Bookings", false, None);

        assert!(editor.is_checked(Role::Admin, "Bookings:Pending"));
        let gate = PermissionGate::new(editor.working().clone(), menu);
        assert!(!gate.is_path_allowed("/admin/bookings/pending", Role::Admin));
        assert!(!gate.is_section_visible(Role::Admin, "Bookings:Pending"));
    }

    #[test]
    fn test_granting_child_grants_parent() {
        let menu = admin_menu();
        let mut editor = PermissionEditor::new(menu.clone(), default_permission_map(&menu));
        assert!(!editor.is_checked(Role::Driver, "Drivers"));

        editor.toggle(Role::Driver, "Drivers:Driver Documents", true, Some("Drivers"));

        assert!(editor.is_checked(Role::Driver, "Drivers"));
        assert!(!editor.is_checked(Role::Driver, "Drivers:All Drivers"));
        let gate = PermissionGate::new(editor.working().clone(), menu);
        assert!(gate.is_path_allowed("/admin/drivers/documents", Role::Driver));
        assert!(!gate.is_path_allowed("/admin/drivers", Role::Driver));
    }

    #[test]
    fn test_parent_inferred_from_composite_key() {
        let menu = admin_menu();
        let mut editor = PermissionEditor::new(menu, PermissionMap::new());
        editor.toggle(Role::Corporate, "Corporate Portal:Corporate Users", true, None);
        assert!(editor.is_checked(Role::Corporate, "Corporate Portal"));
        assert!(!editor.is_checked(Role::Corporate, "Corporate Portal:Corporate Accounts"));
    }

    #[test]
    fn test_granting_parent_cascades() {
        let menu = admin_menu();
        let mut editor = PermissionEditor::new(menu, PermissionMap::new());
        editor.toggle(Role::Driver, "Vehicles", true, None);
        for key in ["Vehicles:All Vehicles", "Vehicles:Add Vehicle", "Vehicles:Vehicle Types"] {
            assert!(editor.is_checked(Role::Driver, key), "{} should be granted", key);
        }
    }

    #[test]
    fn test_select_all_and_none_within_category() {
        let menu = admin_menu();
        let mut editor = PermissionEditor::new(menu, PermissionMap::new());
        let reports = SettingsCategory::Section("Reports".into());

        editor.select_all(Role::Corporate, &reports, true);
        assert!(editor.is_checked(Role::Corporate, "Reports"));
        assert!(editor.is_checked(Role::Corporate, "Reports:Revenue Reports"));
        assert!(!editor.is_checked(Role::Corporate, "Home"));

        editor.select_none(Role::Corporate, &reports);
        assert!(!editor.is_checked(Role::Corporate, "Reports"));
        assert!(!editor.is_checked(Role::Corporate, "Reports:Booking Reports"));
    }

    #[test]
    fn test_category_keys() {
        let editor = PermissionEditor::new(admin_menu(), PermissionMap::new());
        let keys: Vec<String> = editor
            .category_keys(&SettingsCategory::Section("TUK Booking".into()))
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(
            keys,
            vec!["TUK Booking", "TUK Booking:TUK Bookings", "TUK Booking:New TUK Booking"]
        );
        let all = editor.category_keys(&SettingsCategory::All);
        assert_eq!(all.len(), MenuItem::all_section_keys(editor.menu.as_slice()).len());
    }

    #[test]
    fn test_save_commits_and_reloads() {
        let store = store();
        let menu = admin_menu();
        let mut editor = PermissionEditor::new(menu.clone(), store.effective_map(&menu));

        editor.toggle(Role::Driver, "Home", true, None);
        assert!(editor.is_dirty());
        editor.save(&store).unwrap();

        assert!(!editor.is_dirty());
        assert_eq!(store.reloader().count(), 1);
        assert!(store.load().unwrap().get(Role::Driver, "Home"));
    }

    #[test]
    fn test_reset_restores_defaults_and_reloads() {
        let store = store();
        let menu = admin_menu();
        let mut editor = PermissionEditor::new(menu.clone(), PermissionMap::new());
        editor.toggle(Role::Admin, "Home", true, None);
        editor.save(&store).unwrap();

        editor.reset(&store).unwrap();

        assert_eq!(store.reloader().count(), 2);
        assert!(store.load().is_none());
        assert_eq!(editor.working(), &default_permission_map(&menu));
    }

    #[test]
    fn test_visible_menu_prunes_children() {
        let menu = admin_menu();
        let mut map = PermissionMap::new();
        map.set(Role::Corporate, "Corporate Portal", true);
        map.set(Role::Corporate, "Corporate Portal:Corporate Users", true);
        map.set(Role::Corporate, "Reports:Booking Reports", true);
        let gate = PermissionGate::new(map, menu);

        let visible = gate.visible_menu(Role::Corporate);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Corporate Portal");
        assert_eq!(visible[0].children.len(), 1);
        assert_eq!(visible[0].children[0].title, "Corporate Users");
    }
}
