//! Static navigation tree of the admin console.
//!
//! The tree drives the sidebar and is also the vocabulary of section keys
//! used by the permission map: a top-level entry is keyed by its title, a
//! sub-entry by `"Parent:Child"`.

/// One entry of the navigation tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub title: &'static str,
    pub icon: &'static str,
    /// Route of a leaf entry. Parents with children have no route of their own.
    pub path: Option<&'static str>,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn leaf(title: &'static str, icon: &'static str, path: &'static str) -> Self {
        Self {
            title,
            icon,
            path: Some(path),
            children: Vec::new(),
        }
    }

    pub fn group(title: &'static str, icon: &'static str, children: Vec<MenuItem>) -> Self {
        Self {
            title,
            icon,
            path: None,
            children,
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Section keys of this entry's children
    pub fn child_keys(&self) -> Vec<String> {
        self.children
            .iter()
            .map(|child| section_key(self.title, Some(child.title)))
            .collect()
    }

    /// Every valid section key of a menu, parents first then their children
    pub fn all_section_keys(menu: &[MenuItem]) -> Vec<String> {
        let mut keys = Vec::new();
        for item in menu {
            keys.push(item.title.to_string());
            keys.extend(item.child_keys());
        }
        keys
    }
}

/// Builds a permission-map key for a section or sub-section
pub fn section_key(parent: &str, child: Option<&str>) -> String {
    match child {
        Some(child) => format!("{}:{}", parent, child),
        None => parent.to_string(),
    }
}

/// Splits a section key into parent and optional child title
pub fn split_section_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once(':') {
        Some((parent, child)) => (parent, Some(child)),
        None => (key, None),
    }
}

/// Menu entry that owns an application path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRef {
    pub parent_key: String,
    pub child_key: Option<String>,
}

/// Finds the menu entry owning `path`.
///
/// The longest route that equals `path` or is a prefix of it on a `/`
/// boundary wins, so `/admin/corporate/users/7` resolves to the
/// "Corporate Users" entry rather than "Corporate Accounts".
pub fn resolve_path(menu: &[MenuItem], path: &str) -> Option<SectionRef> {
    let path = normalize_path(path);
    let mut best: Option<(usize, SectionRef)> = None;

    let mut consider = |route: &str, section: SectionRef| {
        if !path_matches(path, route) {
            return;
        }
        let better = match &best {
            Some((len, _)) => route.len() > *len,
            None => true,
        };
        if better {
            best = Some((route.len(), section));
        }
    };

    for item in menu {
        if let Some(route) = item.path {
            consider(
                route,
                SectionRef {
                    parent_key: item.title.to_string(),
                    child_key: None,
                },
            );
        }
        for child in &item.children {
            if let Some(route) = child.path {
                consider(
                    route,
                    SectionRef {
                        parent_key: item.title.to_string(),
                        child_key: Some(section_key(item.title, Some(child.title))),
                    },
                );
            }
        }
    }

    best.map(|(_, section)| section)
}

fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

fn path_matches(path: &str, route: &str) -> bool {
    path == route
        || (path.starts_with(route) && path.as_bytes().get(route.len()) == Some(&b'/'))
}

/// The taxi-fleet admin navigation tree
pub fn admin_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::leaf("Home", "home", "/admin/dashboard"),
        MenuItem::group(
            "Bookings",
            "bookings",
            vec![
                MenuItem::leaf("All Bookings", "list", "/admin/bookings"),
                MenuItem::leaf("Pending", "clock", "/admin/bookings/pending"),
                MenuItem::leaf("Completed", "check", "/admin/bookings/completed"),
                MenuItem::leaf("Cancelled", "x", "/admin/bookings/cancelled"),
                MenuItem::leaf("New Booking", "plus", "/admin/bookings/new"),
            ],
        ),
        MenuItem::group(
            "TUK Booking",
            "tuk",
            vec![
                MenuItem::leaf("TUK Bookings", "list", "/admin/tuk-bookings"),
                MenuItem::leaf("New TUK Booking", "plus", "/admin/tuk-bookings/new"),
            ],
        ),
        MenuItem::group(
            "Drivers",
            "drivers",
            vec![
                MenuItem::leaf("All Drivers", "list", "/admin/drivers"),
                MenuItem::leaf("Add Driver", "plus", "/admin/drivers/new"),
                MenuItem::leaf("Driver Documents", "file", "/admin/drivers/documents"),
            ],
        ),
        MenuItem::group(
            "Vehicles",
            "vehicles",
            vec![
                MenuItem::leaf("All Vehicles", "list", "/admin/vehicles"),
                MenuItem::leaf("Add Vehicle", "plus", "/admin/vehicles/new"),
                MenuItem::leaf("Vehicle Types", "tag", "/admin/vehicles/types"),
            ],
        ),
        MenuItem::group(
            "Manage Fares",
            "fares",
            vec![
                MenuItem::leaf("Fare Schemes", "list", "/admin/fares"),
                MenuItem::leaf("Add Fare Scheme", "plus", "/admin/fares/new"),
            ],
        ),
        MenuItem::group(
            "Promo Codes",
            "promo",
            vec![
                MenuItem::leaf("All Promo Codes", "list", "/admin/promo-codes"),
                MenuItem::leaf("Add Promo Code", "plus", "/admin/promo-codes/new"),
            ],
        ),
        MenuItem::group(
            "Corporate Portal",
            "corporate",
            vec![
                MenuItem::leaf("Corporate Accounts", "list", "/admin/corporate"),
                MenuItem::leaf("Corporate Users", "users", "/admin/corporate/users"),
            ],
        ),
        MenuItem::group(
            "Reports",
            "reports",
            vec![
                MenuItem::leaf("Booking Reports", "chart", "/admin/reports/bookings"),
                MenuItem::leaf("Revenue Reports", "chart", "/admin/reports/revenue"),
            ],
        ),
        MenuItem::group(
            "Settings",
            "settings",
            vec![
                MenuItem::leaf("Permissions", "shield", "/admin/settings/permissions"),
                MenuItem::leaf("Users", "users", "/admin/settings/users"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_child_path() {
        let menu = admin_menu();
        let section = resolve_path(&menu, "/admin/bookings/pending").unwrap();
        assert_eq!(section.parent_key, "Bookings");
        assert_eq!(section.child_key.as_deref(), Some("Bookings:Pending"));
    }

    #[test]
    fn test_resolve_prefers_longest_route() {
        let menu = admin_menu();
        let section = resolve_path(&menu, "/admin/corporate/users/42").unwrap();
        assert_eq!(section.child_key.as_deref(), Some("Corporate Portal:Corporate Users"));

        let section = resolve_path(&menu, "/admin/corporate/17").unwrap();
        assert_eq!(section.child_key.as_deref(), Some("Corporate Portal:Corporate Accounts"));
    }

    #[test]
    fn test_resolve_respects_segment_boundary() {
        let menu = admin_menu();
        // "/admin/bookingsarchive" must not match "/admin/bookings"
        assert!(resolve_path(&menu, "/admin/bookingsarchive").is_none());
        assert_eq!(
            resolve_path(&menu, "/admin/dashboard/").unwrap().parent_key,
            "Home"
        );
        assert_eq!(
            resolve_path(&menu, "/admin/bookings?page=2").unwrap().child_key.as_deref(),
            Some("Bookings:All Bookings")
        );
    }

    #[test]
    fn test_unknown_path_is_unresolved() {
        assert!(resolve_path(&admin_menu(), "/login").is_none());
    }

    #[test]
    fn test_section_keys() {
        let menu = admin_menu();
        let keys = MenuItem::all_section_keys(&menu);
        assert!(keys.contains(&"Home".to_string()));
        assert!(keys.contains(&"TUK Booking:New TUK Booking".to_string()));
        assert_eq!(split_section_key("Bookings:Pending"), ("Bookings", Some("Pending")));
        assert_eq!(split_section_key("Reports"), ("Reports", None));
    }
}
