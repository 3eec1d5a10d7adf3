//! Role-based visibility of menu sections and routes.

pub mod context;
pub mod gate;
pub mod guard;
pub mod store;
pub mod ui;

pub use context::{use_permissions, PermissionContext, PermissionProvider};
pub use gate::{PermissionEditor, PermissionGate, SettingsCategory};
pub use guard::{RequirePermission, UNAUTHORIZED_PATH};
pub use store::{PermissionError, PermissionStore};
