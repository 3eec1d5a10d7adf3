use serde::{Deserialize, Serialize};

use super::roles::Role;

/// Signed-in user as returned by the backend session endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub role: Role,
}
