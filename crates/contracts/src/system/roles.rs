use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles known to the admin console.
///
/// The serialized names are the keys of the stored permission map, so they
/// must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "accountant")]
    Accountant,
    #[serde(rename = "callCenterAgent")]
    CallCenterAgent,
    #[serde(rename = "corporate")]
    Corporate,
    #[serde(rename = "driver")]
    Driver,
}

impl Role {
    pub fn all() -> [Role; 5] {
        [
            Role::Admin,
            Role::Accountant,
            Role::CallCenterAgent,
            Role::Corporate,
            Role::Driver,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Accountant => "accountant",
            Role::CallCenterAgent => "callCenterAgent",
            Role::Corporate => "corporate",
            Role::Driver => "driver",
        }
    }

    /// Human readable name for tabs and badges
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Accountant => "Accountant",
            Role::CallCenterAgent => "Call Center Agent",
            Role::Corporate => "Corporate",
            Role::Driver => "Driver",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::all()
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown role: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::all() {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_as_storage_key() {
        let json = serde_json::to_string(&Role::CallCenterAgent).unwrap();
        assert_eq!(json, "\"callCenterAgent\"");
    }
}
