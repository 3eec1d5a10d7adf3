use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub Uuid);

impl DriverId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Active,
    Inactive,
    Suspended,
}

impl DriverStatus {
    pub fn all() -> [DriverStatus; 3] {
        [DriverStatus::Active, DriverStatus::Inactive, DriverStatus::Suspended]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Active => "ACTIVE",
            DriverStatus::Inactive => "INACTIVE",
            DriverStatus::Suspended => "SUSPENDED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DriverStatus::Active => "Active",
            DriverStatus::Inactive => "Inactive",
            DriverStatus::Suspended => "Suspended",
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub phone: String,
    #[serde(rename = "licenseNumber")]
    pub license_number: String,
    pub status: DriverStatus,
    #[serde(rename = "vehiclePlate")]
    pub vehicle_plate: Option<String>,
    pub city: String,
    pub rating: f64,
    #[serde(rename = "joinedAt")]
    pub joined_at: DateTime<Utc>,
}
