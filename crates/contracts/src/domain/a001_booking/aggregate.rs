use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Unique booking identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub Uuid);

impl BookingId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_string(&self) -> String {
        self.0.to_string()
    }

    pub fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(BookingId)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn all() -> [BookingStatus; 5] {
        [
            BookingStatus::Pending,
            BookingStatus::Assigned,
            BookingStatus::InProgress,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ]
    }

    /// Wire value, identical to the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Assigned => "ASSIGNED",
            BookingStatus::InProgress => "IN_PROGRESS",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Assigned => "Assigned",
            BookingStatus::InProgress => "In progress",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// A passenger trip request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    #[serde(rename = "bookingNumber")]
    pub booking_number: String,
    #[serde(rename = "passengerName")]
    pub passenger_name: String,
    #[serde(rename = "passengerPhone")]
    pub passenger_phone: String,
    #[serde(rename = "pickupAddress")]
    pub pickup_address: String,
    #[serde(rename = "dropoffAddress")]
    pub dropoff_address: String,
    #[serde(rename = "pickupAt")]
    pub pickup_at: DateTime<Utc>,
    pub status: BookingStatus,
    #[serde(rename = "vehicleType")]
    pub vehicle_type: String,
    pub city: String,
    pub fare: f64,
    #[serde(rename = "driverName")]
    pub driver_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_value_matches_serde() {
        for status in BookingStatus::all() {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_booking_id_parse() {
        let id = BookingId::new_v4();
        assert_eq!(BookingId::from_string(&id.as_string()).unwrap(), id);
        assert!(BookingId::from_string("not-a-uuid").is_err());
    }
}
