use contracts::domain::a002_driver::Driver;
use leptos::prelude::*;

use crate::shared::data_table::{to_row, Row};

#[derive(Clone, Debug, Default)]
pub struct DriverListState {
    pub drivers: Vec<Driver>,
    /// Text of the header search box, fed to the table
    pub search: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub fn create_state() -> RwSignal<DriverListState> {
    RwSignal::new(DriverListState::default())
}

pub fn driver_row(driver: &Driver) -> Option<Row> {
    let mut row = to_row(driver)?;
    row.insert(
        "joinedAt".to_string(),
        driver.joined_at.format("%Y-%m-%d").to_string().into(),
    );
    Some(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contracts::domain::a002_driver::{DriverId, DriverStatus};

    #[test]
    fn test_driver_row_shape() {
        let driver = Driver {
            id: DriverId::new_v4(),
            full_name: "Kamal Perera".to_string(),
            phone: "+94 71 123 4567".to_string(),
            license_number: "B1234567".to_string(),
            status: DriverStatus::Suspended,
            vehicle_plate: Some("WP CAB-1234".to_string()),
            city: "Kandy".to_string(),
            rating: 4.7,
            joined_at: chrono::Utc.with_ymd_and_hms(2023, 11, 2, 10, 0, 0).unwrap(),
        };

        let row = driver_row(&driver).unwrap();
        assert_eq!(row["fullName"], "Kamal Perera");
        assert_eq!(row["status"], "SUSPENDED");
        assert_eq!(row["vehiclePlate"], "WP CAB-1234");
        assert_eq!(row["joinedAt"], "2023-11-02");
        assert_eq!(row["rating"].as_f64(), Some(4.7));
    }
}
