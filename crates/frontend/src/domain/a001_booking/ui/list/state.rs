use contracts::domain::a001_booking::{Booking, BookingStatus};
use leptos::prelude::*;

use crate::shared::data_table::{to_row, Row};

#[derive(Clone, Debug, Default)]
pub struct BookingListState {
    pub bookings: Vec<Booking>,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub fn create_state() -> RwSignal<BookingListState> {
    RwSignal::new(BookingListState::default())
}

/// Flat table row of a booking, pickup time formatted for display and
/// still sortable as text
pub fn booking_row(booking: &Booking) -> Option<Row> {
    let mut row = to_row(booking)?;
    row.insert(
        "pickupAt".to_string(),
        booking.pickup_at.format("%Y-%m-%d %H:%M").to_string().into(),
    );
    Some(row)
}

/// Rows of a status-specific sub-page; every row when `status` is `None`
pub fn booking_rows(bookings: &[Booking], status: Option<BookingStatus>) -> Vec<Row> {
    bookings
        .iter()
        .filter(|b| status.map_or(true, |s| b.status == s))
        .filter_map(booking_row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use contracts::domain::a001_booking::BookingId;

    fn booking(number: &str, status: BookingStatus) -> Booking {
        Booking {
            id: BookingId::new_v4(),
            booking_number: number.to_string(),
            passenger_name: "Ann Lee".to_string(),
            passenger_phone: "+94 77 000 0000".to_string(),
            pickup_address: "Galle Road 12".to_string(),
            dropoff_address: "Airport".to_string(),
            pickup_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap(),
            status,
            vehicle_type: "TUK".to_string(),
            city: "Colombo".to_string(),
            fare: 1250.0,
            driver_name: None,
        }
    }

    #[test]
    fn test_booking_row_shape() {
        let b = booking("B-1", BookingStatus::Pending);
        let row = booking_row(&b).unwrap();
        assert_eq!(row["id"], b.id.as_string());
        assert_eq!(row["bookingNumber"], "B-1");
        assert_eq!(row["status"], "PENDING");
        assert_eq!(row["pickupAt"], "2024-05-01 08:30");
        assert!(row["driverName"].is_null());
    }

    #[test]
    fn test_status_preset() {
        let bookings = vec![
            booking("B-1", BookingStatus::Pending),
            booking("B-2", BookingStatus::Completed),
            booking("B-3", BookingStatus::Pending),
        ];
        assert_eq!(booking_rows(&bookings, None).len(), 3);
        let pending = booking_rows(&bookings, Some(BookingStatus::Pending));
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|r| r["status"] == "PENDING"));
    }
}
