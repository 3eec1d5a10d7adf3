use contracts::domain::a001_booking::Booking;
use contracts::shared::bulk::{BulkChangeRequest, BulkDeleteRequest, BulkResult};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, auth_header, post_bulk};

/// Fetch all bookings
pub async fn fetch_bookings() -> Result<Vec<Booking>, String> {
    let auth_header = auth_header()?;

    let response = Request::get(&api_url("/api/bookings"))
        .header("Authorization", &auth_header)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch bookings: {}", response.status()));
    }

    response
        .json::<Vec<Booking>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn delete_bookings(ids: Vec<String>) -> Result<BulkResult, String> {
    post_bulk("/api/bookings/bulk-delete", &BulkDeleteRequest { ids }).await
}

/// Sets `field` to `value` on every listed booking
pub async fn change_bookings(ids: Vec<String>, field: String, value: String) -> Result<BulkResult, String> {
    post_bulk("/api/bookings/bulk-update", &BulkChangeRequest { ids, field, value }).await
}
