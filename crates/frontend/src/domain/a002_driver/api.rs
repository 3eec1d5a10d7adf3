use contracts::domain::a002_driver::Driver;
use contracts::shared::bulk::{BulkChangeRequest, BulkDeleteRequest, BulkResult};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, auth_header, post_bulk};

/// Fetch all drivers
pub async fn fetch_drivers() -> Result<Vec<Driver>, String> {
    let auth_header = auth_header()?;

    let response = Request::get(&api_url("/api/drivers"))
        .header("Authorization", &auth_header)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch drivers: {}", response.status()));
    }

    response
        .json::<Vec<Driver>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn delete_drivers(ids: Vec<String>) -> Result<BulkResult, String> {
    post_bulk("/api/drivers/bulk-delete", &BulkDeleteRequest { ids }).await
}

pub async fn change_drivers(ids: Vec<String>, field: String, value: String) -> Result<BulkResult, String> {
    post_bulk("/api/drivers/bulk-update", &BulkChangeRequest { ids, field, value }).await
}
