//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and auth headers.

use crate::config::AppConfig;
use crate::system::auth::storage;

/// Get the base URL for API requests
///
/// Built from the current window location and the backend port from
/// [`AppConfig`], e.g. "http://localhost:3000". Empty when no window is
/// available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, AppConfig::get().api.port)
}

/// Build a full API URL from a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// `Authorization` header value for the stored session
pub fn auth_header() -> Result<String, String> {
    storage::get_access_token()
        .map(|token| format!("Bearer {}", token))
        .ok_or_else(|| "Not authenticated".to_string())
}

/// POSTs a bulk request and returns the backend's tally
pub async fn post_bulk<T: serde::Serialize>(
    path: &str,
    body: &T,
) -> Result<contracts::shared::bulk::BulkResult, String> {
    let auth_header = auth_header()?;

    let response = gloo_net::http::Request::post(&api_url(path))
        .header("Authorization", &auth_header)
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Request to {} failed: {}", path, response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
