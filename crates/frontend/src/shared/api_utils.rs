//! API utilities for talking to the gateway's management endpoints
//!
//! Resolves the base URL, builds authenticated requests and maps transport
//! failures into [`ApiError`].

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// localStorage key that overrides the API base URL (e.g. "http://localhost:4000")
pub const API_BASE_OVERRIDE_KEY: &str = "proxy_base_url";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Failed to send request: {0}")]
    Network(String),

    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

/// Get the base URL for API requests
///
/// Uses the `proxy_base_url` override from localStorage when present,
/// otherwise the origin the console was served from.
///
/// # Returns
/// - API base URL like "https://gateway.example.com" (no trailing slash)
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };

    let override_base = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|storage| storage.get_item(API_BASE_OVERRIDE_KEY).ok().flatten())
        .map(|raw| normalize_base(&raw))
        .filter(|base| !base.is_empty());

    match override_base {
        Some(base) => base,
        None => normalize_base(&window.location().origin().unwrap_or_default()),
    }
}

/// Trim whitespace and trailing slashes so paths can be appended directly
pub fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/customer/list");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

pub fn bearer(access_token: &str) -> String {
    format!("Bearer {}", access_token)
}

/// Map a non-2xx status to an error; 401 means the session is gone
pub fn check_status(status: u16) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::NotAuthenticated),
        other => Err(ApiError::Status(other)),
    }
}

/// GET `path` with a bearer token and decode the JSON body
pub async fn get_json<T>(path: &str, access_token: &str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let response = Request::get(&api_url(path))
        .header("Authorization", &bearer(access_token))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check_status(response.status())?;

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
