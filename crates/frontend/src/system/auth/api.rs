//! Calls to the console auth service

use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, check_status, get_json, ApiError};

async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: serde::Serialize,
    T: for<'de> serde::Deserialize<'de>,
{
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| ApiError::Serialize(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check_status(response.status())?;

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, ApiError> {
    post_json("/auth/login", &LoginRequest { username, password }).await
}

/// Exchange a refresh token for a new access token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, ApiError> {
    post_json("/auth/refresh", &RefreshRequest { refresh_token }).await
}

/// Revoke the refresh token
pub async fn logout(refresh_token: String) -> Result<(), ApiError> {
    let response = Request::post(&api_url("/auth/logout"))
        .json(&RefreshRequest { refresh_token })
        .map_err(|e| ApiError::Serialize(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    check_status(response.status())?;

    Ok(())
}

/// Current user with the resolved role
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, ApiError> {
    get_json("/auth/me", access_token).await
}
