//! Handler functions for the authentication endpoints.
//!
//! Each handler hands the decoded request to `AuthService` and returns its
//! response as JSON. Only infrastructure failures become non-200 replies.

use crate::api::common::service_error_to_http;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::Json as ResponseJson,
};
use std::sync::Arc;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<ResponseJson<RegisterResponse>, (StatusCode, String)> {
    auth_service
        .register(payload)
        .await
        .map(ResponseJson)
        .map_err(service_error_to_http)
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<LoginRequest>,
) -> Result<ResponseJson<LoginResponse>, (StatusCode, String)> {
    auth_service
        .login(payload)
        .await
        .map(ResponseJson)
        .map_err(service_error_to_http)
}

/// Handle token validation request
#[axum::debug_handler]
pub async fn validate(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(payload): Json<ValidateRequest>,
) -> Result<ResponseJson<ValidateResponse>, (StatusCode, String)> {
    auth_service
        .validate(payload)
        .await
        .map(ResponseJson)
        .map_err(service_error_to_http)
}
