//! Request and response payloads for the three auth calls.
//!
//! Every response carries an application-level `status` mirroring HTTP
//! semantics. Failures such as a duplicate email or a bad token are reported
//! here, inside a successful call, with an `error` message.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::password::MAX_PASSWORD_BYTES;

/// Message returned for every failed credential check.
pub const INVALID_LOGIN: &str = "Invalid login";

/// Message returned when registering a taken email.
pub const EMAIL_EXISTS: &str = "Email already exists";

/// Registration request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "First name must be between 1-255 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Last name must be between 1-255 characters"
    ))]
    pub last_name: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
}

fn validate_password_bytes(password: &str) -> Result<(), validator::ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(validator::ValidationError::new("password_too_long")
            .with_message("Password must be at most 72 bytes".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegisterResponse {
    pub fn created() -> Self {
        Self {
            status: StatusCode::CREATED.as_u16(),
            error: None,
        }
    }

    pub fn failed(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: Some(error.into()),
        }
    }
}

/// Login request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn ok(token: String) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            error: None,
            token: Some(token),
        }
    }

    pub fn invalid_login() -> Self {
        Self {
            status: StatusCode::NOT_FOUND.as_u16(),
            error: Some(INVALID_LOGIN.to_string()),
            token: None,
        }
    }
}

/// Token validation request payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl ValidateResponse {
    pub fn ok(user_id: i64) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            error: None,
            user_id: Some(user_id),
        }
    }

    pub fn bad_token(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST.as_u16(),
            error: Some(error.into()),
            user_id: None,
        }
    }

    pub fn invalid_login() -> Self {
        Self {
            status: StatusCode::NOT_FOUND.as_u16(),
            error: Some(INVALID_LOGIN.to_string()),
            user_id: None,
        }
    }
}
