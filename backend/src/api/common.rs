//! Shared response envelope and error conversion for HTTP handlers.
//!
//! The auth calls return their own payloads with an embedded status. This
//! envelope covers everything else: service metadata endpoints and the
//! transport-level failures raised when a `ServiceError` escapes a handler.
//!
//! # Error Handling Flow
//! 1. Service layer returns `ServiceError` for infrastructure failures
//! 2. `service_error_to_http` converts it to a status code and JSON body
//! 3. Internal details are logged here and never sent to the client

use crate::errors::ServiceError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for non-auth endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Response timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error type identifier
    pub error_type: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>, error_type: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                error_type: error_type.into(),
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, String) {
    let (status, error_type, message) = match error {
        ServiceError::AlreadyExists { entity, .. } => (
            StatusCode::CONFLICT,
            "already_exists",
            format!("{} already exists", entity),
        ),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            )
        }
    };

    let error_response = ApiResponse::<()>::error(message, error_type);
    (
        status,
        serde_json::to_string(&error_response).unwrap_or_default(),
    )
}

/// Flattens validator errors into `field: message` pairs, ordered by field name.
pub fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error.message.as_ref().unwrap_or(&"Invalid value".into())
                )
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(email(message = "Must be a valid email"))]
        email: String,
    }

    #[test]
    fn test_validation_errors_are_sorted() {
        let sample = Sample {
            name: String::new(),
            email: "nope".to_string(),
        };
        let message = format_validation_errors(&sample.validate().unwrap_err());
        assert_eq!(message, "email: Must be a valid email, name: Name is required");
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let (status, body) =
            service_error_to_http(ServiceError::internal_error("secret connection string"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("secret connection string"));

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["error_type"], "internal_error");
    }

    #[test]
    fn test_already_exists_maps_to_conflict() {
        let (status, _) = service_error_to_http(ServiceError::already_exists("User", "a@x.com"));
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
