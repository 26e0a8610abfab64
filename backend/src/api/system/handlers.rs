//! Handlers for the service banner and the health check.

use crate::api::common::ApiResponse;
use crate::database::Database;
use axum::{extract::Extension, http::StatusCode, response::Json};
use serde_json::{Value, json};
use sqlx::SqlitePool;

pub async fn root_handler() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(
        json!({
            "service": "hive-auth",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the hive-auth API",
    ))
}

/// Reports liveness, including whether the user store answers.
pub async fn health_handler(
    Extension(pool): Extension<SqlitePool>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    match Database::ping(&pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(json!({ "database": "up" }), "healthy")),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    success: false,
                    ..ApiResponse::success(json!({ "database": "down" }), "unhealthy")
                }),
            )
        }
    }
}
