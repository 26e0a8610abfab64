//! Central module for assembling the HTTP application.
//!
//! Auth routes live under `/auth`; service metadata is served at the root.

pub mod common;
pub mod system;

use crate::auth::{routes::auth_router, service::AuthService};
use axum::{Extension, Router};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Builds the full router with its shared dependencies attached.
pub fn app_router(auth_service: Arc<AuthService>, pool: SqlitePool) -> Router {
    Router::new()
        .merge(system::routes::system_router())
        .nest("/auth", auth_router())
        .layer(Extension(auth_service))
        .layer(Extension(pool))
}
