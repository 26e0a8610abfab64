//! Routes for service metadata.

use super::handlers::{health_handler, root_handler};
use axum::{Router, routing::get};

pub fn system_router() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}
