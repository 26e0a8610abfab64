//! Defines the HTTP routes for the authentication calls.
//!
//! Each call is a unary JSON `POST`. The router expects an
//! `Extension<Arc<AuthService>>` layer to be supplied by the caller.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/validate", post(validate))
}
