//! Service metadata endpoints: banner and health check.

pub mod handlers;
pub mod routes;
