//! Authentication module: user registration, login and token validation.
//!
//! This module provides the public interface for the three auth calls: the
//! service holding the business rules, its request/response models, and the
//! HTTP handlers and routes exposing them.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
