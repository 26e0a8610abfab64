//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. They differ from the request/response types in
//! `auth::models`, which never carry a password hash.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered account as stored in the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}
