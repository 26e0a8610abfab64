//! Database repository for user records.
//!
//! The `UserStore` trait is the seam the auth service depends on; `UserRepository`
//! is the SQLite implementation used in production.

use crate::database::models::{CreateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

/// Persistence operations the auth flows need on user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns the user registered under `email`, if any.
    async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>>;

    /// Inserts a new user.
    ///
    /// Fails with `ServiceError::AlreadyExists` when the email is taken, even if
    /// a preceding `find_by_email` saw no match.
    async fn create_user(&self, user: CreateUser) -> ServiceResult<User>;
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool (cloning a pool is a handle copy)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, password_hash, created_at
            FROM users WHERE email = ?
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: CreateUser) -> ServiceResult<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, first_name, last_name, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, email, first_name, last_name, password_hash, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(created) => Ok(created),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                Err(ServiceError::already_exists("User", user.email))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for service-level tests.
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryUserStore {
        users: Mutex<HashMap<String, User>>, // key: email
    }

    impl InMemoryUserStore {
        pub fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        pub fn get(&self, email: &str) -> Option<User> {
            self.users.lock().unwrap().get(email).cloned()
        }

        pub fn remove(&self, email: &str) {
            self.users.lock().unwrap().remove(email);
        }
    }

    #[async_trait]
    impl UserStore for InMemoryUserStore {
        async fn find_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
            Ok(self.get(email))
        }

        async fn create_user(&self, user: CreateUser) -> ServiceResult<User> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&user.email) {
                return Err(ServiceError::already_exists("User", user.email));
            }
            let created = User {
                id: users.len() as i64 + 1,
                email: user.email.clone(),
                first_name: user.first_name,
                last_name: user.last_name,
                password_hash: user.password_hash,
                created_at: Utc::now(),
            };
            users.insert(user.email, created.clone());
            Ok(created)
        }
    }
}
