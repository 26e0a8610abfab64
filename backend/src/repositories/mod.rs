//! Persistence layer. Repositories own the SQL; services only see the store traits.

pub mod user_repository;
