//! Building blocks the auth service composes: token signing and password hashing.

pub mod jwt;
pub mod password;
