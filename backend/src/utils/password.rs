//! Password hashing with bcrypt.
//!
//! bcrypt is deliberately slow, so both operations run on tokio's blocking
//! pool rather than on an async worker thread.

use bcrypt::BcryptError;
use thiserror::Error;
use tracing::warn;

/// bcrypt only reads this many bytes of input. Longer passwords are refused.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] BcryptError),
    #[error("password is longer than 72 bytes")]
    TooLong,
    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Salted one-way hashing of plaintext passwords.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash `password`. The returned string embeds cost and salt and is safe to persist.
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong);
        }

        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    /// Check `password` against a stored hash.
    ///
    /// A stored value bcrypt cannot parse never matches, nor does a password
    /// longer than bcrypt reads.
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        let password = password.to_owned();
        let hash = hash.to_owned();
        let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await?;

        match outcome {
            Ok(matches) => Ok(matches),
            Err(e) => {
                warn!("Stored password hash could not be verified: {}", e);
                Ok(false)
            }
        }
    }
}
