//! JWT token utilities for authentication.
//!
//! Provides token creation and validation for logged-in users. Tokens are
//! HS256-signed, name the user's email as subject and carry an issuer and an
//! expiry that are both enforced on validation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::models::User;

/// JWT Claims structure identifying an authenticated user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User email
    pub sub: String,
    /// User ID at issuance time
    pub uid: i64,
    /// Token issuer
    pub iss: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn email(&self) -> &str {
        &self.sub
    }

    /// Check if token has expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as usize;
        now >= self.exp
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("invalid token issuer")]
    InvalidIssuer,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token generation failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
            _ => TokenError::Malformed(error.to_string()),
        }
    }
}

/// JWT token utility for creating and validating tokens
#[derive(Clone)]
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    expires_in: Duration,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from an HMAC secret.
    pub fn new(secret: &str, issuer: impl Into<String>, expires_in_seconds: u64) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        JwtUtils {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
            expires_in: i64::try_from(expires_in_seconds)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
        }
    }

    /// Generate a signed token for `user`, valid from now for the configured lifetime.
    pub fn generate_token(&self, user: &User) -> Result<String, TokenError> {
        self.generate_token_at(user, Utc::now())
    }

    /// Generate a token as if issued at `issued_at`.
    pub fn generate_token_at(
        &self,
        user: &User,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let exp = issued_at
            .checked_add_signed(self.expires_in)
            .ok_or_else(|| TokenError::Signing("token expiry is out of range".to_string()))?;

        let claims = Claims {
            sub: user.email.clone(),
            uid: user.id,
            iss: self.issuer.clone(),
            exp: exp.timestamp().max(0) as usize,
            iat: issued_at.timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        // jsonwebtoken accepts exp == now; a token is dead at its expiry instant.
        if claims.is_expired() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 42,
            email: "a@x.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    fn jwt() -> JwtUtils {
        JwtUtils::new("test-secret", "hive-auth", 3600)
    }

    #[test]
    fn test_generate_and_validate() {
        let jwt = jwt();
        let token = jwt.generate_token(&user()).unwrap();
        assert!(!token.is_empty());

        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.email(), "a@x.com");
        assert_eq!(claims.uid, 42);
        assert_eq!(claims.iss, "hive-auth");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = jwt();
        let issued_at = Utc::now() - Duration::hours(2);
        let token = jwt.generate_token_at(&user(), issued_at).unwrap();

        assert_eq!(jwt.validate_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_oversized_lifetime_fails_to_sign() {
        for lifetime in [100_000_000_000_000, i64::MAX as u64, u64::MAX] {
            let err = JwtUtils::new("test-secret", "hive-auth", lifetime)
                .generate_token(&user())
                .unwrap_err();
            assert!(matches!(err, TokenError::Signing(_)), "{lifetime} gave {err:?}");
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtUtils::new("other-secret", "hive-auth", 3600)
            .generate_token(&user())
            .unwrap();

        assert_eq!(jwt().validate_token(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let token = JwtUtils::new("test-secret", "someone-else", 3600)
            .generate_token(&user())
            .unwrap();

        assert_eq!(jwt().validate_token(&token), Err(TokenError::InvalidIssuer));
    }

    #[test]
    fn test_garbage_tokens_rejected() {
        let jwt = jwt();
        for token in ["", "not-a-token", "a.b.c", "\u{1}\u{2}\u{3}"] {
            let err = jwt.validate_token(token).unwrap_err();
            assert!(matches!(err, TokenError::Malformed(_)), "{token:?} gave {err:?}");
            assert!(!err.to_string().is_empty());
        }
    }
}
