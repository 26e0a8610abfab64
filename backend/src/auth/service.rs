//! Core business logic for the authentication system.
//!
//! `AuthService` composes a user store, a password hasher and the JWT
//! utilities, all handed in at construction. Expected outcomes (conflict,
//! invalid login, bad token) come back as `Ok` responses carrying a status;
//! `Err` is reserved for infrastructure failures.

use crate::api::common::format_validation_errors;
use crate::auth::models::*;
use crate::database::models::CreateUser;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserStore;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::PasswordHasher;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

/// Authentication service for registration, login and token validation
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    jwt_utils: JwtUtils,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, jwt_utils: JwtUtils) -> Self {
        AuthService {
            users,
            hasher,
            jwt_utils,
        }
    }

    /// Register a new user with a hashed password.
    ///
    /// Returns 201 on success, 409 if the email is taken and 400 if the input
    /// fails validation.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        if let Err(validation_errors) = request.validate() {
            let message = format_validation_errors(&validation_errors);
            debug!("Registration input rejected: {}", message);
            return Ok(RegisterResponse::failed(StatusCode::BAD_REQUEST, message));
        }

        if self.users.find_by_email(&request.email).await?.is_some() {
            info!("Registration rejected, email already exists");
            return Ok(RegisterResponse::failed(StatusCode::CONFLICT, EMAIL_EXISTS));
        }

        let password_hash = self.hasher.hash(&request.password).await.map_err(|e| {
            error!("Password hashing failed: {}", e);
            ServiceError::internal_error(e.to_string())
        })?;

        let new_user = CreateUser {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password_hash,
        };

        match self.users.create_user(new_user).await {
            Ok(user) => {
                info!(user_id = user.id, "User registered");
                Ok(RegisterResponse::created())
            }
            // A concurrent registration won the race past the lookup above.
            Err(ServiceError::AlreadyExists { .. }) => {
                info!("Registration rejected by unique constraint");
                Ok(RegisterResponse::failed(StatusCode::CONFLICT, EMAIL_EXISTS))
            }
            Err(e) => {
                error!("Failed to create user: {}", e);
                Err(e)
            }
        }
    }

    /// Authenticate a user and issue a token.
    ///
    /// Unknown email and wrong password produce the same 404 response.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let Some(user) = self.users.find_by_email(&request.email).await? else {
            warn!("Login failed");
            return Ok(LoginResponse::invalid_login());
        };

        let matches = self
            .hasher
            .verify(&request.password, &user.password_hash)
            .await
            .map_err(|e| {
                error!("Password verification failed: {}", e);
                ServiceError::internal_error(e.to_string())
            })?;

        if !matches {
            warn!(user_id = user.id, "Login failed");
            return Ok(LoginResponse::invalid_login());
        }

        let token = self.jwt_utils.generate_token(&user).map_err(|e| {
            error!(user_id = user.id, "Token generation failed: {}", e);
            ServiceError::internal_error(e.to_string())
        })?;

        info!(user_id = user.id, "User logged in");
        Ok(LoginResponse::ok(token))
    }

    /// Resolve a presented token to the id of the user it was issued for.
    #[instrument(skip_all)]
    pub async fn validate(&self, request: ValidateRequest) -> ServiceResult<ValidateResponse> {
        let claims = match self.jwt_utils.validate_token(&request.token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Token rejected: {}", e);
                return Ok(ValidateResponse::bad_token(e.to_string()));
            }
        };

        match self.users.find_by_email(claims.email()).await? {
            Some(user) => Ok(ValidateResponse::ok(user.id)),
            None => {
                warn!("Token subject no longer exists");
                Ok(ValidateResponse::invalid_login())
            }
        }
    }
}
