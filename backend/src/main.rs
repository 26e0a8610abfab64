//! Main entry point for the hive-auth service.
//!
//! Loads configuration, opens the user database, wires the auth service with
//! its store, hasher and token utilities, and serves the HTTP API until a
//! shutdown signal arrives.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod utils;

use anyhow::Context;
use auth::service::AuthService;
use config::Config;
use database::Database;
use repositories::user_repository::UserRepository;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utils::jwt::JwtUtils;
use utils::password::PasswordHasher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    db.migrate().await?;

    let auth_service = Arc::new(AuthService::new(
        Arc::new(UserRepository::new(db.pool().clone())),
        PasswordHasher::new(config.bcrypt_cost),
        JwtUtils::new(
            &config.jwt_secret,
            config.jwt_issuer.clone(),
            config.jwt_expires_in_seconds,
        ),
    ));

    let app = api::app_router(auth_service, db.pool().clone());

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    info!("Starting hive-auth server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
