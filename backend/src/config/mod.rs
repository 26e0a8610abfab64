//! Central module for application-wide configuration settings.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file. Parsing is done over a plain key lookup so tests can feed values in
//! without mutating the process environment.

use anyhow::{Context, Result, bail};
use std::env;

/// Longest accepted token lifetime: ten years.
pub const MAX_JWT_EXPIRES_IN_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_expires_in_seconds: u64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = var_or("DB_MAX_CONNECTIONS", "5")
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = var_or("DB_ACQUIRE_TIMEOUT_SECONDS", "3")
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_issuer = var_or("JWT_ISSUER", "hive-auth");

        let jwt_expires_in_seconds = var_or("JWT_EXPIRES_IN_SECONDS", "86400")
            .parse::<u64>()
            .context("JWT_EXPIRES_IN_SECONDS must be a valid number")?;
        if !(1..=MAX_JWT_EXPIRES_IN_SECONDS).contains(&jwt_expires_in_seconds) {
            bail!(
                "JWT_EXPIRES_IN_SECONDS must be between 1 and {}, got {}",
                MAX_JWT_EXPIRES_IN_SECONDS,
                jwt_expires_in_seconds
            );
        }

        let bcrypt_cost = var_or("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31, got {}", bcrypt_cost);
        }

        let server_port = var_or("SERVER_PORT", "3000")
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_issuer,
            jwt_expires_in_seconds,
            bcrypt_cost,
            server_port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout_seconds, 3);
        assert_eq!(config.jwt_issuer, "hive-auth");
        assert_eq!(config.jwt_expires_in_seconds, 86400);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_missing_secret_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")]))
            .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", ""),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
            ("SERVER_PORT", "not-a-port"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));

        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "secret"),
            ("BCRYPT_COST", "2"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("BCRYPT_COST"));
    }

    #[test]
    fn test_token_lifetime_bounds() {
        let with_lifetime = |value: &str| {
            Config::from_lookup(lookup_from(&[
                ("DATABASE_URL", "sqlite::memory:"),
                ("JWT_SECRET", "secret"),
                ("JWT_EXPIRES_IN_SECONDS", value),
            ]))
        };

        let err = with_lifetime("0").unwrap_err();
        assert!(err.to_string().contains("JWT_EXPIRES_IN_SECONDS"));

        let too_long = (MAX_JWT_EXPIRES_IN_SECONDS + 1).to_string();
        assert!(with_lifetime(&too_long).is_err());
        assert!(with_lifetime("100000000000000").is_err());

        let config = with_lifetime(&MAX_JWT_EXPIRES_IN_SECONDS.to_string()).unwrap();
        assert_eq!(config.jwt_expires_in_seconds, MAX_JWT_EXPIRES_IN_SECONDS);
        assert_eq!(with_lifetime("1").unwrap().jwt_expires_in_seconds, 1);
    }
}
