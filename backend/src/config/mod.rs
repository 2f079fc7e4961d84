//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, pool sizing, server port, password hashing cost and the
//! request timeout applied at the HTTP boundary.

use crate::utils::password::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::env;

/// bcrypt work factor used when `BCRYPT_COST` is not set.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub server_port: u16,
    pub bcrypt_cost: u32,
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(&env::vars().collect())
    }

    /// Loads configuration from a map of variables.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let database_url = vars
            .get("DATABASE_URL")
            .cloned()
            .unwrap_or_else(|| "sqlite://auth.db?mode=rwc".to_string());

        let max_connections = parse_var(vars, "DB_MAX_CONNECTIONS", "5")
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = parse_var(vars, "DB_ACQUIRE_TIMEOUT_SECONDS", "3")
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let server_port = parse_var(vars, "SERVER_PORT", "3000")
            .context("SERVER_PORT must be a valid number")?;

        let bcrypt_cost: u32 = parse_var(vars, "BCRYPT_COST", &DEFAULT_BCRYPT_COST.to_string())
            .context("BCRYPT_COST must be a valid number")?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            bail!(
                "BCRYPT_COST must be between {} and {}, got {}",
                MIN_BCRYPT_COST,
                MAX_BCRYPT_COST,
                bcrypt_cost
            );
        }

        let request_timeout_seconds = parse_var(vars, "REQUEST_TIMEOUT_SECONDS", "30")
            .context("REQUEST_TIMEOUT_SECONDS must be a valid number")?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            server_port,
            bcrypt_cost,
            request_timeout_seconds,
        })
    }
}

fn parse_var<T>(vars: &HashMap<String, String>, key: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    <T as std::str::FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = vars.get(key).map(String::as_str).unwrap_or(default);
    Ok(raw.trim().parse::<T>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_vars_defaults() {
        let config = Config::from_vars(&HashMap::new()).unwrap();

        assert_eq!(config.database_url, "sqlite://auth.db?mode=rwc");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout_seconds, 3);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.request_timeout_seconds, 30);
    }

    #[test]
    fn test_from_vars_overrides() {
        let config = Config::from_vars(&vars(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_MAX_CONNECTIONS", "1"),
            ("SERVER_PORT", "5000"),
            ("BCRYPT_COST", "12"),
            ("REQUEST_TIMEOUT_SECONDS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.request_timeout_seconds, 5);
    }

    #[test]
    fn test_from_vars_invalid_port() {
        let err = Config::from_vars(&vars(&[("SERVER_PORT", "not-a-port")])).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }

    #[test]
    fn test_from_vars_bcrypt_cost_out_of_range() {
        assert!(Config::from_vars(&vars(&[("BCRYPT_COST", "3")])).is_err());
        assert!(Config::from_vars(&vars(&[("BCRYPT_COST", "32")])).is_err());
    }
}
