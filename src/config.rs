use std::env;
use std::str::FromStr;

use crate::error::AppError;

const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_BCRYPT_COST: u32 = 10;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 5;

/// Connection settings for the relational store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Upper bound for a single statement; also used as the pool acquire timeout.
    pub statement_timeout_secs: u64,
}

/// Process configuration for the server binary.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
    /// Allowed CORS origin; any origin is accepted when unset.
    pub cors_origin: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database", &self.database)
            .field("server_port", &self.server_port)
            .field("server_host", &self.server_host)
            .field("jwt_secret", &"<redacted>")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            url: required(&lookup, "DATABASE_URL")?,
            max_connections: parsed_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            statement_timeout_secs: parsed_or(
                &lookup,
                "DATABASE_STATEMENT_TIMEOUT_SECS",
                DEFAULT_STATEMENT_TIMEOUT_SECS,
            )?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Fails with `AppError::ConfigError` when a required key is missing or a
    /// value cannot be parsed. A missing `JWT_SECRET` is never defaulted.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bcrypt_cost = parsed_or(&lookup, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::ConfigError(format!(
                "BCRYPT_COST must be between 4 and 31, got {}",
                bcrypt_cost
            )));
        }

        Ok(Self {
            database: DatabaseConfig::from_lookup(&lookup)?,
            server_port: parsed_or(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            jwt_secret: required(&lookup, "JWT_SECRET")?,
            bcrypt_cost,
            cors_origin: lookup("CORS_ORIGIN").filter(|origin| !origin.is_empty()),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::ConfigError(format!("{} must be set", key))),
    }
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::ConfigError(format!("{} must be a number, got {:?}", key, raw))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "test-secret"),
        ]))
        .unwrap();

        assert_eq!(config.database.url, "postgres://test");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.statement_timeout_secs, 5);
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.cors_origin, None);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "test-secret"),
            ("SERVER_PORT", "3000"),
            ("SERVER_HOST", "0.0.0.0"),
            ("BCRYPT_COST", "4"),
            ("CORS_ORIGIN", "http://localhost:3000"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_missing_secret_is_config_error() {
        let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://test")]));
        assert!(matches!(result, Err(AppError::ConfigError(msg)) if msg.contains("JWT_SECRET")));

        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "  "),
        ]));
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "test-secret"),
            ("SERVER_PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(AppError::ConfigError(msg)) if msg.contains("SERVER_PORT")));

        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "test-secret"),
            ("BCRYPT_COST", "2"),
        ]));
        assert!(matches!(result, Err(AppError::ConfigError(msg)) if msg.contains("BCRYPT_COST")));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "super-secret-value"),
        ]))
        .unwrap();
        assert!(!format!("{:?}", config).contains("super-secret-value"));
    }
}
