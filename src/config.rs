//! Service configuration.
//!
//! Loads configuration from environment variables (and `.env` when present)
//! with defaults suitable for local development.

use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {key} value: {value}")]
    Invalid { key: String, value: String },

    #[error("Missing required setting: {0}")]
    Missing(String),
}

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone)]
pub struct Config {
    pub http: HttpConfig,
    pub storage: StorageConfig,
    /// Broker publishing is enabled only when this is set
    pub redpanda: Option<RedpandaConfig>,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone)]
pub struct RedpandaConfig {
    pub brokers: String,
    pub topic: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http = HttpConfig {
            host: lookup("ORDERS_HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("ORDERS_HTTP_PORT", lookup("ORDERS_HTTP_PORT"), 8000)?,
        };

        let storage_kind = lookup("ORDERS_STORAGE").unwrap_or_else(|| "memory".to_string());
        let storage = match storage_kind.to_lowercase().as_str() {
            "memory" => StorageConfig::Memory,
            "postgres" | "postgresql" => StorageConfig::Postgres {
                database_url: lookup("DATABASE_URL")
                    .ok_or_else(|| ConfigError::Missing("DATABASE_URL".to_string()))?,
                max_connections: parse_or(
                    "ORDERS_DB_MAX_CONNECTIONS",
                    lookup("ORDERS_DB_MAX_CONNECTIONS"),
                    5,
                )?,
            },
            _ => {
                return Err(ConfigError::Invalid {
                    key: "ORDERS_STORAGE".to_string(),
                    value: storage_kind,
                })
            }
        };

        let redpanda = lookup("ORDERS_REDPANDA_BROKERS")
            .filter(|brokers| !brokers.trim().is_empty())
            .map(|brokers| RedpandaConfig {
                brokers,
                topic: lookup("ORDERS_EVENTS_TOPIC").unwrap_or_else(|| "order-events".to_string()),
            });

        Ok(Self { http, storage, redpanda })
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw.parse::<T>().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.storage, StorageConfig::Memory);
        assert!(config.redpanda.is_none());
    }

    #[test]
    fn test_postgres_storage() {
        let config = Config::from_lookup(lookup(&[
            ("ORDERS_STORAGE", "postgres"),
            ("DATABASE_URL", "postgres://localhost/orders"),
            ("ORDERS_DB_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();

        assert_eq!(
            config.storage,
            StorageConfig::Postgres {
                database_url: "postgres://localhost/orders".to_string(),
                max_connections: 12,
            }
        );
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = Config::from_lookup(lookup(&[("ORDERS_STORAGE", "postgres")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(key) if key == "DATABASE_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_lookup(lookup(&[("ORDERS_HTTP_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key, .. } if key == "ORDERS_HTTP_PORT"));
    }

    #[test]
    fn test_unknown_storage() {
        let err = Config::from_lookup(lookup(&[("ORDERS_STORAGE", "mongo")])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid ORDERS_STORAGE value: mongo");
    }

    #[test]
    fn test_redpanda_enabled_by_brokers() {
        let config = Config::from_lookup(lookup(&[
            ("ORDERS_REDPANDA_BROKERS", "127.0.0.1:9092"),
        ]))
        .unwrap();

        let redpanda = config.redpanda.unwrap();
        assert_eq!(redpanda.brokers, "127.0.0.1:9092");
        assert_eq!(redpanda.topic, "order-events");
    }

    #[test]
    fn test_blank_brokers_disable_publishing() {
        let config = Config::from_lookup(lookup(&[("ORDERS_REDPANDA_BROKERS", "  ")])).unwrap();
        assert!(config.redpanda.is_none());
    }
}
