use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    MySql(DatabaseConfig),
    Memory,
}

// Managed by Rocket so request guards can reach the secret
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub auth: AuthConfig,
    pub realtime_buffer: usize,
    pub seed_demo_data: bool,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let backend = match get("STORAGE_BACKEND") {
            Some(name) => name.to_ascii_lowercase(),
            None if get("DATABASE_URL").is_some() => "mysql".to_string(),
            None => "memory".to_string(),
        };

        let storage = match backend.as_str() {
            "mysql" => StorageBackend::MySql(DatabaseConfig {
                url: get("DATABASE_URL")
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?
                    .to_string(),
                max_connections: parse_or(vars, "DB_MAX_CONNECTIONS", 10)?,
                acquire_timeout: Duration::from_secs(parse_or(vars, "DB_ACQUIRE_TIMEOUT_SECS", 3)?),
            }),
            "memory" => StorageBackend::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: backend,
                })
            }
        };

        let seed_default = matches!(storage, StorageBackend::Memory);

        Ok(AppConfig {
            auth: AuthConfig {
                jwt_secret: get("JWT_SECRET").map(str::to_string),
            },
            realtime_buffer: parse_or(vars, "REALTIME_BUFFER", 128)?,
            seed_demo_data: parse_or(vars, "SEED_DEMO_DATA", seed_default)?,
            log_filter: get("RUST_LOG")
                .map(str::to_string)
                .unwrap_or_else(|| {
                    let level = get("LOG_LEVEL").unwrap_or("info");
                    format!("skywings_booking={},warn", level)
                }),
            storage,
        })
    }
}

fn parse_or<T: FromStr>(vars: &HashMap<String, String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw.to_string(),
        }),
        None => Ok(default),
    }
}

/// Installs the global tracing subscriber. Safe to call more than once.
pub fn init_tracing(filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("skywings_booking=info,warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
