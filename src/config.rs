// config.rs
use std::net::SocketAddr;
use thiserror::Error;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DB_PATH: &str = "properties.sqlite3";
const DEFAULT_MAX_IMPORT_BYTES: u64 = 2 << 20; // 2 MB of payload
const DEFAULT_MAX_WORKERS: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub max_import_bytes: u64,
    pub max_workers: usize,
    /// Apply the full-width digit fallback to `price` as well.
    pub widen_price: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so tests don't
    /// have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = parse_var(&lookup, "SERVER_LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?;
        let db_path = lookup("DB_PATH")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let max_import_bytes = parse_var(
            &lookup,
            "MAX_IMPORT_FILE_SIZE_BYTES",
            &DEFAULT_MAX_IMPORT_BYTES.to_string(),
        )?;
        let max_workers = parse_var(
            &lookup,
            "SERVER_MAX_WORKERS",
            &DEFAULT_MAX_WORKERS.to_string(),
        )?;

        if max_workers == 0 {
            return Err(ConfigError::Invalid {
                var: "SERVER_MAX_WORKERS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            listen_addr,
            db_path,
            max_import_bytes,
            max_workers,
            widen_price: lookup("IMPORT_WIDEN_PRICE").is_some_and(|v| !v.is_empty()),
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = lookup(var)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string());

    value.parse::<T>().map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}
