//! Runtime settings for the ledger service.
//!
//! Every setting comes from an environment variable (usually via `.env`) and
//! falls back to a local default, so the service runs with no configuration.

use crate::errors::Result;
use std::net::SocketAddr;
use std::path::PathBuf;

const DATA_PATH_VAR: &str = "LEDGER_DATA_PATH";
const BIND_ADDR_VAR: &str = "LEDGER_BIND_ADDR";
const SEED_CONFIG_VAR: &str = "LEDGER_SEED_CONFIG";

const DEFAULT_DATA_PATH: &str = "data/cylinder-ledger.json";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_SEED_CONFIG: &str = "config.toml";

/// Resolved service settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// JSON document holding all ledger data
    pub data_path: PathBuf,
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,
    /// TOML file used to seed a fresh data file
    pub seed_config_path: PathBuf,
}

impl Settings {
    /// Reads settings from the environment.
    ///
    /// # Errors
    /// Returns an error if `LEDGER_BIND_ADDR` is not a valid socket address.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            data_path: get_data_path(),
            bind_addr: get_bind_addr()?,
            seed_config_path: std::env::var(SEED_CONFIG_VAR)
                .unwrap_or_else(|_| DEFAULT_SEED_CONFIG.to_string())
                .into(),
        })
    }
}

/// Gets the data file path from `LEDGER_DATA_PATH` or returns the default.
#[must_use]
pub fn get_data_path() -> PathBuf {
    std::env::var(DATA_PATH_VAR)
        .unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string())
        .into()
}

/// Gets the bind address from `LEDGER_BIND_ADDR` or returns the default.
pub fn get_bind_addr() -> Result<SocketAddr> {
    let raw = std::env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    raw.parse().map_err(Into::into)
}
