//! Environment-driven configuration for the storefront core.

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = "boutique-data";
const DEFAULT_TIMEOUT_MS: u64 = 5_000;

#[derive(Clone, Debug)]
pub struct Config {
    /// Remote backend base URL; unset selects the fully local variant.
    pub api_base_url: Option<String>,
    /// Directory holding the local fallback records.
    pub data_dir: PathBuf,
    /// Per-request deadline for remote calls; a hung call counts as a
    /// connectivity failure.
    pub request_timeout: Duration,
    /// Admin notification channel; unset disables publishing.
    pub nats_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOUTIQUE_REQUEST_TIMEOUT_MS must be an integer: {0}")]
    InvalidTimeout(#[from] ParseIntError),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let request_timeout = match env::var("BOUTIQUE_REQUEST_TIMEOUT_MS") {
            Ok(raw) => Duration::from_millis(raw.parse::<u64>()?),
            Err(_) => Duration::from_millis(DEFAULT_TIMEOUT_MS),
        };
        Ok(Self {
            api_base_url: env::var("BOUTIQUE_API_URL").ok().filter(|v| !v.is_empty()),
            data_dir: env::var("BOUTIQUE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            request_timeout,
            nats_url: env::var("NATS_URL").ok().filter(|v| !v.is_empty()),
        })
    }
}

impl Default for Config {
    /// The fully local variant: no remote backend, no notification channel.
    fn default() -> Self {
        Self {
            api_base_url: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            nats_url: None,
        }
    }
}
