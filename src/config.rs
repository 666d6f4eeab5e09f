//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::letters::common::get_static_dir;

const DEFAULT_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:8080",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub host: String,
    pub port: u16,
    pub assets_dir: PathBuf,
    pub draft_ttl: Duration,
    pub draft_capacity: u64,
    pub allowed_origins: Vec<String>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            assets_dir: get_static_dir().to_path_buf(),
            draft_ttl: Duration::from_secs(30 * 60),
            draft_capacity: 1000,
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}

impl PortalConfig {
    /// Reads `PORTAL_*` variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("PORTAL_HOST") {
            config.host = host.trim().to_string();
        }
        if let Some(port) = var("PORTAL_PORT") {
            config.port = parse_number("PORTAL_PORT", &port)?;
        }
        if let Some(dir) = var("PORTAL_ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir.trim());
        }
        if let Some(ttl) = var("PORTAL_DRAFT_TTL_SECS") {
            let secs: u64 = parse_number("PORTAL_DRAFT_TTL_SECS", &ttl)?;
            if secs == 0 {
                return Err(ConfigError::Zero { key: "PORTAL_DRAFT_TTL_SECS" });
            }
            config.draft_ttl = Duration::from_secs(secs);
        }
        if let Some(capacity) = var("PORTAL_DRAFT_CAPACITY") {
            config.draft_capacity = parse_number("PORTAL_DRAFT_CAPACITY", &capacity)?;
            if config.draft_capacity == 0 {
                return Err(ConfigError::Zero { key: "PORTAL_DRAFT_CAPACITY" });
            }
        }
        if let Some(origins) = var("PORTAL_ALLOWED_ORIGINS") {
            config.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}
