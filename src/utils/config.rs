use crate::exchange::binance::Credentials;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET";

/// Main configuration structure
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// working testnet setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub exchange: ExchangeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Allowed CORS origins; any origin when unset
    pub cors_origins: Option<Vec<String>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub api_endpoint: String,
    pub timeout_ms: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://testnet.binance.vision/api".to_string(),
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub output: String,
    pub file_path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: "pretty".to_string(),
            file_path: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from an optional TOML file, then apply `PROXY__SECTION__KEY`
    /// environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("PROXY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;

        Ok(settings.try_deserialize()?)
    }
}

/// Read API credentials from the process environment
///
/// Missing or empty values fail here instead of surfacing later as
/// authentication errors from the exchange.
pub fn credentials_from_env() -> Result<Credentials> {
    let read = |var: &str| -> Result<String> {
        match std::env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            Ok(_) => Err(anyhow!("{} is set but empty", var)),
            Err(_) => Err(anyhow!("{} not found in environment", var)),
        }
    };

    Ok(Credentials::new(read(API_KEY_VAR)?, read(API_SECRET_VAR)?))
}
