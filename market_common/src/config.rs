//! API configuration passed into the gateway at construction.
//!
//! Values come from the process environment (after loading an optional `.env`
//! file with `dotenvy`) and may be overridden by command-line flags.
use std::env;
use std::time::Duration;

use log::debug;

use crate::error::MarketError;
use crate::result::Result;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "ALPHAVANTAGE_API_KEY";
/// Environment variable overriding the query endpoint.
pub const BASE_URL_VAR: &str = "ALPHAVANTAGE_BASE_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "ALPHAVANTAGE_TIMEOUT_SECS";

/// Default Alpha Vantage query endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the Alpha Vantage API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Secret API key sent as the `apikey` query parameter.
    pub api_key: String,
    /// Endpoint every request is sent to.
    pub base_url: String,
    /// Upper bound for a whole request, connect to last body byte.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration with the default endpoint and timeout.
    pub fn new(api_key: &str) -> Self {
        ApiConfig {
            api_key: String::from(api_key),
            base_url: String::from(DEFAULT_BASE_URL),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Loads `.env` if present, then reads the configuration from the environment.
    ///
    /// A non-empty `api_key` argument takes precedence over `ALPHAVANTAGE_API_KEY`.
    pub fn from_env(api_key: Option<&str>) -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(MarketError::Config(format!(".env: {}", e))),
        }
        Self::from_lookup(|name| match (name, api_key) {
            (API_KEY_VAR, Some(key)) => Some(key.to_string()),
            _ => env::var(name).ok(),
        })
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| MarketError::MissingEnvVar(API_KEY_VAR.to_string()))?;

        let mut config = ApiConfig::new(&api_key);

        if let Some(url) = lookup(BASE_URL_VAR) {
            config.base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            config.timeout = parse_timeout(&secs)?;
        }
        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        base_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = base_url {
            self.base_url = url.to_string();
        }
        if let Some(secs) = timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        self
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| MarketError::Config(format!("{}={:?}: {}", TIMEOUT_VAR, raw, e)))
}
