use crate::sources::http::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_FAVORITES_PATH: &str = "favorites.json";

/// Catalogue configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    /// Serve the built-in fixtures instead of calling the API
    pub use_mock: bool,
    pub timeout: Duration,
    pub favorites_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            use_mock: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            favorites_path: PathBuf::from(DEFAULT_FAVORITES_PATH),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let use_mock = match get("CATALOG_USE_MOCK") {
            Some(value) => parse_flag(&value)
                .with_context(|| format!("CATALOG_USE_MOCK must be a boolean, got {:?}", value))?,
            None => defaults.use_mock,
        };

        let timeout = match get("CATALOG_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(
                value
                    .trim()
                    .parse()
                    .context("CATALOG_TIMEOUT_SECS must be a valid number")?,
            ),
            None => defaults.timeout,
        };

        Ok(Self {
            api_url: get("CATALOG_API_URL")
                .map(|url| url.trim().to_string())
                .unwrap_or(defaults.api_url),
            use_mock,
            timeout,
            favorites_path: get("CATALOG_FAVORITES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.favorites_path),
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
