//! Configuration module for the issue tracker backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{AddrParseError, SocketAddr};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "5000";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Whether the sample issues are loaded at startup
    pub seed_sample_data: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AddrParseError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AddrParseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("ISSUES_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("ISSUES_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        let bind_addr = format!("{}:{}", host, port).parse()?;

        let log_level =
            lookup("ISSUES_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let seed_sample_data = lookup("ISSUES_SEED_SAMPLE_DATA")
            .map(|value| parse_flag(&value))
            .unwrap_or(true);

        Ok(Self {
            bind_addr,
            log_level,
            seed_sample_data,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}
