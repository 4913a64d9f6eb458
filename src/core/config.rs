//! Environment-driven configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add chat client settings (reply delay, API URL, user id)
//! - 1.0.0: Server settings with port retry and optional database path

use anyhow::{anyhow, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_PORT_RETRIES: u16 = 3;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;
pub const DEFAULT_USER_ID: i64 = 1;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Extra consecutive ports to try when the first one is taken
    pub port_retries: u16,
    /// SQLite file for persona selections. `None` keeps everything in memory.
    pub database_path: Option<String>,
    pub log_level: String,
    /// Simulated "thinking" pause before the chat UI shows a bot reply
    pub reply_delay: Duration,
    /// Base URL of a running server, used by the chat UI to save selections
    pub api_url: Option<String>,
    pub user_id: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            port_retries: DEFAULT_PORT_RETRIES,
            database_path: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            api_url: None,
            user_id: DEFAULT_USER_ID,
        }
    }
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Ok(Config {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            port_retries: parse_or("PORT_RETRIES", get("PORT_RETRIES"), defaults.port_retries)?,
            database_path: get("DATABASE_PATH"),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            reply_delay: Duration::from_millis(parse_or(
                "REPLY_DELAY_MS",
                get("REPLY_DELAY_MS"),
                DEFAULT_REPLY_DELAY_MS,
            )?),
            api_url: get("MULTIVERSE_API_URL").map(|url| url.trim_end_matches('/').to_string()),
            user_id: parse_or("MULTIVERSE_USER_ID", get("MULTIVERSE_USER_ID"), defaults.user_id)?,
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid {key} value '{value}': {e}")),
        None => Ok(default),
    }
}
