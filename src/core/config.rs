//! Environment-driven configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Accept BOT_ACCESS_TOKEN as a fallback for DISCORD_TOKEN
//! - 1.0.0: Initial release

use anyhow::{anyhow, Result};

pub const DEFAULT_DATABASE_PATH: &str = "data.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_COMMAND_PREFIX: &str = "/";

/// Runtime configuration for the bot binary
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_path: String,
    pub log_level: String,
    pub command_prefix: String,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let discord_token = non_blank("DISCORD_TOKEN")
            .or_else(|| non_blank("BOT_ACCESS_TOKEN"))
            .ok_or_else(|| anyhow!("DISCORD_TOKEN is not set"))?;

        Ok(Config {
            discord_token,
            database_path: non_blank("DATABASE_PATH")
                .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            log_level: non_blank("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            command_prefix: non_blank("COMMAND_PREFIX")
                .map(|p| p.trim().to_string())
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
        })
    }
}
