//! # Configuration Module
//!
//! Bot settings read from the environment (after `.env` is loaded), with the
//! stall's defaults for everything except the token.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::menu::Menu;

/// Environment variable holding the bot token
pub const TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
/// Fallback token variable
pub const LEGACY_TOKEN_VAR: &str = "BOT_TOKEN";
pub const PREP_TIME_VAR: &str = "ORDER_PREP_TIME_SECS";
pub const POLL_INTERVAL_VAR: &str = "POLL_INTERVAL_SECS";

pub const DEFAULT_PREP_TIME_SECS: u64 = 10;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No bot token in the environment
    MissingToken,
    /// A numeric setting could not be parsed
    InvalidNumber { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingToken => {
                write!(f, "{TOKEN_VAR} (or {LEGACY_TOKEN_VAR}) must be set")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a whole number of seconds, got {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration of the bot
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    /// Delay between confirmation and the "order ready" notification
    pub prep_time: Duration,
    /// Long-polling timeout for `getUpdates`
    pub poll_interval: Duration,
    pub menu: Arc<Menu>,
}

impl BotConfig {
    /// Configuration with default timings and menu
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            prep_time: Duration::from_secs(DEFAULT_PREP_TIME_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            menu: Arc::new(Menu::default()),
        }
    }

    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = [TOKEN_VAR, LEGACY_TOKEN_VAR]
            .into_iter()
            .filter_map(&lookup)
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let mut config = Self::new(token);
        if let Some(secs) = parse_secs(&lookup, PREP_TIME_VAR)? {
            config.prep_time = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_secs(&lookup, POLL_INTERVAL_VAR)? {
            config.poll_interval = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse_secs<F>(lookup: &F, key: &str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber {
                key: key.to_string(),
                value,
            }),
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("prep_time", &self.prep_time)
            .field("poll_interval", &self.poll_interval)
            .field("menu_items", &self.menu.len())
            .finish()
    }
}
