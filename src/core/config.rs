//! Runtime configuration
//!
//! Everything the bot needs is read once at startup into a [`Config`] value
//! which is then shared (behind an `Arc`) with the dispatcher and the
//! background jobs. Unset variables fall back to placeholder defaults so a
//! fresh checkout starts without a `.env` file.

use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::fmt::Write as _;
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Placeholder token used when neither BOT_TOKEN nor TELOXIDE_TOKEN is set
pub const DEFAULT_BOT_TOKEN: &str = "YOUR_BOT_TOKEN_HERE";

/// Base URL of the game REST API
pub const DEFAULT_API_URL: &str = "https://your-render-app.onrender.com/api";

/// Web App (game client) URL opened by the inline buttons
pub const DEFAULT_WEBAPP_URL: &str = "https://your-render-app.onrender.com/app";

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for game API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Background job schedule
pub mod schedule {
    use super::Duration;

    /// Hour of day (UTC) when the daily reward reminder goes out
    pub const DAILY_REMINDER_HOUR: u32 = 12;

    /// Interval between battle notification runs (in seconds)
    pub const BATTLE_NOTIFY_INTERVAL_SECS: u64 = 6 * 60 * 60;

    /// Delay before the first battle notification run (in seconds)
    pub const BATTLE_NOTIFY_FIRST_DELAY_SECS: u64 = 10;

    /// Battle notification interval duration
    pub fn battle_interval() -> Duration {
        Duration::from_secs(BATTLE_NOTIFY_INTERVAL_SECS)
    }

    /// Delay before the first battle notification run
    pub fn battle_first_delay() -> Duration {
        Duration::from_secs(BATTLE_NOTIFY_FIRST_DELAY_SECS)
    }
}

/// Leaderboard configuration
pub mod leaderboard {
    /// Number of players requested from the API and shown in the chat
    pub const LIMIT: usize = 10;
}

/// Errors produced while building [`Config`] from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not a valid URL ({value}): {source}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        source: url::ParseError,
    },

    #[error("{var} cannot be used as a base URL: {value}")]
    NotABaseUrl { var: &'static str, value: String },

    #[error("{var} is not a valid number ({value}): {source}")]
    InvalidNumber {
        var: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("{var} must be greater than zero")]
    ZeroDuration { var: &'static str },

    #[error("DAILY_REMINDER_HOUR must be between 0 and 23, got {0}")]
    HourOutOfRange(u32),
}

/// Bot configuration, constructed once at startup
#[derive(Debug)]
pub struct Config {
    /// Telegram bot token (never logged)
    pub bot_token: SecretString,
    /// Base URL of the game API, e.g. `https://host/api`
    pub api_url: Url,
    /// Web App URL opened by the "play" buttons
    pub webapp_url: Url,
    /// Timeout applied to every game API request
    pub api_timeout: Duration,
    /// Hour of day (UTC) for the daily reward reminder
    pub daily_reminder_hour: u32,
    /// Interval of the battle notification job
    pub battle_notify_interval: Duration,
    /// Chats that receive the scheduled daily reward reminder
    pub daily_reminder_chat_ids: Vec<i64>,
    /// Optional log file (console logging is always on)
    pub log_file_path: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bot_token = get("BOT_TOKEN")
            .or_else(|| get("TELOXIDE_TOKEN"))
            .unwrap_or_else(|| DEFAULT_BOT_TOKEN.to_string());

        let api_url = parse_base_url("API_URL", get("API_URL").as_deref().unwrap_or(DEFAULT_API_URL))?;
        let webapp_url = parse_base_url(
            "WEBAPP_URL",
            get("WEBAPP_URL").as_deref().unwrap_or(DEFAULT_WEBAPP_URL),
        )?;

        let api_timeout = match get("API_TIMEOUT_SECS") {
            Some(raw) => positive_secs("API_TIMEOUT_SECS", &raw)?,
            None => network::timeout(),
        };

        let daily_reminder_hour = match get("DAILY_REMINDER_HOUR") {
            Some(raw) => raw.parse::<u32>().map_err(|source| ConfigError::InvalidNumber {
                var: "DAILY_REMINDER_HOUR",
                value: raw.clone(),
                source,
            })?,
            None => schedule::DAILY_REMINDER_HOUR,
        };
        if daily_reminder_hour > 23 {
            return Err(ConfigError::HourOutOfRange(daily_reminder_hour));
        }

        let battle_notify_interval = match get("BATTLE_NOTIFY_INTERVAL_SECS") {
            Some(raw) => positive_secs("BATTLE_NOTIFY_INTERVAL_SECS", &raw)?,
            None => schedule::battle_interval(),
        };

        let daily_reminder_chat_ids = get("DAILY_REMINDER_CHAT_IDS")
            .map(|raw| parse_chat_ids(&raw))
            .unwrap_or_default();

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            api_url,
            webapp_url,
            api_timeout,
            daily_reminder_hour,
            battle_notify_interval,
            daily_reminder_chat_ids,
            log_file_path: get("LOG_FILE_PATH"),
        })
    }

    /// True when the bot is still configured with the placeholder token
    pub fn uses_placeholder_token(&self) -> bool {
        self.bot_token.expose_secret() == DEFAULT_BOT_TOKEN
    }

    /// Human-readable configuration dump with the token redacted
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let token_state = if self.uses_placeholder_token() {
            "placeholder"
        } else {
            "set"
        };
        let _ = writeln!(out, "BOT_TOKEN: <{}>", token_state);
        let _ = writeln!(out, "API_URL: {}", self.api_url);
        let _ = writeln!(out, "WEBAPP_URL: {}", self.webapp_url);
        let _ = writeln!(out, "API_TIMEOUT_SECS: {}", self.api_timeout.as_secs());
        let _ = writeln!(out, "DAILY_REMINDER_HOUR: {} UTC", self.daily_reminder_hour);
        let _ = writeln!(
            out,
            "BATTLE_NOTIFY_INTERVAL_SECS: {}",
            self.battle_notify_interval.as_secs()
        );
        let _ = writeln!(out, "DAILY_REMINDER_CHAT_IDS: {:?}", self.daily_reminder_chat_ids);
        let _ = write!(
            out,
            "LOG_FILE_PATH: {}",
            self.log_file_path.as_deref().unwrap_or("<console only>")
        );
        out
    }
}

fn parse_base_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        var,
        value: value.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABaseUrl {
            var,
            value: value.to_string(),
        });
    }
    Ok(url)
}

fn positive_secs(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw.parse::<u64>().map_err(|source| ConfigError::InvalidNumber {
        var,
        value: raw.to_string(),
        source,
    })?;
    if secs == 0 {
        return Err(ConfigError::ZeroDuration { var });
    }
    Ok(Duration::from_secs(secs))
}

fn parse_chat_ids(raw: &str) -> Vec<i64> {
    raw.split([',', ' ', '\n', '\t'])
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .collect()
}
