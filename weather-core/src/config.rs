use anyhow::{Result, anyhow};
use chrono_tz::Tz;
use std::path::PathBuf;

pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";
pub const ENV_WEATHER_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_MANUAL_TRIGGER: &str = "MANUAL_TRIGGER";
pub const ENV_LAST_SENT_DATE: &str = "LAST_SENT_DATE";
pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// The one place the bot reports on.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// "Today" and the send window are evaluated in this zone.
    pub timezone: Tz,
}

impl Location {
    pub fn sydney() -> Self {
        Self {
            label: "Sydney".to_string(),
            latitude: -33.8688,
            longitude: 151.2093,
            timezone: chrono_tz::Australia::Sydney,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::sydney()
    }
}

/// Inputs that decide whether this run sends anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trigger {
    /// Started by hand; bypasses the send window and the dedupe.
    pub manual: bool,
    /// `%Y-%m-%d` of the last successful send, empty if unknown.
    pub last_sent_date: String,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Everything one run needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub openweather_api_key: String,
    pub trigger: Trigger,
    /// Append-only file that receives `sent_date=...`.
    pub output_path: Option<PathBuf>,
    pub location: Location,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key: &str| std::env::var(key).ok())
    }

    /// Build from any key lookup. Only the run inputs are read; the location
    /// is always [`Location::sydney`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("Missing required environment variable {key}"))
        };

        let telegram = TelegramConfig {
            bot_token: required(ENV_BOT_TOKEN)?,
            chat_id: required(ENV_CHAT_ID)?,
        };
        let openweather_api_key = required(ENV_WEATHER_KEY)?;

        let manual = lookup(ENV_MANUAL_TRIGGER)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let trigger = Trigger {
            manual,
            last_sent_date: lookup(ENV_LAST_SENT_DATE).unwrap_or_default(),
        };

        let output_path = lookup(ENV_GITHUB_OUTPUT)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            telegram,
            openweather_api_key,
            trigger,
            output_path,
            location: Location::sydney(),
        })
    }
}
