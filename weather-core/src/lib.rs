//! Core library for the morning weather bot.
//!
//! This crate defines:
//! - Run configuration read from the environment
//! - The send-window gate and once-per-day dedupe
//! - OpenWeather fetching and the same-day forecast summary
//! - Message rendering and Telegram delivery
//! - [`DailyJob`], which ties these together for one run
//!
//! It is used by `weather-bot`, which only wires up logging and the clock.

pub mod config;
pub mod error;
pub mod forecast;
pub mod gate;
pub mod job;
pub mod message;
pub mod model;
pub mod notifier;
pub mod output;
pub mod provider;

pub use config::{Config, Location, TelegramConfig, Trigger};
pub use error::{BotError, BotResult};
pub use job::{DailyJob, RunOutcome};
pub use model::{DailySummary, DispatchResult, Forecast, ForecastEntry, RainPeriod, WeatherSnapshot};
pub use notifier::Notifier;
pub use output::RunOutput;
pub use provider::WeatherProvider;
