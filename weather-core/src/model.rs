use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions at the configured location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
}

/// One 3-hour slice of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    /// Probability of precipitation, 0.0..=1.0.
    pub pop: f64,
    pub conditions: Vec<String>,
}

/// Forecast entries in the order the provider sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub entries: Vec<ForecastEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainPeriod {
    /// Local time of day, e.g. `02:00 PM`.
    pub time: String,
    pub chance: u8,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub rain_periods: Vec<RainPeriod>,
}

/// What the messaging provider said about a send.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    pub ok: bool,
    pub response: serde_json::Value,
}
