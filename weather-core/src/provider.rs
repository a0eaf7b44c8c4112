use crate::{
    BotResult, Config, Location,
    model::{Forecast, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions and the short-range forecast.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &Location) -> BotResult<WeatherSnapshot>;

    /// 3-hourly entries covering several days, in provider order.
    async fn forecast(&self, location: &Location) -> BotResult<Forecast>;
}

/// Provider-reported status code.
///
/// OpenWeather sends `cod` as a number on some endpoints and as a string on
/// others; both forms deserialize to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawCode")]
pub struct ProviderCode(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Number(i64),
    Text(String),
}

impl From<RawCode> for ProviderCode {
    fn from(raw: RawCode) -> Self {
        match raw {
            RawCode::Number(n) => ProviderCode(n.to_string()),
            RawCode::Text(s) => ProviderCode(s.trim().to_string()),
        }
    }
}

impl ProviderCode {
    pub fn is_success(&self) -> bool {
        self.0 == "200"
    }
}

/// Construct the weather provider from config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    Box::new(OpenWeatherProvider::new(config.openweather_api_key.clone()))
}
