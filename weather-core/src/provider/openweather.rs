use anyhow::{Context, anyhow};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    BotError, BotResult, Location,
    error::{Endpoint, truncate_body},
    model::{Forecast, ForecastEntry, WeatherSnapshot},
};

use super::{ProviderCode, WeatherProvider};

const BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn fetch(
        &self,
        endpoint: Endpoint,
        location: &Location,
    ) -> BotResult<(StatusCode, String)> {
        let what = describe(endpoint);
        let url = format!("{BASE_URL}/{}", path(endpoint));
        let lat = location.latitude.to_string();
        let lon = location.longitude.to_string();

        // The query carries the API key, so errors are stripped of their URL.
        let res = self
            .http
            .get(url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        Ok((status, body))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, location: &Location) -> BotResult<WeatherSnapshot> {
        let (status, body) = self.fetch(Endpoint::Current, location).await?;
        parse_current(status, &body)
    }

    async fn forecast(&self, location: &Location) -> BotResult<Forecast> {
        let (status, body) = self.fetch(Endpoint::Forecast, location).await?;
        parse_forecast(status, &body)
    }
}

fn path(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Current => "weather",
        Endpoint::Forecast => "forecast",
    }
}

fn describe(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Current => "current weather",
        Endpoint::Forecast => "5-day forecast",
    }
}

#[derive(Debug, Deserialize)]
struct OwStatus {
    cod: Option<ProviderCode>,
    /// A string on errors, but `0` on a successful forecast.
    message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

/// OpenWeather reports failures in the body (`cod` / `message`), often with a
/// matching HTTP status, so the body is inspected before the HTTP status.
fn decode<T: DeserializeOwned>(endpoint: Endpoint, status: StatusCode, body: &str) -> BotResult<T> {
    let envelope: OwStatus = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(err) if status.is_success() => {
            return Err(anyhow::Error::new(err)
                .context(format!("Failed to parse OpenWeather {} JSON", describe(endpoint)))
                .into());
        }
        Err(_) => {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                describe(endpoint),
                status,
                truncate_body(body),
            )
            .into());
        }
    };

    if !envelope.cod.as_ref().is_some_and(ProviderCode::is_success) {
        let message = match envelope.message {
            Some(serde_json::Value::String(s)) => s,
            Some(other) if !other.is_null() => other.to_string(),
            _ => "Unknown error".to_string(),
        };
        return Err(BotError::provider(endpoint, message));
    }

    serde_json::from_str(body)
        .with_context(|| format!("Failed to parse OpenWeather {} JSON", describe(endpoint)))
        .map_err(BotError::from)
}

fn parse_current(status: StatusCode, body: &str) -> BotResult<WeatherSnapshot> {
    let parsed: OwCurrentResponse = decode(Endpoint::Current, status, body)?;

    let condition = parsed
        .weather
        .first()
        .map(|w| w.description.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    Ok(WeatherSnapshot {
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        condition,
        humidity_pct: parsed.main.humidity,
    })
}

fn parse_forecast(status: StatusCode, body: &str) -> BotResult<Forecast> {
    let parsed: OwForecastResponse = decode(Endpoint::Forecast, status, body)?;

    let entries = parsed
        .list
        .into_iter()
        .map(|e| -> anyhow::Result<ForecastEntry> {
            let time = DateTime::from_timestamp(e.dt, 0).ok_or_else(|| {
                anyhow!("OpenWeather forecast entry has invalid timestamp {}", e.dt)
            })?;

            Ok(ForecastEntry {
                time,
                temperature_c: e.main.temp,
                pop: e.pop,
                conditions: e.weather.into_iter().map(|w| w.description).collect(),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Forecast { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const CURRENT_OK: &str = r#"{
        "coord": {"lon": 151.2093, "lat": -33.8688},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {
            "temp": 17.62, "feels_like": 17.41, "temp_min": 16.1, "temp_max": 18.9,
            "pressure": 1015, "humidity": 78
        },
        "wind": {"speed": 4.63, "deg": 170},
        "dt": 1718000000,
        "name": "Sydney",
        "cod": 200
    }"#;

    const FORECAST_OK: &str = r#"{
        "cod": "200",
        "message": 0,
        "cnt": 3,
        "list": [
            {
                "dt": 1718020800,
                "main": {"temp": 18.0, "feels_like": 17.5, "humidity": 70},
                "weather": [{"description": "clear sky"}],
                "pop": 0.1
            },
            {
                "dt": 1718031600,
                "main": {"temp": 24.0, "feels_like": 24.2, "humidity": 60},
                "weather": [{"description": "light rain"}],
                "pop": 0.35
            },
            {
                "dt": 1718042400,
                "main": {"temp": 20.0, "feels_like": 19.8, "humidity": 65},
                "weather": []
            }
        ],
        "city": {"name": "Sydney", "country": "AU"}
    }"#;

    #[test]
    fn parses_current_conditions() {
        let snapshot = parse_current(StatusCode::OK, CURRENT_OK).expect("current should parse");

        assert_eq!(
            snapshot,
            WeatherSnapshot {
                temperature_c: 17.62,
                feels_like_c: 17.41,
                condition: "light rain".into(),
                humidity_pct: 78,
            }
        );
    }

    #[test]
    fn current_without_weather_list_is_unknown() {
        let body = r#"{"cod": 200, "main": {"temp": 10.0, "feels_like": 9.0, "humidity": 50}}"#;
        let snapshot = parse_current(StatusCode::OK, body).expect("current should parse");

        assert_eq!(snapshot.condition, "Unknown");
    }

    #[test]
    fn parses_forecast_entries_in_order() {
        let forecast = parse_forecast(StatusCode::OK, FORECAST_OK).expect("forecast should parse");

        assert_eq!(forecast.entries.len(), 3);
        assert_eq!(
            forecast.entries[0].time,
            Utc.timestamp_opt(1718020800, 0).single().expect("valid timestamp")
        );
        assert_eq!(forecast.entries[1].pop, 0.35);
        assert_eq!(forecast.entries[1].conditions, vec!["light rain".to_string()]);
        assert_eq!(forecast.entries[2].pop, 0.0);
        assert!(forecast.entries[2].conditions.is_empty());
    }

    #[test]
    fn forecast_without_list_is_empty() {
        let forecast =
            parse_forecast(StatusCode::OK, r#"{"cod": "200"}"#).expect("forecast should parse");
        assert!(forecast.entries.is_empty());
    }

    #[test]
    fn current_error_code_carries_provider_message() {
        let body = r#"{"cod": 401, "message": "invalid API key"}"#;
        let err = parse_current(StatusCode::UNAUTHORIZED, body).unwrap_err();

        assert!(err.is_provider());
        assert_eq!(err.to_string(), "Weather API error: invalid API key");
    }

    #[test]
    fn forecast_error_code_as_string_carries_provider_message() {
        let body = r#"{"cod": "404", "message": "city not found"}"#;
        let err = parse_forecast(StatusCode::NOT_FOUND, body).unwrap_err();

        assert!(err.is_provider());
        assert_eq!(err.to_string(), "Forecast API error: city not found");
    }

    #[test]
    fn missing_code_is_a_provider_error() {
        let err = parse_current(StatusCode::OK, r#"{"main": {}}"#).unwrap_err();
        assert_eq!(err.to_string(), "Weather API error: Unknown error");
    }

    #[test]
    fn non_json_error_body_reports_http_status() {
        let err = parse_forecast(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").unwrap_err();

        assert!(!err.is_provider());
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("Bad Gateway"));
    }

    #[test]
    fn non_json_success_body_is_a_parse_error() {
        let err = parse_current(StatusCode::OK, "not json").unwrap_err();

        assert!(!err.is_provider());
        assert!(err.to_string().contains("Failed to parse OpenWeather current weather JSON"));
    }
}
