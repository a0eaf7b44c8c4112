use thiserror::Error;

/// Which weather endpoint reported a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Current,
    Forecast,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Current => f.write_str("Weather"),
            Endpoint::Forecast => f.write_str("Forecast"),
        }
    }
}

#[derive(Debug, Error)]
pub enum BotError {
    /// The weather provider answered, but with a non-success `cod`.
    #[error("{endpoint} API error: {message}")]
    Provider { endpoint: Endpoint, message: String },

    /// Anything else: transport, parsing, I/O.
    #[error(transparent)]
    Unhandled(#[from] anyhow::Error),
}

impl BotError {
    pub fn provider(endpoint: Endpoint, message: impl Into<String>) -> Self {
        BotError::Provider { endpoint, message: message.into() }
    }

    #[cfg(test)]
    pub(crate) fn is_provider(&self) -> bool {
        matches!(self, BotError::Provider { .. })
    }
}

pub type BotResult<T> = Result<T, BotError>;

/// Shorten a response body for inclusion in an error message.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn provider_error_names_the_endpoint() {
        let current = BotError::provider(Endpoint::Current, "invalid API key");
        let forecast = BotError::provider(Endpoint::Forecast, "city not found");

        assert_eq!(current.to_string(), "Weather API error: invalid API key");
        assert_eq!(forecast.to_string(), "Forecast API error: city not found");
        assert!(current.is_provider());
    }

    #[test]
    fn unhandled_error_keeps_context_chain_in_alternate_form() {
        let err: BotError = Err::<(), _>(anyhow!("connection reset"))
            .context("Failed to send request to OpenWeather")
            .unwrap_err()
            .into();

        assert!(!err.is_provider());
        assert_eq!(err.to_string(), "Failed to send request to OpenWeather");
        assert_eq!(
            format!("{err:#}"),
            "Failed to send request to OpenWeather: connection reset"
        );
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        assert_eq!(truncate_body("short"), "short");

        let long = "é".repeat(250);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
