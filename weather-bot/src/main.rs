//! Binary crate for the `weather-bot` job.
//!
//! One invocation is one run: read configuration from the environment,
//! decide whether it is time to send, and deliver the morning message.
//! Scheduling and the "last sent date" store belong to whatever starts it.

use chrono::Utc;
use weather_core::{Config, DailyJob};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    log::debug!(
        "Location: {} ({:.4}, {:.4}) in {}",
        config.location.label,
        config.location.latitude,
        config.location.longitude,
        config.location.timezone
    );

    let job = DailyJob::from_config(&config);
    let outcome = job.run(Utc::now(), &config.trigger).await;
    log::debug!("Run finished: {outcome:?}");

    Ok(())
}
