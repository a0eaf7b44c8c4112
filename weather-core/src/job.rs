use anyhow::Context;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    BotResult, Config, Location, Trigger,
    forecast::summarize_today,
    gate::{self, Decision, SendWindow, SkipReason},
    message::{format_error, format_message},
    notifier::{Notifier, notifier_from_config},
    output::{GithubOutput, RunOutput, SENT_DATE_KEY},
    provider::{WeatherProvider, provider_from_config},
};

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Skipped(SkipReason),
    Sent { date: String },
    /// The chat provider answered but did not accept the message.
    Rejected { response: serde_json::Value },
    /// Something failed; `reported` tells whether the error report got through.
    Failed { error: String, reported: bool },
}

/// One morning run: gate, fetch, reduce, format, notify, record.
#[derive(Debug)]
pub struct DailyJob {
    location: Location,
    window: SendWindow,
    provider: Box<dyn WeatherProvider>,
    notifier: Box<dyn Notifier>,
    output: Box<dyn RunOutput>,
}

impl DailyJob {
    pub fn new(
        location: Location,
        provider: Box<dyn WeatherProvider>,
        notifier: Box<dyn Notifier>,
        output: Box<dyn RunOutput>,
    ) -> Self {
        Self { location, window: SendWindow::MORNING, provider, notifier, output }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.location.clone(),
            provider_from_config(config),
            notifier_from_config(config),
            Box::new(GithubOutput::new(config.output_path.clone())),
        )
    }

    /// Run once at instant `now`.
    ///
    /// Never returns an error: failures after the gate are reported to the
    /// chat and folded into [`RunOutcome::Failed`].
    pub async fn run(&self, now: DateTime<Utc>, trigger: &Trigger) -> RunOutcome {
        let local = now.with_timezone(&self.location.timezone);

        if let Decision::Skip(reason) = gate::evaluate(&local, trigger, self.window) {
            log::info!("⏭️ Skipping - {reason}");
            return RunOutcome::Skipped(reason);
        }

        log::info!("🕐 {} time: {}", self.location.label, local.format("%I:%M %p %Z"));

        match self.deliver(&local).await {
            Ok(outcome) => outcome,
            Err(err) => {
                let error = format!("{err:#}");
                log::error!("❌ Error: {error}");
                let reported = self.report_failure(&error).await;
                RunOutcome::Failed { error, reported }
            }
        }
    }

    async fn deliver(&self, local: &DateTime<Tz>) -> BotResult<RunOutcome> {
        let current = self.provider.current(&self.location).await?;
        let forecast = self.provider.forecast(&self.location).await?;

        let today = summarize_today(&forecast, local.date_naive(), self.location.timezone);
        log::debug!(
            "Today: high {:?}, low {:?}, {} rain period(s)",
            today.high,
            today.low,
            today.rain_periods.len()
        );

        let text = format_message(&self.location.label, &current, &today, local);
        let result = self.notifier.send(&text).await?;

        if !result.ok {
            log::warn!("❌ Failed to send message: {}", result.response);
            return Ok(RunOutcome::Rejected { response: result.response });
        }

        log::info!("✅ Weather update sent successfully!");

        let date = local.date_naive().format("%Y-%m-%d").to_string();
        self.output
            .record(SENT_DATE_KEY, &date)
            .context("Failed to record sent date")?;

        Ok(RunOutcome::Sent { date })
    }

    /// Best effort; a failure here is only logged.
    async fn report_failure(&self, error: &str) -> bool {
        match self.notifier.send(&format_error(error)).await {
            Ok(result) => result.ok,
            Err(err) => {
                log::warn!("Could not report error to chat: {err:#}");
                false
            }
        }
    }
}
