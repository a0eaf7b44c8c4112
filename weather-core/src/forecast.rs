use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::model::{DailySummary, Forecast, RainPeriod};

/// Rain is only worth mentioning above this chance, in percent.
pub const RAIN_THRESHOLD_PCT: f64 = 20.0;

/// Reduce the multi-day forecast to what matters for `today` in `tz`.
///
/// Entry timestamps are UTC, so each one is shifted into `tz` before its
/// calendar date is compared. Rain periods keep the provider's order.
pub fn summarize_today(forecast: &Forecast, today: NaiveDate, tz: Tz) -> DailySummary {
    let mut summary = DailySummary::default();

    for entry in &forecast.entries {
        let local = entry.time.with_timezone(&tz);
        if local.date_naive() != today {
            continue;
        }

        let temp = entry.temperature_c;
        summary.high = Some(summary.high.map_or(temp, |h| h.max(temp)));
        summary.low = Some(summary.low.map_or(temp, |l| l.min(temp)));

        let pct = entry.pop * 100.0;
        if pct > RAIN_THRESHOLD_PCT {
            summary.rain_periods.push(RainPeriod {
                time: local.format("%I:%M %p").to_string(),
                chance: pct.floor() as u8,
                description: entry.conditions.first().cloned().unwrap_or_default(),
            });
        }
    }

    summary
}
