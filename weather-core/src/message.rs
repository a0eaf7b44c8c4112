use chrono::{DateTime, TimeZone};

use crate::model::{DailySummary, WeatherSnapshot};

/// At most this many rain periods make it into the message.
pub const MAX_RAIN_LINES: usize = 4;

/// Render the daily message in Telegram's legacy Markdown.
///
/// Output depends only on the arguments; the line layout is what the chat
/// client renders, so it is kept stable.
pub fn format_message<Tz: TimeZone>(
    location_label: &str,
    current: &WeatherSnapshot,
    today: &DailySummary,
    now: &DateTime<Tz>,
) -> String {
    let mut lines = vec![
        format!(
            "☀️ **{location_label} Weather** — {}",
            now.date_naive().format("%A, %d %B")
        ),
        String::new(),
        format!(
            "**Right now:** {:.1}°C ({})",
            current.temperature_c,
            title_case(&current.condition)
        ),
        format!("**Feels like:** {:.1}°C", current.feels_like_c),
        String::new(),
    ];

    if let (Some(low), Some(high)) = (today.low, today.high) {
        lines.push(format!("**Today's range:** {low:.1}°C → {high:.1}°C"));
    }

    lines.push(format!("**Humidity:** {}%", current.humidity_pct));
    lines.push(String::new());

    if today.rain_periods.is_empty() {
        lines.push("☂️ **Rain:** Not expected today".to_string());
    } else {
        lines.push("🌧️ **Rain expected:**".to_string());
        for period in today.rain_periods.iter().take(MAX_RAIN_LINES) {
            lines.push(format!("  • {}: {}% chance", period.time, period.chance));
        }
    }

    lines.push(String::new());
    lines.push("Have a good day! 🚴".to_string());

    lines.join("\n")
}

/// Error report sent through the notifier when a run fails.
pub fn format_error(error: &str) -> String {
    format!("⚠️ Weather bot error:\n{error}")
}

/// Upper-case the first letter of every word, lower-case the rest.
/// Any non-alphabetic character starts a new word.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;

    for c in text.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }

    out
}
