use chrono::{DateTime, NaiveTime, TimeZone, Timelike};

use crate::config::Trigger;

/// Inclusive send window, minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendWindow {
    start: (u32, u32),
    end: (u32, u32),
}

impl SendWindow {
    pub const MORNING: SendWindow = SendWindow { start: (7, 0), end: (8, 30) };

    /// Seconds are ignored, so 08:30:59 is still inside a window ending at 08:30.
    pub fn contains<T: Timelike>(&self, time: &T) -> bool {
        let at = (time.hour(), time.minute());
        self.start <= at && at <= self.end
    }
}

impl std::fmt::Display for SendWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{:02}-{}:{:02}am",
            self.start.0, self.start.1, self.end.0, self.end.1
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    OutsideWindow { at: NaiveTime, window: SendWindow },
    AlreadySent { date: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::OutsideWindow { at, window } => {
                write!(f, "local time is {}, outside {window} window", at.format("%I:%M %p"))
            }
            SkipReason::AlreadySent { date } => write!(f, "already sent weather for {date}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Skip(SkipReason),
}

/// Decide whether a run at `now` should send today's message.
///
/// A manual trigger always proceeds. Otherwise `now` must fall inside `window`
/// and `trigger.last_sent_date` must differ from today's `%Y-%m-%d` date.
pub fn evaluate<Tz: TimeZone>(
    now: &DateTime<Tz>,
    trigger: &Trigger,
    window: SendWindow,
) -> Decision {
    if trigger.manual {
        return Decision::Proceed;
    }

    if !window.contains(now) {
        return Decision::Skip(SkipReason::OutsideWindow { at: now.time(), window });
    }

    let today = now.date_naive().format("%Y-%m-%d").to_string();
    if trigger.last_sent_date == today {
        return Decision::Skip(SkipReason::AlreadySent { date: today });
    }

    Decision::Proceed
}
