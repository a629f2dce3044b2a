//! Coarse human-readable durations ("2 hours 5 minutes").

use chrono::{DateTime, Utc};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Beyond this many days the hour remainder is no longer shown.
const DETAILED_DAYS: i64 = 3;

fn plural(value: i64, unit: &str) -> String {
    if value == 1 {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}

/// Formats an elapsed duration in milliseconds.
///
/// Values are truncated, never rounded. Negative durations are clamped to
/// zero. With `short` set, only the leading unit is kept. A `suffix` is
/// appended after a single space.
pub fn timestamp_to_human_readable(millis: i64, short: bool, suffix: Option<&str>) -> String {
    let millis = millis.max(0);

    let text = if millis < MINUTE_MS {
        "just now".to_string()
    } else if millis < HOUR_MS {
        plural(millis / MINUTE_MS, "minute")
    } else if millis < DAY_MS {
        let hours = millis / HOUR_MS;
        let minutes = (millis % HOUR_MS) / MINUTE_MS;
        if minutes > 0 && !short {
            format!("{} {}", plural(hours, "hour"), plural(minutes, "minute"))
        } else {
            plural(hours, "hour")
        }
    } else if millis < DETAILED_DAYS * DAY_MS {
        let days = millis / DAY_MS;
        let hours = (millis % DAY_MS) / HOUR_MS;
        if hours > 0 && !short {
            format!("{} {}", plural(days, "day"), plural(hours, "hour"))
        } else {
            plural(days, "day")
        }
    } else {
        plural(millis / DAY_MS, "day")
    };

    match suffix {
        Some(suffix) => format!("{} {}", text, suffix),
        None => text,
    }
}

/// Renders a point in time relative to `now`, or `N/A` when absent.
pub fn relative_timestamp(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match date {
        Some(date) => {
            let elapsed = (now - date).num_milliseconds();
            if elapsed < MINUTE_MS {
                timestamp_to_human_readable(elapsed, false, None)
            } else {
                timestamp_to_human_readable(elapsed, false, Some("ago"))
            }
        }
        None => "N/A".to_string(),
    }
}
