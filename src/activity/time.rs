//! Relative-time labels for activity timestamps

use chrono::{DateTime, Datelike, Utc};

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;
const MINUTES_PER_WEEK: i64 = 7 * MINUTES_PER_DAY;

/// Coarse "how long ago" label
///
/// Whole minutes elapsed pick the bucket: under one minute is "Just now",
/// then minutes, hours and days; a week or more prints the calendar date as
/// `M/D/YYYY` (UTC). Timestamps in the future read "Just now".
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    // Whole minutes, floored; the future clamps to zero
    let minutes = (now - timestamp).num_seconds().div_euclid(60).max(0);

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < MINUTES_PER_HOUR {
        format!("{}m ago", minutes)
    } else if minutes < MINUTES_PER_DAY {
        format!("{}h ago", minutes / MINUTES_PER_HOUR)
    } else if minutes < MINUTES_PER_WEEK {
        format!("{}d ago", minutes / MINUTES_PER_DAY)
    } else {
        format!(
            "{}/{}/{}",
            timestamp.month(),
            timestamp.day(),
            timestamp.year()
        )
    }
}

/// [`format_relative_time`] against the current clock
pub fn format_relative_time_now(timestamp: DateTime<Utc>) -> String {
    format_relative_time(timestamp, Utc::now())
}
