//! Time formatting for labels and clocks

const MS_PER_SECOND: u64 = 1_000;
const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * 60;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Short interval label for the timeline
///
/// `H:MM` for an hour or more, `M:SS` otherwise (`0:00`, `1:30`, `2:05`).
pub fn format_time_interval_hour_min(millis: u64) -> String {
    let total_seconds = millis / MS_PER_SECOND;
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    if hours > 0 {
        format!("{}:{:02}", hours, minutes)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Playback clock text
///
/// `H:MM:SS` for an hour or more, `MM:SS` otherwise (`00:00`, `03:07`).
pub fn format_time_interval_hour_min_sec(millis: u64) -> String {
    let total_seconds = millis / MS_PER_SECOND;
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Long-form duration for record details, e.g. `2 days 01h:00m:05s`
pub fn format_duration(millis: u64) -> String {
    let total_seconds = millis / MS_PER_SECOND;
    let years = total_seconds / SECONDS_PER_YEAR;
    let days = (total_seconds % SECONDS_PER_YEAR) / SECONDS_PER_DAY;
    let hours = (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    let mut parts = Vec::with_capacity(3);
    if years > 0 {
        parts.push(format!("{} {}", years, plural(years, "year", "years")));
    }
    if days > 0 {
        parts.push(format!("{} {}", days, plural(days, "day", "days")));
    }
    if hours > 0 {
        parts.push(format!("{:02}h:{:02}m:{:02}s", hours, minutes, seconds));
    } else {
        parts.push(format!("{:02}m:{:02}s", minutes, seconds));
    }
    parts.join(" ")
}

fn plural(count: u64, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}
