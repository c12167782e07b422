//! Human-readable durations for announcements

/// `pluralize(1, "minute", "minutes")` → `"1 minute"`
pub fn pluralize(count: u32, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

/// Spell out a duration, e.g. `"1 minute 5 seconds"`.
///
/// With `with_seconds == false` the seconds part is dropped once there is at
/// least a minute. A zero duration reads `"0 seconds"`.
pub fn time_to_string(total_seconds: u32, with_seconds: bool) -> String {
    let minutes = total_seconds / 60;
    let seconds = if with_seconds { total_seconds % 60 } else { 0 };

    let mut out = String::new();
    if minutes != 0 {
        out.push_str(&pluralize(minutes, "minute", "minutes"));
    }
    if minutes != 0 && seconds != 0 {
        out.push(' ');
    }
    if seconds != 0 || minutes == 0 {
        out.push_str(&pluralize(seconds, "second", "seconds"));
    }
    out
}

/// Countdown display, `M:SS`
pub fn clock_display(total_seconds: u32) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
