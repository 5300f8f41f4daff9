// ABOUTME: Normalizes itunes:duration values into the `M:SS` strings the site displays.
// ABOUTME: Accepts plain seconds, MM:SS and HH:MM:SS; anything else becomes "00:00".

/// Returned for missing or unrecognized durations.
pub const UNKNOWN_DURATION: &str = "00:00";

/// Canonicalizes a feed duration.
///
/// - missing/empty: `"00:00"`
/// - `MM:SS`: returned as given
/// - `HH:MM:SS`: hours folded into minutes, `0:05:30` -> `5:30`, `1:02:03` -> `62:03`
/// - plain seconds: `90` -> `1:30`
///
/// Minutes are never zero-padded in the `HH:MM:SS` case while the seconds
/// conversion pads seconds only; display code has to accept both.
pub fn normalize_duration(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_DURATION.to_string();
    };

    let parts: Vec<&str> = raw.split(':').collect();
    let normalized = match parts.as_slice() {
        [minutes, seconds] => (is_digits(minutes) && is_seconds_field(seconds)).then(|| raw.to_string()),
        [hours, minutes, seconds] => fold_hours(hours, minutes, seconds),
        [seconds] => from_seconds(seconds),
        _ => None,
    };

    normalized.unwrap_or_else(|| UNKNOWN_DURATION.to_string())
}

fn fold_hours(hours: &str, minutes: &str, seconds: &str) -> Option<String> {
    let hours: u64 = hours.parse().ok()?;
    let minutes: u64 = minutes.parse().ok()?;
    if !is_seconds_field(seconds) {
        return None;
    }
    // seconds are carried over verbatim
    Some(format!("{}:{}", hours * 60 + minutes, seconds))
}

fn from_seconds(value: &str) -> Option<String> {
    let total = match value.parse::<u64>() {
        Ok(secs) => secs,
        Err(_) => {
            let secs = value.parse::<f64>().ok().filter(|s| s.is_finite() && *s >= 0.0)?;
            secs.trunc() as u64
        }
    };
    Some(format!("{}:{:02}", total / 60, total % 60))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_seconds_field(s: &str) -> bool {
    is_digits(s) && s.len() <= 2
}
