//! Human-relative time expressions ("3 minutes ago").

use chrono::{DateTime, TimeDelta, Utc};

/// Units from largest to smallest, with their length in seconds.
const UNITS: &[(&str, i64)] = &[
    ("year", 365 * 86_400),
    ("month", 30 * 86_400),
    ("week", 7 * 86_400),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// Describe `then` relative to `now`, in English.
///
/// Differences under a minute read "moments ago" (or "moments from now");
/// otherwise the largest whole unit is used, e.g. "1 hour ago", "3 weeks ago".
pub fn relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta: TimeDelta = now.signed_duration_since(then);
    let seconds = delta.num_seconds();
    let past = seconds >= 0;
    let magnitude = seconds.unsigned_abs();

    let suffix = if past { "ago" } else { "from now" };
    for (unit, length) in UNITS {
        let length = length.unsigned_abs();
        let count = magnitude.checked_div(length).unwrap_or(0);
        if count >= 1 {
            let plural = if count == 1 { "" } else { "s" };
            return format!("{count} {unit}{plural} {suffix}");
        }
    }
    format!("moments {suffix}")
}
