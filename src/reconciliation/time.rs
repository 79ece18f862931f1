//! Timestamp parsing and minute arithmetic.
//!
//! All interval lengths in the engine are whole minutes obtained by rounding
//! the millisecond difference to the nearest minute, halves rounding up.

use chrono::{DateTime, NaiveDateTime, Utc};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Offset-bearing layouts accepted besides RFC 3339 (e.g. Postgres text
/// output such as `2026-01-13 09:00:00+00`).
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Offset-less layouts, read as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an ISO instant into UTC.
///
/// Returns `None` for anything that is not a recognisable instant; callers
/// skip such rows rather than fail.
///
/// # Examples
///
/// ```
/// use attendance_engine::reconciliation::parse_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let expected = Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap();
/// assert_eq!(parse_timestamp("2026-01-13T09:00:00Z"), Some(expected));
/// assert_eq!(parse_timestamp("2026-01-13T19:00:00+10:00"), Some(expected));
/// assert_eq!(parse_timestamp("2026-01-13 09:00:00+00"), Some(expected));
/// assert_eq!(parse_timestamp("13/01/2026"), None);
/// ```
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Returns `end - start` in whole minutes, rounding half up. May be negative.
pub fn rounded_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds();
    (millis + MILLIS_PER_MINUTE / 2).div_euclid(MILLIS_PER_MINUTE)
}

/// Returns `end - start` in whole minutes, rounding half up, floored at zero.
///
/// ```
/// use attendance_engine::reconciliation::whole_minutes_between;
/// use chrono::{TimeZone, Utc};
///
/// let nine = Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap();
/// let noon = Utc.with_ymd_and_hms(2026, 1, 13, 12, 0, 0).unwrap();
/// assert_eq!(whole_minutes_between(nine, noon), 180);
/// assert_eq!(whole_minutes_between(noon, nine), 0);
/// ```
pub fn whole_minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    rounded_minutes(start, end).max(0)
}

/// Renders a raw timestamp field for diagnostics.
pub(crate) fn quoted(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => format!("'{}'", raw),
        None => "missing".to_string(),
    }
}
