//! Scheduled-time parsing, the overdue rule and display formatting.
//!
//! # Responsibility
//! - Decide whether an untaken medication is past its grace period.
//! - Parse and render `HH:MM` schedule strings.
//!
//! # Invariants
//! - [`is_overdue`] never panics; malformed schedule input fails safe to
//!   "not overdue" because it runs inside a display computation, not a
//!   command.
//! - The deadline is anchored to `now`'s calendar date. A `23:50` schedule
//!   with a 30-minute window has its deadline at 00:20 past midnight, but the
//!   anchor date never rolls over.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static TIME_OF_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]?[0-9]|2[0-3]):([0-5][0-9])$").expect("valid time regex"));

/// Parses a 24-hour `HH:MM` string into a time of day.
///
/// A single-digit hour (`9:30`) is accepted; seconds are not. Returns `None`
/// for anything else.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let captures = TIME_OF_DAY_RE.captures(value)?;
    let hour: u32 = captures.get(1)?.as_str().parse().ok()?;
    let minute: u32 = captures.get(2)?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Returns whether the grace period for today's dose has elapsed.
///
/// # Contract
/// - Deadline = `now.date()` at `time_to_take`, plus `window_minutes`.
/// - True iff `now` is strictly after the deadline; exactly at the deadline
///   is not overdue.
/// - Malformed `time_to_take` returns `false` instead of erroring.
pub fn is_overdue(time_to_take: &str, window_minutes: u32, now: NaiveDateTime) -> bool {
    let Some(time) = parse_time_of_day(time_to_take) else {
        return false;
    };
    let scheduled = now.date().and_time(time);
    let deadline = scheduled + Duration::minutes(i64::from(window_minutes));
    now > deadline
}

/// Canonicalizes a time-of-day string to zero-padded `HH:MM`.
///
/// Text ordering over the canonical form matches chronological ordering,
/// which the store's time-ascending listing relies on. Returns `None` when
/// the input does not parse.
pub fn canonical_time_of_day(value: &str) -> Option<String> {
    parse_time_of_day(value).map(|time| time.format("%H:%M").to_string())
}

/// Renders an `HH:MM` schedule string as `h:mm AM/PM` for display.
///
/// Falls back to the input unchanged when it does not parse.
pub fn format_time_12h(time: &str) -> String {
    match parse_time_of_day(time) {
        Some(parsed) => parsed.format("%-I:%M %p").to_string(),
        None => time.to_string(),
    }
}

/// Renders a `YYYY-MM-DD` date string as `Mon DD, YYYY` for display.
///
/// Falls back to the input unchanged when it does not parse.
pub fn format_date_long(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%b %d, %Y").to_string(),
        Err(_) => date.to_string(),
    }
}
