// src/utils/time.rs

//! Contest time classification and human-facing time labels.
//!
//! Every function takes the evaluation instant explicitly. Callers capture
//! `now` once per evaluation pass so that upcoming, ongoing and past stay
//! mutually exclusive for the same contest.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::models::ContestStatus;

/// Label returned by [`time_remaining`] once the start has been reached.
pub const ENDED: &str = "Ended";

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Start is strictly after `now`.
pub fn is_upcoming(start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start > now
}

/// End is strictly before `now`.
pub fn is_past(end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    end < now
}

/// `now` lies within `[start, end]`.
pub fn is_ongoing(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start <= now && now <= end
}

/// Classify a contest window at `now`.
pub fn classify(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> ContestStatus {
    if is_upcoming(start, now) {
        ContestStatus::Upcoming
    } else if is_past(end, now) {
        ContestStatus::Past
    } else {
        ContestStatus::Ongoing
    }
}

/// Countdown label until `start`, e.g. `2d 5h`, `1h 0m` or `12m`.
///
/// Units are truncated: once days are shown, leftover minutes are dropped.
pub fn time_remaining(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if start <= now {
        return ENDED.to_string();
    }
    collapse_units((start - now).num_seconds())
}

/// Duration label for a length in seconds, using the same policy as
/// [`time_remaining`].
pub fn format_duration(seconds: i64) -> String {
    collapse_units(seconds.max(0))
}

fn collapse_units(total_secs: i64) -> String {
    let days = total_secs / SECS_PER_DAY;
    let hours = (total_secs % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (total_secs % SECS_PER_HOUR) / SECS_PER_MINUTE;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format an instant in the host timezone, e.g. `Mon, Jan 6, 3:05 PM`.
pub fn format_date(instant: DateTime<Utc>) -> String {
    format_date_in(instant, &Local)
}

/// Format an instant in an explicit timezone.
pub fn format_date_in<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant
        .with_timezone(tz)
        .format("%a, %b %-d, %-I:%M %p")
        .to_string()
}
