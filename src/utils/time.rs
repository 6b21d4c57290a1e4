//! Time utilities: parsing timestamps, formatting durations and clock times.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, TimeDelta, Timelike};

/// Storage and display format of every logged instant.
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

pub fn parse_optional_datetime(input: Option<&String>) -> AppResult<Option<NaiveDateTime>> {
    if let Some(s) = input {
        let dt = parse_datetime(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(dt))
    } else {
        Ok(None)
    }
}

/// Current local wall-clock instant, truncated to whole seconds.
pub fn now() -> NaiveDateTime {
    let now = chrono::Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Render a duration as `{d}d {h}h {m}m {s}s`; the day segment is omitted
/// when zero.
pub fn format_duration(delta: TimeDelta) -> String {
    let sign = if delta < TimeDelta::zero() { "-" } else { "" };
    let total = delta.num_seconds().abs();

    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{sign}{days}d {hours}h {minutes}m {seconds}s")
    } else {
        format!("{sign}{hours}h {minutes}m {seconds}s")
    }
}

pub fn clock(dt: &NaiveDateTime) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// `"HH:MM:SS - HH:MM:SS (duration)"` label of a resolved span.
pub fn span_title(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    format!(
        "{} - {} ({})",
        clock(start),
        clock(end),
        format_duration(*end - *start)
    )
}
