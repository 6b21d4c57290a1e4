use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// An ISO week, resolved to its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub year: i32,
    pub week: u32,
    pub start: NaiveDate,
}

impl WeekWindow {
    /// First instant of the week (Monday 00:00:00).
    pub fn start_instant(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// First instant after the week (next Monday 00:00:00); the window is half-open.
    pub fn end_instant(&self) -> NaiveDateTime {
        self.start_instant() + TimeDelta::days(7)
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        self.start.iter_days().take(7).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let iso = date.iso_week();
        iso.year() == self.year && iso.week() == self.week
    }
}

/// Resolve a `(year, week)` selector to a week window.
///
/// Missing parts default to the ISO year / week of `today`.
pub fn resolve_week(year: Option<i32>, week: Option<u32>, today: NaiveDate) -> AppResult<WeekWindow> {
    let current = today.iso_week();
    let year = year.unwrap_or(current.year());
    let week = week.unwrap_or(current.week());

    let start = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
        .ok_or_else(|| AppError::InvalidWeek(format!("{year}-W{week:02}")))?;

    Ok(WeekWindow { year, week, start })
}

pub fn generate_from_period(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(dm) = NaiveDate::parse_from_str(&(p.to_string() + "-01"), "%Y-%m-%d") {
        return month_bounds(dm.year(), dm.month()).ok_or_else(|| format!("Invalid period: {}", p));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(format!("Invalid period: {}", p))
}

/// Parse `--period`: a single period or `start:end`, returning inclusive bounds.
pub fn resolve_period(period: Option<&str>, today: NaiveDate) -> AppResult<(NaiveDate, NaiveDate)> {
    let Some(p) = period else {
        return month_bounds(today.year(), today.month())
            .ok_or_else(|| AppError::InvalidDate(today.to_string()));
    };

    if let Some((start, end)) = p.split_once(':') {
        let (first, _) = generate_from_period(start.trim()).map_err(AppError::InvalidDate)?;
        let (_, last) = generate_from_period(end.trim()).map_err(AppError::InvalidDate)?;
        if last < first {
            return Err(AppError::InvalidDate(format!("empty range: {p}")));
        }
        return Ok((first, last));
    }

    generate_from_period(p).map_err(AppError::InvalidDate)
}

pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

pub fn weekday_name(index: usize) -> &'static str {
    const DAYS: [&str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];
    DAYS.get(index).copied().unwrap_or("SOMEDAY")
}

pub fn short_weekday_name(index: usize) -> &'static str {
    &weekday_name(index)[..3]
}
