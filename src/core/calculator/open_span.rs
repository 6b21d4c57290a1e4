//! Resolution of a span that is still open after an hour's entries.

use super::cell::{Cell, CellState};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// A span whose opening edge has been seen but whose closing edge has not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSpan {
    pub start: NaiveDateTime,
}

/// Where an hour-slot sits relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourPosition {
    Past,
    Current,
    Future,
}

impl HourPosition {
    /// Outside the current week every hour counts as past.
    pub fn of(date: NaiveDate, hour: u32, now: NaiveDateTime, is_current_week: bool) -> Self {
        if !is_current_week {
            return HourPosition::Past;
        }

        let hour_start = date.and_time(NaiveTime::MIN) + TimeDelta::hours(hour as i64);
        let hour_end = hour_start + TimeDelta::hours(1);

        if now >= hour_end {
            HourPosition::Past
        } else if now < hour_start {
            HourPosition::Future
        } else {
            HourPosition::Current
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenSpanResolution {
    pub cell: Cell,
    /// Set when the span was closed at "now" in this cell.
    pub closed_at: Option<NaiveDateTime>,
    pub delta: TimeDelta,
}

/// Decide what an hour-slot shows while `span` is still open, and whether
/// the span closes at `now` in it.
///
/// - past hours: an EMPTY cell becomes FULL
/// - the hour containing `now`: the span ends at `now`
/// - future hours: the cell is reset to EMPTY
pub fn resolve_open_span(
    cell: &Cell,
    date: NaiveDate,
    span: OpenSpan,
    now: NaiveDateTime,
    is_current_week: bool,
) -> OpenSpanResolution {
    let mut cell = cell.clone();
    let mut closed_at = None;

    match HourPosition::of(date, cell.hour, now, is_current_week) {
        HourPosition::Past => {
            if cell.is_empty() {
                cell.set_full();
            }
        }
        HourPosition::Current => {
            match cell.state {
                CellState::Empty | CellState::Full => cell.set_end(now),
                CellState::Start => {
                    let start = cell.start.unwrap_or(span.start);
                    cell.set_partial(start, now);
                }
                CellState::ReversePartial => cell.close_open_side(now),
                _ => {}
            }
            closed_at = Some(now);
        }
        HourPosition::Future => cell.set_empty(),
    }

    let delta = closed_at
        .map(|end| (end - span.start).max(TimeDelta::zero()))
        .unwrap_or_else(TimeDelta::zero);

    OpenSpanResolution {
        cell,
        closed_at,
        delta,
    }
}
