//! One calendar day of the weekly grid: 24 cells plus the day total.

use super::cell::{Cell, CellState};
use crate::utils::time::{format_duration, span_title};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::ops::RangeInclusive;

pub const HOURS: usize = 24;

/// Outcome of the backward walk started by a closing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanBounds {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Cells covered by the span inside this row.
    pub cells: RangeInclusive<usize>,
}

#[derive(Debug, Clone)]
pub struct DayRow {
    pub date: NaiveDate,
    pub day_index: usize,
    pub cells: Vec<Cell>,
    pub total: TimeDelta,
    /// Closes whose start could not be found in this row.
    pub malformed_closes: u32,
}

impl DayRow {
    pub fn new(date: NaiveDate, day_index: usize, color: &str) -> Self {
        let cells = (0..HOURS as u32)
            .map(|hour| Cell::new(day_index, hour, color))
            .collect();

        Self {
            date,
            day_index,
            cells,
            total: TimeDelta::zero(),
            malformed_closes: 0,
        }
    }

    pub fn midnight(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }

    /// 23:59:00 of this day, the synthetic end of spans still open at midnight.
    pub fn end_of_day(&self) -> NaiveDateTime {
        self.midnight() + TimeDelta::minutes(23 * 60 + 59)
    }

    pub fn hour_start(&self, hour: usize) -> NaiveDateTime {
        self.midnight() + TimeDelta::hours(hour as i64)
    }

    /// Walk back from `index` to the cell where the span closing there began.
    ///
    /// Pure: nothing is written. `None` means an EMPTY cell was reached first,
    /// i.e. the close has no matching open in this row.
    pub fn find_span(&self, index: usize) -> Option<SpanBounds> {
        let index = index.min(HOURS - 1);
        let mut start: Option<NaiveDateTime> = None;
        let mut end: Option<NaiveDateTime> = None;
        let mut lowest = index;
        let mut matched = false;

        for i in (0..=index).rev() {
            let cell = &self.cells[i];
            lowest = i;

            match cell.state {
                CellState::Start | CellState::Partial => {
                    start = cell.start;
                    end = end.or(cell.end);
                    matched = true;
                }
                CellState::ReversePartial => {
                    // the open side of the cell
                    start = cell.end;
                    matched = true;
                }
                CellState::Full => {
                    if cell.hour as usize == HOURS - 1 && end.is_none() {
                        end = Some(cell.end.unwrap_or_else(|| self.end_of_day()));
                    }
                }
                CellState::End => {
                    end = end.or(cell.end);
                }
                CellState::Empty => return None,
            }

            if matched {
                break;
            }
        }

        // Walked off the start of the row: the span was carried over from
        // the previous day.
        if !matched {
            start = Some(self.midnight());
        }

        Some(SpanBounds {
            start: start?,
            end: end?,
            cells: lowest..=index,
        })
    }

    /// Resolve the span closing at `index` and title every cell it covers.
    ///
    /// Does not touch `total`: the caller accrues the closing delta.
    pub fn set_span_end(&mut self, index: usize) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let bounds = self.find_span(index)?;
        self.apply_title(bounds.cells.clone(), &bounds.start, &bounds.end);
        Some((bounds.start, bounds.end))
    }

    pub fn apply_title(
        &mut self,
        cells: RangeInclusive<usize>,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) {
        let title = span_title(start, end);
        if let Some(covered) = self.cells.get_mut(cells) {
            for cell in covered {
                cell.title = title.clone();
            }
        }
    }

    pub fn add_duration(&mut self, delta: TimeDelta) {
        self.total += delta;
    }

    pub fn total_str(&self) -> String {
        format_duration(self.total)
    }

    pub fn total_seconds(&self) -> i64 {
        self.total.num_seconds()
    }
}
