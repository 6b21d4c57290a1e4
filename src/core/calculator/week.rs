//! Weekly timeline aggregation.
//!
//! Takes the log entries of one TIMESTAMP data point over one ISO week and
//! classifies each of the 7×24 hour cells, resolving spans (pairs of entries)
//! into titles and per-day totals. Spans crossing midnight are split: the
//! first day is closed at 23:59:00 and the span continues from 00:00:00 of
//! the next day.

use super::cell::CellState;
use super::day_row::{DayRow, HOURS};
use super::open_span::{OpenSpan, resolve_open_span};
use super::pair_sums::{DayEntries, pairwise_day_sums};
use crate::errors::AppResult;
use crate::models::datum::Datum;
use crate::models::datum_kind::DatumKind;
use crate::models::log_entry::LogEntry;
use crate::utils::date::{WeekWindow, resolve_week};
use crate::utils::time::format_duration;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::collections::BTreeMap;

/// Source of log entries for the week engine.
pub trait TimeSpanLog {
    /// Entries of `datum_id` with `start <= timestamp < end`, oldest first.
    fn fetch_entries(
        &self,
        datum_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<LogEntry>>;
}

#[derive(Debug, Clone)]
pub struct WeekView {
    pub datum_name: String,
    pub slug: String,
    pub kind: DatumKind,
    pub color: String,
    pub window: WeekWindow,
    pub now: NaiveDateTime,
    pub is_current_week: bool,
    /// Monday..Sunday
    pub rows: Vec<DayRow>,
    pub entry_sums: BTreeMap<NaiveDate, DayEntries>,
    pub total: TimeDelta,
    pub workweek_average: TimeDelta,
}

impl WeekView {
    pub fn week_start(&self) -> NaiveDate {
        self.window.start
    }

    pub fn week_number(&self) -> u32 {
        self.window.week
    }

    pub fn total_str(&self) -> String {
        format_duration(self.total)
    }

    pub fn average_str(&self) -> String {
        format_duration(self.workweek_average)
    }

    pub fn entry_sum(&self, date: NaiveDate) -> TimeDelta {
        self.entry_sums
            .get(&date)
            .map(|d| d.sum)
            .unwrap_or_else(TimeDelta::zero)
    }

    pub fn entry_sum_str(&self, date: NaiveDate) -> String {
        format_duration(self.entry_sum(date))
    }

    pub fn malformed_closes(&self) -> u32 {
        self.rows.iter().map(|r| r.malformed_closes).sum()
    }
}

pub struct WeekAggregator<'a, L: TimeSpanLog + ?Sized> {
    log: &'a L,
}

impl<'a, L: TimeSpanLog + ?Sized> WeekAggregator<'a, L> {
    pub fn new(log: &'a L) -> Self {
        Self { log }
    }

    /// Build the week view of `datum`.
    ///
    /// `year`/`week` default to the ISO week containing `now`.
    pub fn aggregate(
        &self,
        datum: &Datum,
        year: Option<i32>,
        week: Option<u32>,
        now: NaiveDateTime,
    ) -> AppResult<WeekView> {
        let window = resolve_week(year, week, now.date())?;
        let entries =
            self.log
                .fetch_entries(datum.id, window.start_instant(), window.end_instant())?;

        Ok(build_week(datum, window, entries, now))
    }
}

/// Classify the whole week from an entry snapshot.
pub fn build_week(
    datum: &Datum,
    window: WeekWindow,
    mut entries: Vec<LogEntry>,
    now: NaiveDateTime,
) -> WeekView {
    let is_current_week = window.contains(now.date());

    // in the current week, entries after now belong to future hours
    let (from, to) = (window.start_instant(), window.end_instant());
    entries.retain(|e| {
        e.timestamp >= from && e.timestamp < to && (!is_current_week || e.timestamp <= now)
    });
    entries.sort_by_key(|e| e.timestamp);

    let entry_sums = pairwise_day_sums(&entries);

    let mut rows: Vec<DayRow> = window
        .days()
        .into_iter()
        .enumerate()
        .map(|(i, date)| DayRow::new(date, i, &datum.color))
        .collect();

    let mut open: Option<OpenSpan> = None;
    let mut cursor = 0;

    for row in rows.iter_mut() {
        for hour in 0..HOURS {
            let hour_end = row.hour_start(hour) + TimeDelta::hours(1);

            while let Some(entry) = entries.get(cursor)
                && entry.timestamp < hour_end
            {
                open = apply_entry(row, hour, entry.timestamp, open);
                cursor += 1;
            }

            if let Some(span) = open {
                let resolution =
                    resolve_open_span(&row.cells[hour], row.date, span, now, is_current_week);
                row.cells[hour] = resolution.cell;

                if let Some(at) = resolution.closed_at {
                    close_span(row, hour, span, at, resolution.delta);
                    open = None;
                }
            }
        }

        if let Some(span) = open {
            open = close_day(row, span);
        }
    }

    let total = rows
        .iter()
        .fold(TimeDelta::zero(), |acc, row| acc + row.total);

    WeekView {
        datum_name: datum.name.clone(),
        slug: datum.slug.clone(),
        kind: datum.kind,
        color: datum.color.clone(),
        window,
        now,
        is_current_week,
        rows,
        entry_sums,
        total,
        workweek_average: total / 5,
    }
}

/// Feed one edge into the cell at `index`. Returns the span left open.
fn apply_entry(
    row: &mut DayRow,
    index: usize,
    at: NaiveDateTime,
    open: Option<OpenSpan>,
) -> Option<OpenSpan> {
    let cell = &mut row.cells[index];
    cell.register_event();

    match open {
        None => {
            if cell.state == CellState::End {
                let closed_at = cell.end.unwrap_or(at);
                cell.set_reverse_partial(closed_at, at);
            } else {
                cell.set_start(at);
            }
            Some(OpenSpan { start: at })
        }
        Some(span) => {
            match cell.state {
                CellState::Start => {
                    let start = cell.start.unwrap_or(span.start);
                    cell.set_partial(start, at);
                }
                CellState::ReversePartial => {
                    let start = cell.end.unwrap_or(span.start);
                    cell.set_partial(start, at);
                }
                _ => cell.set_end(at),
            }

            let delta = (at - span.start).max(TimeDelta::zero());
            close_span(row, index, span, at, delta);
            None
        }
    }
}

/// Title the cells of a span closing at `at` in cell `index` and accrue
/// `delta` on the row. Closes without a resolvable start are counted instead.
fn close_span(row: &mut DayRow, index: usize, span: OpenSpan, at: NaiveDateTime, delta: TimeDelta) {
    let resolved = if row.cells[index].state == CellState::ReversePartial {
        row.apply_title(index..=index, &span.start, &at);
        true
    } else {
        row.set_span_end(index).is_some()
    };

    if resolved {
        row.add_duration(delta);
    } else {
        row.malformed_closes += 1;
    }
}

/// Close a span still open at the end of the row at 23:59:00 and carry it
/// into the next day.
fn close_day(row: &mut DayRow, span: OpenSpan) -> Option<OpenSpan> {
    let last = HOURS - 1;
    let state = row.cells[last].state;

    if !matches!(
        state,
        CellState::Full | CellState::Start | CellState::ReversePartial
    ) {
        return Some(span);
    }

    // a span opened during 23:59 starts after the synthetic end of the day
    let end_of_day = row.end_of_day().max(span.start);
    if state != CellState::ReversePartial {
        row.cells[last].mark_day_end(end_of_day);
    }

    let delta = (end_of_day - span.start).max(TimeDelta::zero());
    close_span(row, last, span, end_of_day, delta);

    Some(OpenSpan {
        start: row.midnight() + TimeDelta::days(1),
    })
}
