//! One hour-slot of the weekly grid and its rendering state.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// No span touches this hour.
    Empty,
    /// An open span covers the whole hour.
    Full,
    /// A span opens inside this hour and runs to its end.
    Start,
    /// A span that was already open closes inside this hour.
    End,
    /// A span opens and closes inside this hour.
    Partial,
    /// A span closes and the next one opens inside this hour.
    ReversePartial,
}

impl CellState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellState::Empty => "empty",
            CellState::Full => "full",
            CellState::Start => "start",
            CellState::End => "end",
            CellState::Partial => "partial",
            CellState::ReversePartial => "reverse_partial",
        }
    }
}

/// Fractional position of an instant inside its hour (seconds are ignored).
pub fn minute_factor(t: &NaiveDateTime) -> f64 {
    t.minute() as f64 / 60.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub day_index: usize,
    pub hour: u32,
    pub state: CellState,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub start_factor: f64,
    pub end_factor: f64,
    /// Where the open side of a REVERSE_PARTIAL cell stops drawing.
    pub tail_factor: f64,
    pub title: String,
    pub color: String,
    /// Log entries that landed in this hour.
    pub events: u32,
    /// More than two entries landed in this hour; the state shows the most
    /// recent classification only.
    pub overloaded: bool,
}

impl Cell {
    pub fn new(day_index: usize, hour: u32, color: &str) -> Self {
        Self {
            day_index,
            hour,
            state: CellState::Empty,
            start: None,
            end: None,
            start_factor: 0.0,
            end_factor: 0.0,
            tail_factor: 1.0,
            title: String::new(),
            color: color.to_string(),
            events: 0,
            overloaded: false,
        }
    }

    pub fn set_empty(&mut self) {
        self.state = CellState::Empty;
        self.start = None;
        self.end = None;
        self.start_factor = 0.0;
        self.end_factor = 0.0;
        self.title.clear();
    }

    pub fn set_full(&mut self) {
        self.state = CellState::Full;
        self.start = None;
        self.end = None;
        self.start_factor = 0.0;
        self.end_factor = 1.0;
    }

    pub fn set_start(&mut self, at: NaiveDateTime) {
        self.state = CellState::Start;
        self.start = Some(at);
        self.end = None;
        self.start_factor = minute_factor(&at);
        self.end_factor = 1.0;
    }

    pub fn set_end(&mut self, at: NaiveDateTime) {
        self.state = CellState::End;
        self.start = None;
        self.end = Some(at);
        self.start_factor = 0.0;
        self.end_factor = minute_factor(&at);
    }

    pub fn set_partial(&mut self, start: NaiveDateTime, end: NaiveDateTime) {
        self.state = CellState::Partial;
        self.start = Some(start);
        self.end = Some(end);
        self.start_factor = minute_factor(&start);
        self.end_factor = minute_factor(&end);
    }

    /// `closed_at` ends the previous span, `opened_at` starts the next one.
    pub fn set_reverse_partial(&mut self, closed_at: NaiveDateTime, opened_at: NaiveDateTime) {
        self.state = CellState::ReversePartial;
        self.start = Some(closed_at);
        self.end = Some(opened_at);
        self.start_factor = minute_factor(&closed_at);
        self.end_factor = minute_factor(&opened_at);
        self.tail_factor = 1.0;
    }

    /// The span opened in this REVERSE_PARTIAL cell stops at `at`.
    pub fn close_open_side(&mut self, at: NaiveDateTime) {
        self.tail_factor = minute_factor(&at).max(self.end_factor);
    }

    /// Record the synthetic end of a span that runs past the end of the day.
    /// State and factors are left untouched.
    pub fn mark_day_end(&mut self, at: NaiveDateTime) {
        self.end = Some(at);
    }

    /// Count one more log entry landing in this hour.
    pub fn register_event(&mut self) {
        self.events += 1;
        if self.events > 2 {
            self.overloaded = true;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state == CellState::Empty
    }
}
