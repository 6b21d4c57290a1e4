//! Per-day pairwise diffs of log entries (display column only).
//!
//! Within a day, entries are taken two by two: the first of each pair gets a
//! zero delta, the second gets the time elapsed since the first. Parity
//! restarts every day, so spans crossing midnight are not counted here.

use crate::models::log_entry::LogEntry;
use crate::utils::time::format_duration;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDelta {
    pub timestamp: NaiveDateTime,
    pub delta: TimeDelta,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntries {
    pub entries: Vec<EntryDelta>,
    pub sum: TimeDelta,
}

impl Default for DayEntries {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            sum: TimeDelta::zero(),
        }
    }
}

impl DayEntries {
    pub fn sum_str(&self) -> String {
        format_duration(self.sum)
    }
}

/// Bucket entries by calendar day and assign pairwise deltas.
pub fn pairwise_day_sums(entries: &[LogEntry]) -> BTreeMap<NaiveDate, DayEntries> {
    let mut days: BTreeMap<NaiveDate, DayEntries> = BTreeMap::new();

    for entry in entries {
        let day = days.entry(entry.timestamp.date()).or_default();

        let delta = if day.entries.len() % 2 == 1 {
            let previous = day.entries[day.entries.len() - 1].timestamp;
            entry.timestamp - previous
        } else {
            TimeDelta::zero()
        };

        day.sum += delta;
        day.entries.push(EntryDelta {
            timestamp: entry.timestamp,
            delta,
        });
    }

    days
}
