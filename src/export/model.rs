// src/export/model.rs

use crate::core::calculator::cell::CellState;
use crate::core::calculator::week::WeekView;
use crate::utils::date::weekday_name;
use serde::Serialize;

/// Serializable snapshot of a computed week (JSON export and `week --json`).
#[derive(Serialize, Clone, Debug)]
pub struct WeekExport {
    pub datum: String,
    pub slug: String,
    pub color: String,
    pub year: i32,
    pub week: u32,
    pub week_start: String,
    pub total: String,
    pub total_seconds: i64,
    pub workweek_average: String,
    pub workweek_average_seconds: i64,
    pub days: Vec<DayExport>,
}

#[derive(Serialize, Clone, Debug)]
pub struct DayExport {
    pub date: String,
    pub weekday: String,
    pub total: String,
    pub total_seconds: i64,
    pub entry_sum: String,
    pub entries: Vec<String>,
    pub cells: Vec<CellExport>,
}

#[derive(Serialize, Clone, Debug)]
pub struct CellExport {
    pub hour: u32,
    pub state: CellState,
    pub start_factor: f64,
    pub end_factor: f64,
    pub tail_factor: f64,
    pub title: String,
}

/// One CSV line per hour cell.
#[derive(Serialize, Clone, Debug)]
pub struct CellRecord {
    pub date: String,
    pub weekday: String,
    pub hour: u32,
    pub state: String,
    pub start_factor: f64,
    pub end_factor: f64,
    pub title: String,
    pub day_total: String,
}

impl WeekExport {
    pub fn from_view(view: &WeekView) -> Self {
        let days = view
            .rows
            .iter()
            .map(|row| DayExport {
                date: row.date.format("%Y-%m-%d").to_string(),
                weekday: weekday_name(row.day_index).to_string(),
                total: row.total_str(),
                total_seconds: row.total_seconds(),
                entry_sum: view.entry_sum_str(row.date),
                entries: view
                    .entry_sums
                    .get(&row.date)
                    .map(|d| {
                        d.entries
                            .iter()
                            .map(|e| e.timestamp.format("%H:%M:%S").to_string())
                            .collect()
                    })
                    .unwrap_or_default(),
                cells: row
                    .cells
                    .iter()
                    .map(|c| CellExport {
                        hour: c.hour,
                        state: c.state,
                        start_factor: c.start_factor,
                        end_factor: c.end_factor,
                        tail_factor: c.tail_factor,
                        title: c.title.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            datum: view.datum_name.clone(),
            slug: view.slug.clone(),
            color: view.color.clone(),
            year: view.window.year,
            week: view.window.week,
            week_start: view.week_start().format("%Y-%m-%d").to_string(),
            total: view.total_str(),
            total_seconds: view.total.num_seconds(),
            workweek_average: view.average_str(),
            workweek_average_seconds: view.workweek_average.num_seconds(),
            days,
        }
    }
}

pub(crate) fn cell_records(view: &WeekView) -> Vec<CellRecord> {
    view.rows
        .iter()
        .flat_map(|row| {
            let day_total = row.total_str();
            row.cells.iter().map(move |c| CellRecord {
                date: row.date.format("%Y-%m-%d").to_string(),
                weekday: weekday_name(row.day_index).to_string(),
                hour: c.hour,
                state: c.state.as_str().to_string(),
                start_factor: c.start_factor,
                end_factor: c.end_factor,
                title: c.title.clone(),
                day_total: day_total.clone(),
            })
        })
        .collect()
}
