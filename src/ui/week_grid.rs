//! Terminal rendering of a computed week: one line per day, a few character
//! slots per hour, filled where a span covers the hour.

use crate::core::calculator::cell::{Cell, CellState};
use crate::core::calculator::week::WeekView;
use crate::utils::colors::{GREY, RESET, colorize_duration, parse_hex_color};
use crate::utils::date::short_weekday_name;
use crate::utils::formatting::{bold, pad_left, pad_right};
use ansi_term::Colour;

/// Character slots drawn per hour.
pub const SLOTS_PER_HOUR: usize = 3;

const FILLED: &str = "█";
const EMPTY: &str = "·";

/// Which slots of a cell are covered by a span.
///
/// A non-empty fill range always covers at least the slot it starts in, so
/// short spans stay visible.
pub fn fill_mask(cell: &Cell, slots: usize) -> Vec<bool> {
    let ranges: Vec<(f64, f64)> = match cell.state {
        CellState::Empty => vec![],
        CellState::Full => vec![(0.0, 1.0)],
        CellState::Start => vec![(cell.start_factor, 1.0)],
        CellState::End => vec![(0.0, cell.end_factor)],
        CellState::Partial => vec![(cell.start_factor, cell.end_factor)],
        CellState::ReversePartial => {
            vec![(0.0, cell.start_factor), (cell.end_factor, cell.tail_factor)]
        },
    };

    let mut mask = vec![false; slots];
    if slots == 0 {
        return mask;
    }

    for (from, to) in ranges {
        if to <= from {
            continue;
        }
        let mut any = false;
        for (i, slot) in mask.iter_mut().enumerate() {
            let center = (i as f64 + 0.5) / slots as f64;
            if center >= from && center < to {
                *slot = true;
                any = true;
            }
        }
        if !any {
            let i = ((from * slots as f64) as usize).min(slots - 1);
            mask[i] = true;
        }
    }

    mask
}

fn paint_cell(cell: &Cell, colour: Colour) -> String {
    fill_mask(cell, SLOTS_PER_HOUR)
        .into_iter()
        .map(|filled| {
            if filled {
                colour.paint(FILLED).to_string()
            } else {
                format!("{GREY}{EMPTY}{RESET}")
            }
        })
        .collect()
}

fn hour_ruler() -> String {
    (0..24)
        .map(|h| pad_right(&format!("{h:02}"), SLOTS_PER_HOUR))
        .collect()
}

/// Full grid as printed by the `week` command.
pub fn render(view: &WeekView, show_titles: bool) -> String {
    let (r, g, b) = parse_hex_color(&view.color).unwrap_or((135, 187, 255));
    let colour = Colour::RGB(r, g, b);

    let mut out = String::new();

    out.push_str(&bold(&format!(
        "{} ({}) – week {:02}/{} – {} → {}",
        view.datum_name,
        view.slug,
        view.window.week,
        view.window.year,
        view.window.start,
        view.window.start + chrono::TimeDelta::days(6),
    )));
    out.push_str("\n\n");

    let label_w = 10;
    out.push_str(&pad_right("", label_w));
    out.push_str(&hour_ruler());
    out.push_str(&format!(" {:>14} {:>14}\n", "total", "entries"));

    for row in &view.rows {
        let label = format!(
            "{} {}",
            short_weekday_name(row.day_index),
            row.date.format("%m-%d")
        );
        out.push_str(&pad_right(&label, label_w));

        for cell in &row.cells {
            out.push_str(&paint_cell(cell, colour));
        }

        out.push(' ');
        out.push_str(&colorize_duration(&pad_left(&row.total_str(), 14)));
        out.push(' ');
        out.push_str(&colorize_duration(&pad_left(&view.entry_sum_str(row.date), 14)));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!("Week total:       {}\n", view.total_str()));
    out.push_str(&format!("Workweek average: {}\n", view.average_str()));

    if show_titles {
        out.push('\n');
        for row in &view.rows {
            let mut titles: Vec<&str> = Vec::new();
            for cell in &row.cells {
                if !cell.title.is_empty() && titles.last() != Some(&cell.title.as_str()) {
                    titles.push(&cell.title);
                }
            }
            if titles.is_empty() {
                continue;
            }
            out.push_str(&format!("{} {}\n", short_weekday_name(row.day_index), row.date));
            for t in titles {
                out.push_str(&format!("    {t}\n"));
            }
        }
    }

    out
}
