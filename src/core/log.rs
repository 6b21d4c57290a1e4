use crate::db::pool::DbPool;
use crate::db::queries::load_log;
use crate::errors::AppResult;
use crate::utils::formatting::truncate;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const MAX_OP_WIDTH: usize = 60;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex"));

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// ANSI colour of an operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "datum_add" => Colour::Cyan,
        "datum_del" => Colour::Red,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Render the internal log table, one line per row.
    pub fn render_log(pool: &mut DbPool) -> AppResult<Vec<String>> {
        let entries = load_log(&pool.conn)?;

        let id_w = entries
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);

        let mut lines = Vec::with_capacity(entries.len());

        for (id, date, operation, target, message) in entries {
            let colour = color_for_operation(&operation);

            let op_target = if target.is_empty() {
                colour.paint(&operation).to_string()
            } else {
                format!("{} ({})", colour.paint(&operation), target)
            };

            // width computed on the visible text, without ANSI codes
            let visible = strip_ansi(&op_target);
            let shown = if visible.chars().count() > MAX_OP_WIDTH {
                truncate(&visible, MAX_OP_WIDTH)
            } else {
                op_target.clone()
            };
            let padding = " ".repeat(MAX_OP_WIDTH.saturating_sub(strip_ansi(&shown).chars().count()));

            lines.push(format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                shown,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            ));
        }

        Ok(lines)
    }

    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        println!("📜 Internal log:\n");
        for line in Self::render_log(pool)? {
            println!("{line}");
        }
        Ok(())
    }
}
