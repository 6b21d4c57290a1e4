use crate::cli::parser::{Commands, DatumAction};
use crate::config::Config;
use crate::core::datum::DatumLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREY, RESET, color_for_optional_field};
use crate::utils::table::Table;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn optional(v: Option<&str>) -> String {
    format!("{}{}{}", color_for_optional_field(v), v.unwrap_or("--"), RESET)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Datum { action } = cmd else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database_path())?;

    match action {
        DatumAction::Add {
            name,
            kind,
            unit,
            color,
            comment,
        } => {
            let datum = DatumLogic::create(
                &mut pool,
                name,
                *kind,
                unit.as_ref(),
                color.as_ref(),
                comment.as_ref(),
                &cfg.default_color,
            )?;
            success(format!(
                "Defined data point '{}' ({}), slug: {}",
                datum.name,
                datum.kind.label(),
                datum.slug
            ));
        }

        DatumAction::List => {
            let points = DatumLogic::list(&mut pool)?;
            if points.is_empty() {
                info("No data points defined yet.");
                return Ok(());
            }

            let mut table = Table::new(&["slug", "name", "kind", "unit", "color", "values", "comment"]);
            for (d, count) in points {
                table.add_row(vec![
                    d.slug.clone(),
                    d.name.clone(),
                    d.kind.label().to_string(),
                    optional(d.unit.as_deref()),
                    d.color.clone(),
                    count.to_string(),
                    optional(d.comment.as_deref()),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
        }

        DatumAction::Del { slug, force } => {
            if !*force
                && !ask_confirmation(&format!(
                    "Delete data point '{}' and ALL its values? This action is irreversible.",
                    slug
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            let removed = DatumLogic::delete(&mut pool, slug)?;
            success(format!(
                "Data point '{}' deleted {}({} values){}",
                slug, GREY, removed, RESET
            ));
        }
    }

    Ok(())
}
