use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::week::WeekLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::WeekExport;
use crate::ui::messages::warning;
use crate::ui::week_grid;
use crate::utils::time::{now, parse_optional_datetime};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Week {
        slug,
        week,
        year,
        now: now_arg,
        titles,
        json,
    } = cmd
    {
        let slug = slug
            .clone()
            .or_else(|| cfg.default_datum.clone())
            .ok_or_else(|| {
                AppError::Config("no data point given and no default_datum configured".into())
            })?;
        let now = parse_optional_datetime(now_arg.as_ref())?.unwrap_or_else(now);

        let pool = DbPool::new(&cfg.database_path())?;
        let view = WeekLogic::build(&pool, &slug, *year, *week, now)?;

        if *json {
            let out = serde_json::to_string_pretty(&WeekExport::from_view(&view))
                .map_err(|e| AppError::Export(e.to_string()))?;
            println!("{out}");
            return Ok(());
        }

        print!("{}", week_grid::render(&view, *titles || cfg.show_titles));

        let malformed = view.malformed_closes();
        if malformed > 0 {
            warning(format!(
                "{} close(s) without a matching start were left out of the totals",
                malformed
            ));
        }

        let overloaded: usize = view
            .rows
            .iter()
            .map(|r| r.cells.iter().filter(|c| c.overloaded).count())
            .sum();
        if overloaded > 0 {
            warning(format!(
                "{} hour(s) hold more than two entries; only the latest span is drawn there",
                overloaded
            ));
        }
    }

    Ok(())
}
