use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::date::{resolve_period, today};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { slug, period } = cmd {
        let (from, to) = resolve_period(period.as_deref(), today())?;

        let mut pool = DbPool::new(&cfg.database_path())?;
        let (datum, values) = ListLogic::values(&mut pool, slug, from, to)?;

        if values.is_empty() {
            info(format!("No values for {} between {} and {}", datum.slug, from, to));
            return Ok(());
        }

        let unit = datum.unit.clone().unwrap_or_default();
        let mut table = Table::new(&["id", "timestamp", "value"]);
        for v in &values {
            let shown = if unit.is_empty() || datum.kind.is_timestamp() {
                v.payload.display()
            } else {
                format!("{} {}", v.payload.display(), unit)
            };
            table.add_row(vec![v.id.to_string(), v.timestamp_str(), shown]);
        }

        header(format!("{} ({}) – {} → {}", datum.name, datum.kind.label(), from, to));
        print!("{}", table.render(&cfg.separator_char));
    }

    Ok(())
}
