use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::{now, parse_optional_datetime};

/// Log a value against a data point.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { slug, value, at } = cmd {
        let at = parse_optional_datetime(at.as_ref())?.unwrap_or_else(now);

        let mut pool = DbPool::new(&cfg.database_path())?;
        let (datum, value) = AddLogic::apply(&mut pool, slug, value.as_deref(), at)?;

        success(format!(
            "saved: {} at {}: {}",
            datum.slug,
            value.timestamp_str(),
            value.payload.display()
        ));
    }

    Ok(())
}
