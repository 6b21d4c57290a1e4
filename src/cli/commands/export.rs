use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::time::{now, parse_optional_datetime};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        slug,
        format,
        file,
        week,
        year,
        now: now_arg,
        force,
    } = cmd
    {
        let now = parse_optional_datetime(now_arg.as_ref())?.unwrap_or_else(now);
        let mut pool = DbPool::new(&cfg.database_path())?;
        ExportLogic::export(&mut pool, slug, *format, file, *year, *week, now, *force)?;
    }
    Ok(())
}
