use crate::core::week::WeekLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ensure_writable, export_csv, export_json};
use chrono::NaiveDateTime;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Compute the week of `slug` and write it to `file`.
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &mut DbPool,
        slug: &str,
        format: ExportFormat,
        file: &str,
        year: Option<i32>,
        week: Option<u32>,
        now: NaiveDateTime,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let view = WeekLogic::build(pool, slug, year, week, now)?;

        match format {
            ExportFormat::Csv => export_csv(&view, path)?,
            ExportFormat::Json => export_json(&view, path)?,
        }

        ttlog(
            &pool.conn,
            "export",
            slug,
            &format!(
                "{} export of week {}-W{:02} to {}",
                format.as_str(),
                view.window.year,
                view.window.week,
                path.display()
            ),
        )?;

        Ok(())
    }
}
