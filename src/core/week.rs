use crate::core::calculator::week::{WeekAggregator, WeekView};
use crate::db::pool::DbPool;
use crate::db::queries::load_datum;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;

pub struct WeekLogic;

impl WeekLogic {
    /// Compute the week view of the TIMESTAMP data point `slug`.
    pub fn build(
        pool: &DbPool,
        slug: &str,
        year: Option<i32>,
        week: Option<u32>,
        now: NaiveDateTime,
    ) -> AppResult<WeekView> {
        let datum = load_datum(&pool.conn, slug)?;
        if !datum.kind.is_timestamp() {
            return Err(AppError::NotTimestamp(datum.slug));
        }

        WeekAggregator::new(pool).aggregate(&datum, year, week, now)
    }
}
