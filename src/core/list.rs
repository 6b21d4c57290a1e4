use crate::db::pool::DbPool;
use crate::db::queries::{load_datum, load_values_in_range};
use crate::errors::AppResult;
use crate::models::datum::Datum;
use crate::models::value::Value;
use chrono::{NaiveDate, NaiveTime, TimeDelta};

pub struct ListLogic;

impl ListLogic {
    /// Values logged for `slug` between two dates, both inclusive.
    pub fn values(
        pool: &mut DbPool,
        slug: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<(Datum, Vec<Value>)> {
        let datum = load_datum(&pool.conn, slug)?;
        let start = from.and_time(NaiveTime::MIN);
        let end = to.and_time(NaiveTime::MIN) + TimeDelta::days(1);

        let values = load_values_in_range(&pool.conn, &datum, start, end)?;
        Ok((datum, values))
    }
}
