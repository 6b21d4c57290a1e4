use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{insert_value, load_datum};
use crate::errors::AppResult;
use crate::models::datum::Datum;
use crate::models::value::{Payload, Value};
use chrono::NaiveDateTime;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Log a value against the data point `slug` at instant `at`.
    pub fn apply(
        pool: &mut DbPool,
        slug: &str,
        raw_value: Option<&str>,
        at: NaiveDateTime,
    ) -> AppResult<(Datum, Value)> {
        let datum = load_datum(&pool.conn, slug)?;
        let payload = Payload::parse(datum.kind, raw_value)?;

        let mut value = Value::new(datum.id, at, payload);
        value.id = insert_value(&pool.conn, &value)?;

        ttlog(
            &pool.conn,
            "add",
            &datum.slug,
            &format!("{} at {}: {}", datum.name, value.timestamp_str(), value.payload.display()),
        )?;

        Ok((datum, value))
    }
}
