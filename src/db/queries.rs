use crate::core::calculator::week::TimeSpanLog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::datum::Datum;
use crate::models::datum_kind::DatumKind;
use crate::models::log_entry::LogEntry;
use crate::models::value::{Payload, Value};
use crate::utils::time::TIMESTAMP_FMT;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

fn parse_timestamp(col: usize, raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FMT)
        .map_err(|_| conversion_error(col, AppError::InvalidTime(raw.to_string())))
}

// ---------------------------------------------------------------------------
// data_points
// ---------------------------------------------------------------------------

pub fn map_datum(row: &Row) -> Result<Datum> {
    let kind_str: String = row.get("kind")?;
    let kind = DatumKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(3, AppError::InvalidKind(kind_str.clone())))?;

    Ok(Datum {
        id: row.get("id")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
        kind,
        unit: row.get("unit")?,
        color: row.get("color")?,
        comment: row.get("comment")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_datum(conn: &Connection, d: &Datum) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO data_points (name, slug, kind, unit, color, comment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            d.name,
            d.slug,
            d.kind.to_db_str(),
            d.unit,
            d.color,
            d.comment,
            d.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn slug_exists(conn: &Connection, slug: &str) -> Result<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM data_points WHERE slug = ?1 LIMIT 1")?;
    stmt.exists([slug])
}

pub fn find_datum_by_slug(conn: &Connection, slug: &str) -> AppResult<Option<Datum>> {
    let datum = conn
        .query_row(
            "SELECT * FROM data_points WHERE slug = ?1",
            [slug],
            map_datum,
        )
        .optional()?;
    Ok(datum)
}

/// Like `find_datum_by_slug`, but a missing data point is an error.
pub fn load_datum(conn: &Connection, slug: &str) -> AppResult<Datum> {
    find_datum_by_slug(conn, slug)?.ok_or_else(|| AppError::UnknownDatum(slug.to_string()))
}

pub fn load_data_points(conn: &Connection) -> AppResult<Vec<Datum>> {
    let mut stmt = conn.prepare("SELECT * FROM data_points ORDER BY name ASC, id ASC")?;
    let rows = stmt.query_map([], map_datum)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_values(conn: &Connection, datum_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM data_values WHERE datum_id = ?1",
        [datum_id],
        |row| row.get(0),
    )
}

pub fn delete_datum(conn: &Connection, datum_id: i64) -> Result<usize> {
    conn.execute("DELETE FROM data_points WHERE id = ?1", [datum_id])
}

// ---------------------------------------------------------------------------
// data_values
// ---------------------------------------------------------------------------

pub fn map_value(row: &Row, kind: DatumKind) -> Result<Value> {
    let ts_raw: String = row.get("timestamp")?;
    let timestamp = parse_timestamp(2, &ts_raw)?;

    let payload = match kind {
        DatumKind::Int => Payload::Int(row.get("int_value")?),
        DatumKind::Float => Payload::Float(row.get("float_value")?),
        DatumKind::String => Payload::Text(row.get("string_value")?),
        DatumKind::Date => {
            let raw: String = row.get("date_value")?;
            let d = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|_| conversion_error(6, AppError::InvalidDate(raw.clone())))?;
            Payload::Date(d)
        }
        DatumKind::DateTime => {
            let raw: String = row.get("datetime_value")?;
            Payload::DateTime(parse_timestamp(7, &raw)?)
        }
        DatumKind::Timestamp => Payload::Timestamp,
    };

    Ok(Value {
        id: row.get("id")?,
        datum_id: row.get("datum_id")?,
        timestamp,
        payload,
    })
}

pub fn insert_value(conn: &Connection, v: &Value) -> AppResult<i64> {
    let (mut int_v, mut float_v, mut string_v, mut date_v, mut datetime_v) =
        (None, None, None, None, None);

    match &v.payload {
        Payload::Int(i) => int_v = Some(*i),
        Payload::Float(f) => float_v = Some(*f),
        Payload::Text(s) => string_v = Some(s.clone()),
        Payload::Date(d) => date_v = Some(d.format("%Y-%m-%d").to_string()),
        Payload::DateTime(dt) => datetime_v = Some(dt.format(TIMESTAMP_FMT).to_string()),
        Payload::Timestamp => {}
    }

    conn.execute(
        "INSERT INTO data_values
             (datum_id, timestamp, int_value, float_value, string_value, date_value, datetime_value)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            v.datum_id,
            v.timestamp_str(),
            int_v,
            float_v,
            string_v,
            date_v,
            datetime_v,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Values of a data point with `start <= timestamp < end`, oldest first.
pub fn load_values_in_range(
    conn: &Connection,
    datum: &Datum,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> AppResult<Vec<Value>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM data_values
         WHERE datum_id = ?1 AND timestamp >= ?2 AND timestamp < ?3
         ORDER BY timestamp ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            datum.id,
            start.format(TIMESTAMP_FMT).to_string(),
            end.format(TIMESTAMP_FMT).to_string(),
        ],
        |row| map_value(row, datum.kind),
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Timestamps only: what the week engine needs.
pub fn fetch_entries(
    conn: &Connection,
    datum_id: i64,
    kind: DatumKind,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT timestamp FROM data_values
         WHERE datum_id = ?1 AND timestamp >= ?2 AND timestamp < ?3
         ORDER BY timestamp ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            datum_id,
            start.format(TIMESTAMP_FMT).to_string(),
            end.format(TIMESTAMP_FMT).to_string(),
        ],
        |row| {
            let raw: String = row.get(0)?;
            parse_timestamp(0, &raw)
        },
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(LogEntry::new(r?, kind));
    }
    Ok(out)
}

impl TimeSpanLog for DbPool {
    fn fetch_entries(
        &self,
        datum_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<LogEntry>> {
        fetch_entries(&self.conn, datum_id, DatumKind::Timestamp, start, end)
    }
}

pub fn load_log(conn: &Connection) -> Result<Vec<(i64, String, String, String, String)>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
