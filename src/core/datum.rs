use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{
    count_values, delete_datum, insert_datum, load_data_points, load_datum, slug_exists,
};
use crate::errors::{AppError, AppResult};
use crate::models::datum::Datum;
use crate::models::datum_kind::DatumKind;
use crate::utils::colors::normalize_hex_color;
use crate::utils::slug::{underscore_slugify, unique_slug};

pub const MAX_NAME_LEN: usize = 20;
pub const MAX_UNIT_LEN: usize = 30;
pub const MAX_COMMENT_LEN: usize = 100;

fn non_empty(s: Option<&String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn check_len(field: &str, value: &Option<String>, max: usize) -> AppResult<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(AppError::InvalidName(format!(
            "{field} longer than {max} characters: '{v}'"
        ))),
        _ => Ok(()),
    }
}

/// High-level business logic for data point definitions.
pub struct DatumLogic;

impl DatumLogic {
    /// Define a new data point. The slug is derived from the name and made
    /// unique among existing data points.
    pub fn create(
        pool: &mut DbPool,
        name: &str,
        kind: DatumKind,
        unit: Option<&String>,
        color: Option<&String>,
        comment: Option<&String>,
        default_color: &str,
    ) -> AppResult<Datum> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::InvalidName(format!(
                "'{}' (1 to {} characters)",
                name, MAX_NAME_LEN
            )));
        }

        let raw_color = color.map(String::as_str).unwrap_or(default_color);
        let color =
            normalize_hex_color(raw_color).ok_or_else(|| AppError::InvalidColor(raw_color.into()))?;

        let unit = non_empty(unit);
        let comment = non_empty(comment);
        check_len("unit", &unit, MAX_UNIT_LEN)?;
        check_len("comment", &comment, MAX_COMMENT_LEN)?;

        let base = underscore_slugify(name);
        let mut lookup_err = None;
        let slug = unique_slug(&base, |candidate| match slug_exists(&pool.conn, candidate) {
            Ok(taken) => taken,
            Err(e) => {
                lookup_err = Some(e);
                false
            }
        });
        if let Some(e) = lookup_err {
            return Err(e.into());
        }

        let mut datum = Datum::new(name, &slug, kind, unit, &color, comment);
        datum.id = insert_datum(&pool.conn, &datum)?;

        ttlog(
            &pool.conn,
            "datum_add",
            &datum.slug,
            &format!("Defined {} data point '{}'", kind.to_db_str(), datum.name),
        )?;

        Ok(datum)
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Vec<(Datum, i64)>> {
        let points = load_data_points(&pool.conn)?;
        let mut out = Vec::with_capacity(points.len());
        for d in points {
            let n = count_values(&pool.conn, d.id)?;
            out.push((d, n));
        }
        Ok(out)
    }

    /// Delete a data point together with all its logged values.
    /// Returns the number of values removed.
    pub fn delete(pool: &mut DbPool, slug: &str) -> AppResult<i64> {
        let datum = load_datum(&pool.conn, slug)?;

        let removed = pool.with_conn(|conn| {
            let tx = conn.transaction()?;
            let removed = count_values(&tx, datum.id)?;
            tx.execute("DELETE FROM data_values WHERE datum_id = ?1", [datum.id])?;
            delete_datum(&tx, datum.id)?;
            tx.commit()?;
            Ok(removed)
        })?;

        ttlog(
            &pool.conn,
            "datum_del",
            &datum.slug,
            &format!("Deleted data point '{}' and {} values", datum.name, removed),
        )?;

        Ok(removed)
    }
}
