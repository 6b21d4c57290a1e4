use super::datum_kind::DatumKind;
use crate::errors::{AppError, AppResult};
use crate::utils::time::{TIMESTAMP_FMT, parse_datetime};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

pub const MAX_STRING_LEN: usize = 256;

/// Kind-specific content of a logged value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Timestamp,
}

impl Payload {
    /// Parse the raw CLI input according to the data point kind.
    ///
    /// TIMESTAMP data points take no value; the literal `timestamp`
    /// is accepted for compatibility with older clients.
    pub fn parse(kind: DatumKind, raw: Option<&str>) -> AppResult<Self> {
        let invalid = |v: &str| AppError::InvalidValue {
            kind: kind.to_db_str().to_string(),
            value: v.to_string(),
        };

        if kind.is_timestamp() {
            return match raw {
                None | Some("timestamp") => Ok(Payload::Timestamp),
                Some(v) => Err(invalid(v)),
            };
        }

        let v = raw.ok_or_else(|| invalid("<missing>"))?.trim();

        match kind {
            DatumKind::Int => v.parse::<i64>().map(Payload::Int).map_err(|_| invalid(v)),
            DatumKind::Float => v
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Payload::Float)
                .ok_or_else(|| invalid(v)),
            DatumKind::String => {
                if v.is_empty() || v.chars().count() > MAX_STRING_LEN {
                    Err(invalid(v))
                } else {
                    Ok(Payload::Text(v.to_string()))
                }
            }
            DatumKind::Date => NaiveDate::parse_from_str(v, "%Y-%m-%d")
                .map(Payload::Date)
                .map_err(|_| invalid(v)),
            DatumKind::DateTime => parse_datetime(v)
                .map(Payload::DateTime)
                .ok_or_else(|| invalid(v)),
            DatumKind::Timestamp => Ok(Payload::Timestamp),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Payload::Int(i) => i.to_string(),
            Payload::Float(f) => f.to_string(),
            Payload::Text(s) => s.clone(),
            Payload::Date(d) => d.format("%Y-%m-%d").to_string(),
            Payload::DateTime(dt) => dt.format(TIMESTAMP_FMT).to_string(),
            Payload::Timestamp => "timestamp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Value {
    pub id: i64,
    pub datum_id: i64,
    pub timestamp: NaiveDateTime, // ⇔ data_values.timestamp (TEXT "YYYY-MM-DD HH:MM:SS")
    pub payload: Payload,
}

impl Value {
    pub fn new(datum_id: i64, timestamp: NaiveDateTime, payload: Payload) -> Self {
        Self {
            id: 0,
            datum_id,
            timestamp,
            payload,
        }
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FMT).to_string()
    }
}
