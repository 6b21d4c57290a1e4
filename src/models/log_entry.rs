use super::datum_kind::DatumKind;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One edge on a data point timeline, as consumed by the week engine.
///
/// Entries of TIMESTAMP data points carry nothing but the instant; whether an
/// entry opens or closes a span is decided by its position in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub kind: DatumKind,
}

impl LogEntry {
    pub fn new(timestamp: NaiveDateTime, kind: DatumKind) -> Self {
        Self { timestamp, kind }
    }
}
