use clap::ValueEnum;
use serde::Serialize;

/// The kind of values a data point accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum DatumKind {
    Int,
    Float,
    String,
    Date,
    #[value(name = "datetime")]
    DateTime,
    Timestamp,
}

impl DatumKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DatumKind::Int => "INT",
            DatumKind::Float => "FLOAT",
            DatumKind::String => "STRING",
            DatumKind::Date => "DATE",
            DatumKind::DateTime => "DATETIME",
            DatumKind::Timestamp => "TIMESTAMP",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "INT" => Some(DatumKind::Int),
            "FLOAT" => Some(DatumKind::Float),
            "STRING" => Some(DatumKind::String),
            "DATE" => Some(DatumKind::Date),
            "DATETIME" => Some(DatumKind::DateTime),
            "TIMESTAMP" => Some(DatumKind::Timestamp),
            _ => None,
        }
    }

    /// Human readable label, as shown in `datum list`.
    pub fn label(&self) -> &'static str {
        match self {
            DatumKind::Int => "Integer",
            DatumKind::Float => "Float",
            DatumKind::String => "String",
            DatumKind::Date => "Date",
            DatumKind::DateTime => "Date & time",
            DatumKind::Timestamp => "Timestamp",
        }
    }

    pub fn is_timestamp(&self) -> bool {
        matches!(self, DatumKind::Timestamp)
    }
}
