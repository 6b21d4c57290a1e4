//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid data point kind: {0}")]
    InvalidKind(String),

    #[error("Invalid color (expected #RRGGBB): {0}")]
    InvalidColor(String),

    #[error("Invalid data point name: {0}")]
    InvalidName(String),

    #[error("Invalid value for {kind} data point: {value}")]
    InvalidValue { kind: String, value: String },

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Unknown data point: {0}")]
    UnknownDatum(String),

    #[error("Invalid week selector: {0}")]
    InvalidWeek(String),

    #[error("Data point '{0}' is not a TIMESTAMP data point")]
    NotTimestamp(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
