#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDateTime;
use rdatalogger::core::calculator::week::TimeSpanLog;
use rdatalogger::errors::AppResult;
use rdatalogger::models::datum::Datum;
use rdatalogger::models::datum_kind::DatumKind;
use rdatalogger::models::log_entry::LogEntry;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rdl() -> Command {
    cargo_bin_cmd!("rdatalogger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rdatalogger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and define a TIMESTAMP data point "Sleep" (slug `sleep`)
/// with one night and one working day logged in ISO week 2025-W10.
pub fn init_db_with_data(db_path: &str) {
    rdl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    rdl()
        .args(["--db", db_path, "datum", "add", "Sleep", "--kind", "timestamp"])
        .assert()
        .success();

    for at in [
        "2025-03-03 23:10",
        "2025-03-04 07:20",
        "2025-03-05 09:00",
        "2025-03-05 17:30",
    ] {
        rdl()
            .args(["--db", db_path, "add", "sleep", "--at", at])
            .assert()
            .success();
    }
}

/// `YYYY-MM-DD HH:MM` or `YYYY-MM-DD HH:MM:SS`.
pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .expect("test timestamp")
}

pub fn timestamp_datum() -> Datum {
    let mut d = Datum::new("Sleep", "sleep", DatumKind::Timestamp, None, "#87BBFF", None);
    d.id = 1;
    d
}

/// In-memory entry source for the week engine.
pub struct MemoryLog {
    pub entries: Vec<NaiveDateTime>,
}

impl MemoryLog {
    pub fn new(raw: &[&str]) -> Self {
        Self {
            entries: raw.iter().map(|s| ts(s)).collect(),
        }
    }
}

impl TimeSpanLog for MemoryLog {
    fn fetch_entries(
        &self,
        _datum_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> AppResult<Vec<LogEntry>> {
        let mut out: Vec<LogEntry> = self
            .entries
            .iter()
            .filter(|t| **t >= start && **t < end)
            .map(|t| LogEntry::new(*t, DatumKind::Timestamp))
            .collect();
        out.sort_by_key(|e| e.timestamp);
        Ok(out)
    }
}
