mod common;
use chrono::TimeDelta;
use common::{MemoryLog, timestamp_datum, ts};
use rdatalogger::core::calculator::cell::CellState;
use rdatalogger::core::calculator::week::{WeekAggregator, WeekView, build_week};
use rdatalogger::models::datum_kind::DatumKind;
use rdatalogger::models::log_entry::LogEntry;
use rdatalogger::utils::date::resolve_week;

// ISO week 2025-W10: Monday 2025-03-03 .. Sunday 2025-03-09
const YEAR: i32 = 2025;
const WEEK: u32 = 10;

fn past_now() -> chrono::NaiveDateTime {
    ts("2025-06-01 12:00")
}

fn week_of(raw: &[&str], now: &str) -> WeekView {
    let log = MemoryLog::new(raw);
    WeekAggregator::new(&log)
        .aggregate(&timestamp_datum(), Some(YEAR), Some(WEEK), ts(now))
        .expect("aggregate week")
}

fn past_week(raw: &[&str]) -> WeekView {
    let log = MemoryLog::new(raw);
    WeekAggregator::new(&log)
        .aggregate(&timestamp_datum(), Some(YEAR), Some(WEEK), past_now())
        .expect("aggregate week")
}

#[test]
fn test_single_working_day() {
    let view = past_week(&["2025-03-05 09:00", "2025-03-05 17:30"]);
    let wed = &view.rows[2];

    assert_eq!(wed.total, TimeDelta::minutes(8 * 60 + 30));
    assert_eq!(wed.total_str(), "8h 30m 0s");
    assert_eq!(view.total_str(), "8h 30m 0s");
    assert_eq!(view.average_str(), "1h 42m 0s");

    assert_eq!(wed.cells[9].state, CellState::Start);
    for h in 10..17 {
        assert_eq!(wed.cells[h].state, CellState::Full, "hour {h}");
    }
    assert_eq!(wed.cells[17].state, CellState::End);
    assert!((wed.cells[17].end_factor - 0.5).abs() < 1e-9);
    assert_eq!(wed.cells[8].state, CellState::Empty);
    assert_eq!(wed.cells[18].state, CellState::Empty);

    let title = "09:00:00 - 17:30:00 (8h 30m 0s)";
    for h in 9..=17 {
        assert_eq!(wed.cells[h].title, title, "hour {h}");
    }
    assert!(wed.cells[8].title.is_empty());

    // pairwise column agrees for a day without carried spans
    assert_eq!(view.entry_sum(wed.date), wed.total);
}

#[test]
fn test_span_across_midnight_is_split() {
    let view = past_week(&["2025-03-03 23:10", "2025-03-04 07:20"]);
    let (mon, tue) = (&view.rows[0], &view.rows[1]);

    assert_eq!(mon.total, TimeDelta::minutes(49));
    assert_eq!(tue.total, TimeDelta::minutes(7 * 60 + 20));
    assert_eq!(view.total, mon.total + tue.total);

    assert_eq!(mon.cells[23].state, CellState::Start);
    assert_eq!(mon.cells[23].end, Some(ts("2025-03-03 23:59")));
    assert_eq!(mon.cells[23].title, "23:10:00 - 23:59:00 (0h 49m 0s)");

    for h in 0..7 {
        assert_eq!(tue.cells[h].state, CellState::Full, "hour {h}");
    }
    assert_eq!(tue.cells[7].state, CellState::End);
    assert!((tue.cells[7].end_factor - 20.0 / 60.0).abs() < 1e-9);
    assert_eq!(tue.cells[0].title, "00:00:00 - 07:20:00 (7h 20m 0s)");
    assert_eq!(tue.malformed_closes, 0);
}

#[test]
fn test_partial_hour() {
    let view = past_week(&["2025-03-06 10:15", "2025-03-06 10:45"]);
    let cell = &view.rows[3].cells[10];

    assert_eq!(cell.state, CellState::Partial);
    assert!((cell.start_factor - 0.25).abs() < 1e-9);
    assert!((cell.end_factor - 0.75).abs() < 1e-9);
    assert_eq!(view.rows[3].total, TimeDelta::minutes(30));
    assert_eq!(view.rows[3].cells[11].state, CellState::Empty);
}

#[test]
fn test_close_then_open_in_same_hour() {
    let view = past_week(&[
        "2025-03-07 08:00",
        "2025-03-07 12:15",
        "2025-03-07 12:40",
        "2025-03-07 16:00",
    ]);
    let fri = &view.rows[4];
    let cell = &fri.cells[12];

    assert_eq!(cell.state, CellState::ReversePartial);
    assert!((cell.start_factor - 0.25).abs() < 1e-9);
    assert!((cell.end_factor - 40.0 / 60.0).abs() < 1e-9);
    assert_eq!(fri.cells[13].state, CellState::Full);
    assert_eq!(fri.cells[16].state, CellState::End);

    // 4h15m + 3h20m
    assert_eq!(fri.total, TimeDelta::minutes(7 * 60 + 35));
    assert_eq!(fri.cells[14].title, "12:40:00 - 16:00:00 (3h 20m 0s)");
    assert_eq!(fri.cells[9].title, "08:00:00 - 12:15:00 (4h 15m 0s)");
}

#[test]
fn test_open_span_closes_at_now() {
    let view = week_of(&["2025-03-05 09:00"], "2025-03-05 14:30");
    let wed = &view.rows[2];

    assert!(view.is_current_week);
    assert_eq!(wed.cells[13].state, CellState::Full);
    assert_eq!(wed.cells[14].state, CellState::End);
    assert!((wed.cells[14].end_factor - 0.5).abs() < 1e-9);
    assert_eq!(wed.total, TimeDelta::minutes(5 * 60 + 30));

    for h in 15..24 {
        assert_eq!(wed.cells[h].state, CellState::Empty, "hour {h}");
    }
    assert!(view.rows[3..].iter().all(|r| r.total == TimeDelta::zero()));
}

#[test]
fn test_open_span_in_current_hour_is_partial() {
    let view = week_of(&["2025-03-05 14:10"], "2025-03-05 14:30");
    let cell = &view.rows[2].cells[14];

    assert_eq!(cell.state, CellState::Partial);
    assert_eq!(cell.end, Some(ts("2025-03-05 14:30")));
    assert_eq!(view.rows[2].total, TimeDelta::minutes(20));
}

#[test]
fn test_future_hours_stay_empty() {
    let view = week_of(
        &["2025-03-04 09:00", "2025-03-04 12:00", "2025-03-04 14:00"],
        "2025-03-04 10:30",
    );
    let tue = &view.rows[1];

    // entries after "now" are not drawn and do not shift the pairing
    assert_eq!(tue.cells[10].state, CellState::End);
    for h in 11..24 {
        assert_eq!(tue.cells[h].state, CellState::Empty, "hour {h}");
        assert!(tue.cells[h].title.is_empty(), "hour {h}");
    }
    assert_eq!(tue.total, TimeDelta::minutes(90));
    assert_eq!(view.malformed_closes(), 0);
    assert!(
        view.rows[2..]
            .iter()
            .all(|r| r.cells.iter().all(|c| c.state == CellState::Empty))
    );
}

#[test]
fn test_open_span_in_past_week_fills_to_end_of_day() {
    let view = past_week(&["2025-03-09 20:00"]);
    let sun = &view.rows[6];

    assert_eq!(sun.cells[20].state, CellState::Start);
    for h in 21..24 {
        assert_eq!(sun.cells[h].state, CellState::Full, "hour {h}");
    }
    assert_eq!(sun.total, TimeDelta::minutes(3 * 60 + 59));
}

#[test]
fn test_empty_week() {
    let view = past_week(&[]);
    assert_eq!(view.rows.len(), 7);
    for row in &view.rows {
        assert_eq!(row.cells.len(), 24);
        for cell in &row.cells {
            assert_eq!(cell.state, CellState::Empty);
            assert_eq!(cell.start_factor, 0.0);
            assert_eq!(cell.end_factor, 0.0);
            assert!(cell.title.is_empty());
        }
    }
    assert_eq!(view.total, TimeDelta::zero());
    assert_eq!(view.average_str(), "0h 0m 0s");
    assert_eq!(view.malformed_closes(), 0);
}

#[test]
fn test_entries_outside_window_are_ignored() {
    let datum = timestamp_datum();
    let window = resolve_week(Some(YEAR), Some(WEEK), past_now().date()).expect("window");
    let log = MemoryLog::new(&["2025-03-02 22:00", "2025-03-05 09:00", "2025-03-05 10:00"]);
    let entries = log
        .entries
        .iter()
        .map(|t| LogEntry::new(*t, DatumKind::Timestamp))
        .collect();

    let view = build_week(&datum, window, entries, past_now());
    assert_eq!(view.total, TimeDelta::hours(1));
    assert_eq!(view.rows[2].cells[9].state, CellState::Start);
}

#[test]
fn test_aggregation_is_repeatable() {
    let raw = [
        "2025-03-03 23:10",
        "2025-03-04 07:20",
        "2025-03-05 09:00",
        "2025-03-05 17:30",
    ];
    let a = past_week(&raw);
    let b = past_week(&raw);

    assert_eq!(a.total, b.total);
    for (ra, rb) in a.rows.iter().zip(&b.rows) {
        assert_eq!(ra.cells, rb.cells);
        assert_eq!(ra.total, rb.total);
    }
}

#[test]
fn test_week_total_is_sum_of_rows() {
    let view = past_week(&[
        "2025-03-03 23:10",
        "2025-03-04 07:20",
        "2025-03-06 10:15",
        "2025-03-06 10:45",
        "2025-03-08 13:00",
        "2025-03-08 15:05",
    ]);
    let sum = view
        .rows
        .iter()
        .fold(TimeDelta::zero(), |acc, r| acc + r.total);
    assert_eq!(view.total, sum);
    assert_eq!(view.workweek_average, view.total / 5);
}

#[test]
fn test_crowded_hour_is_flagged() {
    let view = past_week(&[
        "2025-03-05 09:05",
        "2025-03-05 09:10",
        "2025-03-05 09:20",
        "2025-03-05 09:50",
    ]);
    let cell = &view.rows[2].cells[9];

    assert_eq!(cell.events, 4);
    assert!(cell.overloaded);
    // both spans still count
    assert_eq!(view.rows[2].total, TimeDelta::minutes(35));
}

#[test]
fn test_invalid_week_is_rejected() {
    let log = MemoryLog::new(&[]);
    let res = WeekAggregator::new(&log).aggregate(&timestamp_datum(), Some(2025), Some(54), past_now());
    assert!(res.is_err());

    let res = WeekAggregator::new(&log).aggregate(&timestamp_datum(), Some(2025), Some(0), past_now());
    assert!(res.is_err());
}

#[test]
fn test_default_week_follows_now() {
    let log = MemoryLog::new(&[]);
    let view = WeekAggregator::new(&log)
        .aggregate(&timestamp_datum(), None, None, ts("2025-03-05 08:00"))
        .expect("aggregate");
    assert_eq!(view.week_number(), 10);
    assert_eq!(view.week_start().to_string(), "2025-03-03");
    assert!(view.is_current_week);
}

#[test]
fn test_span_opened_in_last_minute_of_day() {
    let view = past_week(&["2025-03-03 23:59:30"]);
    let mon = &view.rows[0];

    assert_eq!(mon.total, TimeDelta::zero());
    assert_eq!(mon.cells[23].title, "23:59:30 - 23:59:30 (0h 0m 0s)");
    assert_eq!(view.rows[1].cells[0].state, CellState::Full);
}

#[test]
fn test_reopened_span_in_current_hour_stops_at_now() {
    let view = week_of(
        &["2025-03-05 09:00", "2025-03-05 10:10", "2025-03-05 10:20"],
        "2025-03-05 10:30",
    );
    let wed = &view.rows[2];
    let cell = &wed.cells[10];

    assert_eq!(cell.state, CellState::ReversePartial);
    assert!((cell.end_factor - 20.0 / 60.0).abs() < 1e-9);
    assert!((cell.tail_factor - 0.5).abs() < 1e-9);
    assert_eq!(cell.title, "10:20:00 - 10:30:00 (0h 10m 0s)");
    // 1h10m + 10m
    assert_eq!(wed.total, TimeDelta::minutes(80));
    assert_eq!(wed.cells[11].state, CellState::Empty);
}
