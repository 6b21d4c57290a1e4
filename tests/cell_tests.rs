mod common;
use chrono::{NaiveDate, TimeDelta};
use common::ts;
use rdatalogger::core::calculator::cell::{Cell, CellState, minute_factor};
use rdatalogger::core::calculator::day_row::DayRow;
use rdatalogger::core::calculator::open_span::{OpenSpan, resolve_open_span};
use rdatalogger::core::calculator::pair_sums::pairwise_day_sums;
use rdatalogger::models::datum_kind::DatumKind;
use rdatalogger::models::log_entry::LogEntry;
use rdatalogger::ui::week_grid::fill_mask;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 5).expect("date")
}

fn row() -> DayRow {
    DayRow::new(day(), 2, "#87BBFF")
}

#[test]
fn test_cell_setters_and_factors() {
    let mut c = Cell::new(0, 9, "#87BBFF");
    assert!(c.is_empty());

    c.set_start(ts("2025-03-05 09:15"));
    assert_eq!(c.state, CellState::Start);
    assert_eq!((c.start_factor, c.end_factor), (0.25, 1.0));

    c.set_end(ts("2025-03-05 09:45"));
    assert_eq!(c.state, CellState::End);
    assert_eq!(c.start, None);
    assert_eq!((c.start_factor, c.end_factor), (0.0, 0.75));

    c.set_partial(ts("2025-03-05 09:15"), ts("2025-03-05 09:45"));
    assert_eq!((c.start_factor, c.end_factor), (0.25, 0.75));

    c.set_reverse_partial(ts("2025-03-05 09:15"), ts("2025-03-05 09:45"));
    assert_eq!(c.state, CellState::ReversePartial);
    assert_eq!(c.start, Some(ts("2025-03-05 09:15")));
    assert_eq!(c.end, Some(ts("2025-03-05 09:45")));

    c.set_full();
    assert_eq!((c.start_factor, c.end_factor), (0.0, 1.0));

    c.title = "something".into();
    c.set_empty();
    assert!(c.is_empty());
    assert!(c.title.is_empty());
    assert_eq!(c.end, None);
}

#[test]
fn test_minute_factor_ignores_seconds() {
    let t = chrono::NaiveDateTime::parse_from_str("2025-03-05 10:30:59", "%Y-%m-%d %H:%M:%S")
        .expect("ts");
    assert_eq!(minute_factor(&t), 0.5);
}

#[test]
fn test_overload_after_two_events() {
    let mut c = Cell::new(0, 0, "#000000");
    c.register_event();
    c.register_event();
    assert!(!c.overloaded);
    c.register_event();
    assert!(c.overloaded);
}

#[test]
fn test_span_end_walks_back_to_start() {
    let mut r = row();
    r.cells[9].set_start(ts("2025-03-05 09:00"));
    r.cells[10].set_full();
    r.cells[11].set_end(ts("2025-03-05 11:30"));

    let span = r.set_span_end(11);
    assert_eq!(span, Some((ts("2025-03-05 09:00"), ts("2025-03-05 11:30"))));

    for h in 9..=11 {
        assert_eq!(r.cells[h].title, "09:00:00 - 11:30:00 (2h 30m 0s)");
    }
    assert!(r.cells[8].title.is_empty());
    // totals are accrued by the caller
    assert_eq!(r.total, TimeDelta::zero());
}

#[test]
fn test_span_end_without_start_is_malformed() {
    let mut r = row();
    r.cells[5].set_end(ts("2025-03-05 05:10"));

    assert!(r.find_span(5).is_none());
    assert!(r.set_span_end(5).is_none());
    assert!(r.cells[5].title.is_empty());
}

#[test]
fn test_span_carried_from_previous_day_starts_at_midnight() {
    let mut r = row();
    for h in 0..3 {
        r.cells[h].set_full();
    }
    r.cells[3].set_end(ts("2025-03-05 03:15"));

    let bounds = r.find_span(3).expect("bounds");
    assert_eq!(bounds.start, ts("2025-03-05 00:00"));
    assert_eq!(bounds.end, ts("2025-03-05 03:15"));
    assert_eq!(bounds.cells, 0..=3);
}

#[test]
fn test_last_full_hour_ends_at_end_of_day() {
    let mut r = row();
    r.cells[22].set_start(ts("2025-03-05 22:30"));
    r.cells[23].set_full();

    let bounds = r.find_span(23).expect("bounds");
    assert_eq!(bounds.start, ts("2025-03-05 22:30"));
    assert_eq!(bounds.end, ts("2025-03-05 23:59"));
    assert_eq!(r.end_of_day(), ts("2025-03-05 23:59"));
}

#[test]
fn test_open_span_resolution_by_hour_position() {
    let span = OpenSpan {
        start: ts("2025-03-05 08:00"),
    };
    let now = ts("2025-03-05 10:20");
    let r = row();

    let past = resolve_open_span(&r.cells[9], day(), span, now, true);
    assert_eq!(past.cell.state, CellState::Full);
    assert_eq!(past.closed_at, None);
    assert_eq!(past.delta, TimeDelta::zero());

    let current = resolve_open_span(&r.cells[10], day(), span, now, true);
    assert_eq!(current.cell.state, CellState::End);
    assert_eq!(current.closed_at, Some(now));
    assert_eq!(current.delta, TimeDelta::minutes(140));

    let future = resolve_open_span(&r.cells[11], day(), span, now, true);
    assert_eq!(future.cell.state, CellState::Empty);

    // logged marks in future hours are cleared too
    let mut marked = r.cells[12].clone();
    marked.set_start(ts("2025-03-05 12:05"));
    let future = resolve_open_span(&marked, day(), span, now, true);
    assert_eq!(future.cell.state, CellState::Empty);
    assert_eq!(future.cell.start, None);

    // not the current week: everything is past
    let other_week = resolve_open_span(&r.cells[11], day(), span, now, false);
    assert_eq!(other_week.cell.state, CellState::Full);
}

#[test]
fn test_fill_mask() {
    let mut c = Cell::new(0, 0, "#000000");
    assert_eq!(fill_mask(&c, 3), vec![false, false, false]);

    c.set_full();
    assert_eq!(fill_mask(&c, 3), vec![true, true, true]);

    c.set_start(ts("2025-03-05 00:30"));
    assert_eq!(fill_mask(&c, 3), vec![false, true, true]);

    c.set_end(ts("2025-03-05 00:15"));
    assert_eq!(fill_mask(&c, 3), vec![true, false, false]);

    // short spans still get a slot
    c.set_partial(ts("2025-03-05 00:24"), ts("2025-03-05 00:27"));
    assert_eq!(fill_mask(&c, 3), vec![false, true, false]);

    c.set_reverse_partial(ts("2025-03-05 00:15"), ts("2025-03-05 00:45"));
    assert_eq!(fill_mask(&c, 3), vec![true, false, true]);

    // open side closed at "now" stops drawing there
    c.set_reverse_partial(ts("2025-03-05 00:15"), ts("2025-03-05 00:30"));
    c.close_open_side(ts("2025-03-05 00:45"));
    assert_eq!(fill_mask(&c, 4), vec![true, false, true, false]);
}

#[test]
fn test_pairwise_day_sums() {
    let entries: Vec<LogEntry> = [
        "2025-03-03 23:10",
        "2025-03-04 07:20",
        "2025-03-05 09:00",
        "2025-03-05 12:00",
        "2025-03-05 13:00",
        "2025-03-05 17:30",
    ]
    .iter()
    .map(|s| LogEntry::new(ts(s), DatumKind::Timestamp))
    .collect();

    let sums = pairwise_day_sums(&entries);

    let mon = &sums[&NaiveDate::from_ymd_opt(2025, 3, 3).expect("date")];
    assert_eq!(mon.sum, TimeDelta::zero());

    // parity restarts: the lone Tuesday entry opens a pair
    let tue = &sums[&NaiveDate::from_ymd_opt(2025, 3, 4).expect("date")];
    assert_eq!(tue.sum, TimeDelta::zero());

    let wed = &sums[&day()];
    assert_eq!(wed.entries.len(), 4);
    assert_eq!(wed.entries[1].delta, TimeDelta::hours(3));
    assert_eq!(wed.entries[2].delta, TimeDelta::zero());
    assert_eq!(wed.sum, TimeDelta::minutes(7 * 60 + 30));
    assert_eq!(wed.sum_str(), "7h 30m 0s");
}
