use chrono::{NaiveDate, TimeDelta};
use rdatalogger::models::datum_kind::DatumKind;
use rdatalogger::models::value::Payload;
use rdatalogger::utils::colors::normalize_hex_color;
use rdatalogger::utils::date::{resolve_period, resolve_week, weekday_name};
use rdatalogger::utils::format_duration;
use rdatalogger::utils::slug::{underscore_slugify, unique_slug};

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(TimeDelta::zero()), "0h 0m 0s");
    assert_eq!(format_duration(TimeDelta::seconds(3_725)), "1h 2m 5s");
    assert_eq!(
        format_duration(TimeDelta::hours(50) + TimeDelta::minutes(3)),
        "2d 2h 3m 0s"
    );
    assert_eq!(format_duration(TimeDelta::minutes(-90)), "-1h 30m 0s");
}

#[test]
fn test_slugify() {
    assert_eq!(underscore_slugify("Sleep"), "sleep");
    assert_eq!(underscore_slugify("  Work (office) time "), "work_office_time");
    assert_eq!(underscore_slugify("Café!"), "caf");
}

#[test]
fn test_unique_slug_suffixes() {
    let taken = ["sleep", "sleep_2"];
    assert_eq!(unique_slug("sleep", |s| taken.contains(&s)), "sleep_3");
    assert_eq!(unique_slug("work", |s| taken.contains(&s)), "work");
    assert_eq!(unique_slug("", |_| false), "datum");
}

#[test]
fn test_resolve_week() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 5).expect("date");

    let w = resolve_week(None, None, today).expect("current week");
    assert_eq!((w.year, w.week), (2025, 10));
    assert_eq!(w.start, NaiveDate::from_ymd_opt(2025, 3, 3).expect("date"));
    assert_eq!(w.days().len(), 7);
    assert!(w.contains(today));

    // ISO week 1 of 2025 starts in December 2024
    let w1 = resolve_week(Some(2025), Some(1), today).expect("week 1");
    assert_eq!(w1.start, NaiveDate::from_ymd_opt(2024, 12, 30).expect("date"));

    // 2020 has 53 ISO weeks, 2025 does not
    assert!(resolve_week(Some(2020), Some(53), today).is_ok());
    assert!(resolve_week(Some(2025), Some(53), today).is_err());
}

#[test]
fn test_resolve_period() {
    let today = NaiveDate::from_ymd_opt(2025, 2, 10).expect("date");

    let (from, to) = resolve_period(None, today).expect("month");
    assert_eq!(from.to_string(), "2025-02-01");
    assert_eq!(to.to_string(), "2025-02-28");

    let (from, to) = resolve_period(Some("2024-09:2025-03"), today).expect("range");
    assert_eq!(from.to_string(), "2024-09-01");
    assert_eq!(to.to_string(), "2025-03-31");

    assert!(resolve_period(Some("2025-03:2024-01"), today).is_err());
    assert!(resolve_period(Some("yesterday"), today).is_err());
}

#[test]
fn test_weekday_names() {
    assert_eq!(weekday_name(0), "Monday");
    assert_eq!(weekday_name(6), "Sunday");
    assert_eq!(weekday_name(7), "SOMEDAY");
}

#[test]
fn test_normalize_color() {
    assert_eq!(normalize_hex_color("87bbff").as_deref(), Some("#87BBFF"));
    assert_eq!(normalize_hex_color("#a1b2c3").as_deref(), Some("#A1B2C3"));
    assert_eq!(normalize_hex_color("#12345"), None);
    assert_eq!(normalize_hex_color("blue"), None);
}

#[test]
fn test_payload_parsing() {
    assert_eq!(
        Payload::parse(DatumKind::Timestamp, None).expect("ts"),
        Payload::Timestamp
    );
    assert_eq!(
        Payload::parse(DatumKind::Timestamp, Some("timestamp")).expect("ts"),
        Payload::Timestamp
    );
    assert!(Payload::parse(DatumKind::Timestamp, Some("12")).is_err());

    assert_eq!(Payload::parse(DatumKind::Int, Some("42")).expect("int"), Payload::Int(42));
    assert!(Payload::parse(DatumKind::Int, Some("4.2")).is_err());
    assert!(Payload::parse(DatumKind::Int, None).is_err());

    assert_eq!(
        Payload::parse(DatumKind::Float, Some("72.5")).expect("float"),
        Payload::Float(72.5)
    );
    assert!(Payload::parse(DatumKind::Float, Some("NaN")).is_err());

    assert!(Payload::parse(DatumKind::String, Some(&"x".repeat(257))).is_err());
    assert!(Payload::parse(DatumKind::Date, Some("2025-02-30")).is_err());
    assert!(Payload::parse(DatumKind::DateTime, Some("2025-02-03 10:00")).is_ok());
}
