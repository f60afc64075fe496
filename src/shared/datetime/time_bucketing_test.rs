use super::time_bucketing::CalendarTimeBucketer;
use super::time::TimeConfig;
use crate::command::types::TimeGranularity;
use chrono::Weekday;

#[test]
fn test_month_label() {
    let bucketer = CalendarTimeBucketer::default();
    assert_eq!(
        bucketer.label("2024-02-15", Some(TimeGranularity::Month)),
        "Feb 2024"
    );
}

#[test]
fn test_week_label_snaps_to_week_start() {
    let bucketer = CalendarTimeBucketer::default();
    // Wednesday, January 3, 2024 belongs to the week starting Monday, January 1
    assert_eq!(
        bucketer.label("2024-01-03", Some(TimeGranularity::Week)),
        "Week of 2024-01-01"
    );
}

#[test]
fn test_week_label_with_sunday_start() {
    let bucketer = CalendarTimeBucketer::new(TimeConfig {
        timezone: None,
        week_start: Weekday::Sun,
    });
    assert_eq!(
        bucketer.label("2024-01-03", Some(TimeGranularity::Week)),
        "Week of 2023-12-31"
    );
}

#[test]
fn test_day_and_hour_labels() {
    let bucketer = CalendarTimeBucketer::default();
    assert_eq!(
        bucketer.label("2024-01-03T17:45:00Z", Some(TimeGranularity::Day)),
        "2024-01-03"
    );
    assert_eq!(
        bucketer.label("2024-01-03 17:45:00", Some(TimeGranularity::Hour)),
        "2024-01-03 17:00"
    );
}

#[test]
fn test_label_without_bucket_is_unchanged() {
    let bucketer = CalendarTimeBucketer::default();
    assert_eq!(bucketer.label("2024-01-03", None), "2024-01-03");
}

#[test]
fn test_unparseable_label_is_unchanged() {
    let bucketer = CalendarTimeBucketer::default();
    assert_eq!(bucketer.label("Q1 sales", Some(TimeGranularity::Month)), "Q1 sales");
}

#[test]
fn test_timezone_shifts_day_bucket() {
    let bucketer = CalendarTimeBucketer::new(TimeConfig {
        timezone: Some("US/Eastern".to_string()),
        week_start: Weekday::Mon,
    });
    // 02:00 UTC on Jan 2 is still Jan 1 in New York
    assert_eq!(
        bucketer.bucket_key("2024-01-02T02:00:00Z", TimeGranularity::Day),
        Some("2024-01-01".to_string())
    );
}

#[test]
fn test_bucket_key_formats() {
    let bucketer = CalendarTimeBucketer::default();
    assert_eq!(
        bucketer.bucket_key("2024-05-19 08:30:00", TimeGranularity::Year),
        Some("2024-01-01".to_string())
    );
    assert_eq!(
        bucketer.bucket_key("2024-05-19 08:30:00", TimeGranularity::Hour),
        Some("2024-05-19 08:00:00".to_string())
    );
    assert_eq!(bucketer.bucket_key("not a date", TimeGranularity::Day), None);
}
