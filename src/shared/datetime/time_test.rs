use super::time::{TimeConfig, is_date_like, parse_datetime};
use chrono::{NaiveDate, Weekday};

#[test]
fn test_parses_supported_shapes() {
    let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid date");

    assert_eq!(parse_datetime("2024-03-01", None), Some(expected));
    assert_eq!(parse_datetime("2024-03", None), Some(expected));
    assert_eq!(parse_datetime("2024-03-01 00:00:00", None), Some(expected));
    assert_eq!(parse_datetime("2024-03-01T00:00:00", None), Some(expected));
    assert_eq!(parse_datetime("2024-03-01T00:00:00Z", None), Some(expected));
}

#[test]
fn test_rejects_non_dates() {
    assert!(!is_date_like("Jan"));
    assert!(!is_date_like("2024"));
    assert!(!is_date_like("North America"));
    assert!(!is_date_like(""));
}

#[test]
fn test_default_time_config() {
    let config = TimeConfig::default();
    assert_eq!(config.timezone, None);
    assert_eq!(config.week_start, Weekday::Mon);
    assert!(config.parse_timezone().is_none());
}

#[test]
fn test_timezone_parsing() {
    let config = TimeConfig {
        timezone: Some("US/Eastern".to_string()),
        week_start: Weekday::Mon,
    };
    assert!(config.parse_timezone().is_some());
}

#[test]
fn test_invalid_timezone() {
    let config = TimeConfig {
        timezone: Some("Invalid/Timezone".to_string()),
        week_start: Weekday::Mon,
    };
    assert!(config.parse_timezone().is_none());
}
