use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use chrono_tz::Tz;

use super::time::{TimeConfig, parse_datetime};
use crate::command::types::TimeGranularity;

/// Calendar-aware time bucketing and labelling
#[derive(Debug, Clone)]
pub struct CalendarTimeBucketer {
    config: TimeConfig,
    tz: Option<Tz>,
}

impl Default for CalendarTimeBucketer {
    fn default() -> Self {
        Self::new(TimeConfig::default())
    }
}

impl CalendarTimeBucketer {
    pub fn new(config: TimeConfig) -> Self {
        let tz = config.parse_timezone();
        Self { config, tz }
    }

    pub fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        parse_datetime(raw, self.tz.as_ref())
    }

    /// Start of the bucket containing `dt`.
    pub fn bucket_start(&self, dt: NaiveDateTime, gran: TimeGranularity) -> Option<NaiveDateTime> {
        let date = dt.date();
        match gran {
            TimeGranularity::Hour => date.and_hms_opt(dt.hour(), 0, 0),
            TimeGranularity::Day => date.and_hms_opt(0, 0, 0),
            TimeGranularity::Week => {
                let days_since_week_start = (date.weekday().num_days_from_monday()
                    + (7 - self.config.week_start.num_days_from_monday()))
                    % 7;
                (date - Duration::days(days_since_week_start as i64)).and_hms_opt(0, 0, 0)
            }
            TimeGranularity::Month => date.with_day(1)?.and_hms_opt(0, 0, 0),
            TimeGranularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0),
        }
    }

    /// Machine-readable bucket value, as an executor reports it.
    pub fn bucket_key(&self, raw: &str, gran: TimeGranularity) -> Option<String> {
        let start = self.bucket_start(self.parse(raw)?, gran)?;
        Some(match gran {
            TimeGranularity::Hour => start.format("%Y-%m-%d %H:00:00").to_string(),
            _ => start.format("%Y-%m-%d").to_string(),
        })
    }

    /// Human-readable label for a date-like value; unparseable input is
    /// returned unchanged.
    pub fn label(&self, raw: &str, gran: Option<TimeGranularity>) -> String {
        let Some(gran) = gran else {
            return raw.to_string();
        };
        let Some(start) = self.parse(raw).and_then(|dt| self.bucket_start(dt, gran)) else {
            return raw.to_string();
        };
        match gran {
            TimeGranularity::Hour => start.format("%Y-%m-%d %H:00").to_string(),
            TimeGranularity::Day => start.format("%Y-%m-%d").to_string(),
            TimeGranularity::Week => start.format("Week of %Y-%m-%d").to_string(),
            TimeGranularity::Month => start.format("%b %Y").to_string(),
            TimeGranularity::Year => start.format("%Y").to_string(),
        }
    }
}
