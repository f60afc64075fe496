use chrono::{DateTime, NaiveDate, NaiveDateTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Time zone and week start used to read and bucket timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// Timezone used to read offset-qualified timestamps (None = UTC)
    pub timezone: Option<String>,
    pub week_start: Weekday,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            timezone: None,
            week_start: Weekday::Mon,
        }
    }
}

impl TimeConfig {
    /// `None` when unset or not a known IANA zone name
    pub fn parse_timezone(&self) -> Option<Tz> {
        self.timezone
            .as_ref()
            .and_then(|tz_str| tz_str.parse().ok())
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses the date-like shapes aggregate executors emit for x values.
///
/// Offset-qualified timestamps are converted into `tz` (UTC when absent);
/// naive values are taken as already local.
pub fn parse_datetime(raw: &str, tz: Option<&Tz>) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.len() < 7 {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(match tz {
            Some(tz) => dt.with_timezone(tz).naive_local(),
            None => dt.naive_utc(),
        });
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    // Month buckets are often reported as "YYYY-MM".
    if raw.len() == 7 {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

pub fn is_date_like(raw: &str) -> bool {
    parse_datetime(raw, None).is_some()
}
