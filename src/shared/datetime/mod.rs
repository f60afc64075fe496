pub mod time;
pub mod time_bucketing;

#[cfg(test)]
mod time_bucketing_test;
#[cfg(test)]
mod time_test;

pub use time::{TimeConfig, is_date_like, parse_datetime};
pub use time_bucketing::CalendarTimeBucketer;
