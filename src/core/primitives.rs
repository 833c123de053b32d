use std::str::FromStr;

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{TimelineError, TimelineResult};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> TimelineResult<f64> {
    value.to_f64().ok_or_else(|| {
        TimelineError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last representable millisecond of `date` (23:59:59.999 UTC).
#[must_use]
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + TimeDelta::milliseconds(MILLIS_PER_DAY - 1)
}

#[must_use]
pub fn year_start(year: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 1, 1).map(start_of_day)
}

#[must_use]
pub fn year_end(year: i32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, 12, 31).map(end_of_day)
}

#[must_use]
pub fn add_years(time: DateTime<Utc>, years: u32) -> Option<DateTime<Utc>> {
    time.checked_add_months(Months::new(years.saturating_mul(12)))
}

#[must_use]
pub fn datetime_from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

#[must_use]
pub fn millis_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds()
}

/// Parses a posting timestamp.
///
/// Accepted forms: RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` or
/// `YYYY-MM-DD HH:MM:SS[.fff]` (read as UTC), and a bare `YYYY-MM-DD`
/// (midnight UTC).
pub fn parse_timestamp(input: &str) -> TimelineResult<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimelineError::InvalidTimestamp(
            "timestamp must not be empty".to_owned(),
        ));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Ok(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(start_of_day)
        .map_err(|_| TimelineError::InvalidTimestamp(format!("unrecognized timestamp `{trimmed}`")))
}

/// Parses a signed decimal amount such as `-12.50` or `3`.
pub fn parse_amount(input: &str) -> TimelineResult<Decimal> {
    let trimmed = input.trim();
    Decimal::from_str(trimmed)
        .map_err(|err| TimelineError::InvalidAmount(format!("`{trimmed}`: {err}")))
}
