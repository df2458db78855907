use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::error::ValidationError;

/// How far back `since` filters and time entry date ranges may reach.
pub const LOOKBACK_DAYS: i64 = 90;

pub fn lookback_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(LOOKBACK_DAYS)
}

pub fn check_since(since: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Result<(), ValidationError> {
    match since {
        Some(since) if since < lookback_start(now) => Err(ValidationError::SinceTooOld),
        _ => Ok(()),
    }
}

/// Calendar dates older than the lookback window are rejected by the time
/// entries endpoint, so they are rejected here first.
pub fn check_recent_date(date: Option<NaiveDate>, now: DateTime<Utc>) -> Result<(), ValidationError> {
    let earliest = lookback_start(now).date_naive();
    match date {
        Some(date) if date < earliest => Err(ValidationError::DatesTooOld { earliest }),
        _ => Ok(()),
    }
}

/// Calendar date for report and time entry filters.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("`{value}` is not a YYYY-MM-DD date: {err}"))
}

/// Accepts either `YYYY-MM-DD` (midnight UTC) or integer Unix seconds.
pub fn parse_since(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(seconds) = value.parse::<i64>() {
        return DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| format!("Timestamp {seconds} is out of range."));
    }
    let date = parse_date(value)?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
