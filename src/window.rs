use chrono::{NaiveDateTime, Timelike};

use crate::error::{FetchLogsError, Result};

/// Day first, two-digit year, always UTC.
pub const START_TIME_FORMAT: &str = "%d/%m/%y %H:%M:%S";

const MILLIS_PER_MINUTE: i64 = 60 * 1000;

/// Closed interval `[start_time, end_time]` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start_time: i64,
    pub end_time: i64,
}

impl FetchWindow {
    pub fn parse(time_text: &str, duration_minutes: i64) -> Result<FetchWindow> {
        let start_time = parse_start_time(time_text)?;
        FetchWindow::from_start(start_time, duration_minutes)
    }

    pub fn from_start(start_time: i64, duration_minutes: i64) -> Result<FetchWindow> {
        if duration_minutes <= 0 {
            return Err(FetchLogsError::InvalidDuration(duration_minutes));
        }
        let end_time = duration_minutes
            .checked_mul(MILLIS_PER_MINUTE)
            .and_then(|span| start_time.checked_add(span))
            .ok_or(FetchLogsError::InvalidDuration(duration_minutes))?;
        Ok(FetchWindow {
            start_time,
            end_time,
        })
    }
}

fn parse_error(time_text: &str, reason: impl ToString) -> FetchLogsError {
    FetchLogsError::Parse {
        input: time_text.to_string(),
        reason: reason.to_string(),
    }
}

pub fn parse_start_time(time_text: &str) -> Result<i64> {
    let parsed = NaiveDateTime::parse_from_str(time_text, START_TIME_FORMAT)
        .map_err(|e| parse_error(time_text, e))?;
    // chrono reads a seconds field of 60 as a leap second, stored as nanos >= 1s.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(parse_error(time_text, "seconds out of range"));
    }
    Ok(parsed.and_utc().timestamp_millis())
}
