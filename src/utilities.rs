use chrono::{DateTime, SecondsFormat};

/// RFC 3339 rendering of epoch millis for log lines; out-of-range values fall
/// back to the raw number.
pub fn format_millis(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_utc() {
        assert_eq!(format_millis(1_754_635_560_000), "2025-08-08T06:46:00Z");
    }

    #[test]
    fn out_of_range_falls_back() {
        assert_eq!(format_millis(i64::MAX), i64::MAX.to_string());
    }
}
