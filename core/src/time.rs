//! Time related utils.

use crate::Error;
use chrono::SecondsFormat;
use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime for now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into http date: `Sat, 01 Jan 2000 01:01:01 GMT`
///
/// Same layout as RFC 1123 with the zone always spelled `GMT`.
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Format time into RFC3339: `2000-01-01T01:01:01Z`
///
/// Sub-second precision is dropped.
pub fn format_rfc3339(t: DateTime) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse time from RFC3339.
///
/// All offsets are normalized to UTC.
pub fn parse_rfc3339(s: &str) -> crate::Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|v| v.with_timezone(&Utc))
        .map_err(|e| Error::unexpected(format!("invalid rfc3339 time: {s}")).with_source(e))
}

/// Build time from unix timestamp in seconds.
pub fn from_timestamp(secs: i64) -> crate::Result<DateTime> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| Error::unexpected(format!("timestamp out of range: {secs}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2000, 1, 1, 1, 1, 1).unwrap()
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(test_time()), "Sat, 01 Jan 2000 01:01:01 GMT");
    }

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(format_rfc3339(test_time()), "2000-01-01T01:01:01Z");

        let with_nanos = test_time() + chrono::TimeDelta::try_milliseconds(250).unwrap();
        assert_eq!(format_rfc3339(with_nanos), "2000-01-01T01:01:01Z");
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(parse_rfc3339("2000-01-01T02:01:01+01:00").unwrap(), test_time());
        assert!(parse_rfc3339("yesterday").is_err());
    }

    #[test]
    fn test_from_timestamp() {
        assert_eq!(from_timestamp(946688461).unwrap(), test_time());
    }
}
