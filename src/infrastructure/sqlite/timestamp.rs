// src/infrastructure/sqlite/timestamp.rs
//
// Timestamps are stored as fixed-width RFC 3339 text (microseconds, `Z` suffix) so
// that string order equals time order inside SQL (`ORDER BY`, `MAX`).

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;

/// Current time at the precision the database keeps, so written and re-read values compare equal
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn to_sql(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn from_sql(column: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn given_timestamp_when_formatting_then_uses_fixed_width() {
        let ts = Utc.with_ymd_and_hms(2025, 9, 20, 16, 9, 2).unwrap();

        assert_eq!(to_sql(&ts), "2025-09-20T16:09:02.000000Z");
    }

    #[test]
    fn given_now_when_storing_and_reading_then_value_is_unchanged() {
        let ts = now();

        let parsed = from_sql(0, &to_sql(&ts)).unwrap();

        assert_eq!(parsed, ts);
    }

    #[test]
    fn given_garbage_when_parsing_then_returns_conversion_error() {
        let result = from_sql(3, "yesterday");

        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(3, Type::Text, _))
        ));
    }
}
