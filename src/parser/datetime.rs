//! Restricted date-time parsing.
//!
//! SPDX allows exactly one date-time shape: `YYYY-MM-DDThh:mm:ssZ`, UTC,
//! seconds precision. Offsets, fractional seconds and local times are all
//! rejected.

use chrono::{DateTime, NaiveDateTime, Utc};

pub fn datetime_from_str(value: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(value.trim(), "%Y-%m-%dT%H:%M:%SZ")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            format!(
                "{} is not a valid date-time, YYYY-MM-DDThh:mm:ssZ expected",
                value
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_datetime() {
        let parsed = datetime_from_str("2010-01-29T18:30:22Z").unwrap();
        assert_eq!((parsed.year(), parsed.month(), parsed.day()), (2010, 1, 29));
        assert_eq!((parsed.hour(), parsed.minute(), parsed.second()), (18, 30, 22));
    }

    #[test]
    fn test_parse_datetime_rejects_other_shapes() {
        assert!(datetime_from_str("2010-01-29 18:30:22").is_err());
        assert!(datetime_from_str("2010-01-29T18:30:22+01:00").is_err());
        assert!(datetime_from_str("2010-01-29T18:30:22.123Z").is_err());
        assert!(datetime_from_str("201001-2912:23").is_err());
    }
}
