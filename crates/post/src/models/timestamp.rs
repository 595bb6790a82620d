use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter, Result as FmtResult};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Parses a naive `YYYY-MM-DD HH:MM:SS` database timestamp.
///
/// `field` only names the column in the error.
pub fn parse_naive(field: &'static str, value: &str) -> Result<PrimitiveDateTime> {
    PrimitiveDateTime::parse(value.trim(), format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .or_raise(|| ErrorKind::MalformedTimestamp { field, value: value.to_string() })
}

/// A timezone-aware timestamp as written to front matter.
///
/// Serialized as RFC 3339 (`2023-06-01T10:00:00-04:00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    /// Reconstructs a zoned timestamp from the naive local and GMT pair the
    /// database stores for every date column.
    ///
    /// The offset is the hour component of `local - gmt`; minutes are not
    /// modeled, so half-hour zones are truncated towards zero.
    pub fn from_local_and_gmt(local: PrimitiveDateTime, gmt: PrimitiveDateTime) -> Result<Self> {
        let hours = (local - gmt).whole_seconds() / 3600 % 24;
        // Infallible: |hours| < 24, well within the ±25:59:59 range.
        let offset = UtcOffset::from_hms(hours as i8, 0, 0).or_raise(|| ErrorKind::MalformedTimestamp {
            field: "offset",
            value: hours.to_string(),
        })?;
        Ok(Self(local.assume_offset(offset)))
    }

    /// Interprets a naive timestamp as UTC.
    pub fn utc(gmt: PrimitiveDateTime) -> Self {
        Self(gmt.assume_utc())
    }

    /// The UTC offset formatted as `±HH:MM`.
    pub fn offset_string(&self) -> String {
        let offset = self.0.offset();
        let sign = if offset.is_negative() { '-' } else { '+' };
        format!("{sign}{:02}:{:02}", offset.whole_hours().abs(), offset.minutes_past_hour().abs())
    }

    pub fn as_offset_date_time(&self) -> OffsetDateTime {
        self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let formatted = self
            .0
            .format(format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
            ))
            .map_err(|_| std::fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::datetime;

    #[test]
    fn test_gmt_ahead_of_local_is_negative_offset() {
        let local = parse_naive("post_date", "2023-06-01 10:00:00").unwrap();
        let gmt = parse_naive("post_date_gmt", "2023-06-01 14:00:00").unwrap();
        let ts = Timestamp::from_local_and_gmt(local, gmt).unwrap();
        assert_eq!(ts.offset_string(), "-04:00");
        assert_eq!(ts.as_offset_date_time(), datetime!(2023-06-01 10:00:00 -4));
        assert_eq!(ts.to_string(), "2023-06-01T10:00:00-04:00");
    }

    #[rstest]
    #[case("2023-06-01 10:00:00", "2023-06-01 10:00:00", "+00:00")]
    #[case("2023-06-01 12:00:00", "2023-06-01 10:00:00", "+02:00")]
    #[case("2023-06-01 01:00:00", "2023-05-31 16:00:00", "+09:00")]
    #[case("2023-05-31 20:00:00", "2023-06-01 03:00:00", "-07:00")]
    // India: minutes are dropped.
    #[case("2023-06-01 15:30:00", "2023-06-01 10:00:00", "+05:00")]
    fn test_offset_reconstruction(#[case] local: &str, #[case] gmt: &str, #[case] expected: &str) {
        let local = parse_naive("post_date", local).unwrap();
        let gmt = parse_naive("post_date_gmt", gmt).unwrap();
        assert_eq!(Timestamp::from_local_and_gmt(local, gmt).unwrap().offset_string(), expected);
    }

    #[test]
    fn test_utc() {
        let ts = Timestamp::utc(parse_naive("post_date_gmt", "2023-06-01 14:00:00").unwrap());
        assert_eq!(ts.to_string(), "2023-06-01T14:00:00+00:00");
    }

    #[rstest]
    #[case("0000-00-00 00:00:00")]
    #[case("2023-06-01")]
    #[case("yesterday")]
    #[case("")]
    fn test_malformed(#[case] value: &str) {
        let err = parse_naive("post_date", value).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedTimestamp { field: "post_date", .. }));
    }
}
