use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::time::Duration;

use time::OffsetDateTime;

use spanwire_googleapis::spanner::v1::transaction_options::read_only::TimestampBound as InternalTimestampBound;
use spanwire_googleapis::spanner::v1::transaction_options::ReadOnly;

/// https://cloud.google.com/spanner/docs/storing-numeric-data#precision_of_numeric_types
/// -99999999999999999999999999999.999999999～99999999999999999999999999999.999999999
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SpannerNumeric(String);

impl Default for SpannerNumeric {
    fn default() -> Self {
        Self::new("0")
    }
}

impl SpannerNumeric {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Placeholder for the commit timestamp of the transaction that writes it.
/// Only valid in mutations and DML parameters.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug)]
pub struct CommitTimestamp {
    pub(crate) timestamp: OffsetDateTime,
}

impl CommitTimestamp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for CommitTimestamp {
    fn default() -> Self {
        CommitTimestamp {
            timestamp: OffsetDateTime::UNIX_EPOCH,
        }
    }
}

impl Deref for CommitTimestamp {
    type Target = OffsetDateTime;

    fn deref(&self) -> &Self::Target {
        &self.timestamp
    }
}

impl From<CommitTimestamp> for OffsetDateTime {
    fn from(s: CommitTimestamp) -> Self {
        s.timestamp
    }
}

/// JSON column value, kept as its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Json(pub String);

impl Json {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// PROTO column value. The wire form is the base64 of the encoded message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Proto<T>(pub T);

impl<T> Deref for Proto<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// INTERVAL column value.
///
/// The three components are independent, as in Spanner: one month is not a fixed number
/// of days and one day is not a fixed number of nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interval {
    pub months: i32,
    pub days: i32,
    pub nanos: i128,
}

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("invalid interval {0:?}")]
pub struct IntervalParseError(String);

impl Interval {
    pub fn new(months: i32, days: i32, nanos: i128) -> Self {
        Self { months, days, nanos }
    }

    pub fn from_duration(d: Duration) -> Self {
        Self::new(0, 0, d.as_nanos() as i128)
    }
}

impl fmt::Display for Interval {
    /// ISO-8601 duration with per-component signs, e.g. `P1Y2M3DT4H5M6.5S`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months == 0 && self.days == 0 && self.nanos == 0 {
            return f.write_str("P0Y");
        }
        f.write_str("P")?;
        let years = self.months / 12;
        let months = self.months % 12;
        if years != 0 {
            write!(f, "{years}Y")?;
        }
        if months != 0 {
            write!(f, "{months}M")?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.nanos == 0 {
            return Ok(());
        }
        f.write_str("T")?;
        let hours = self.nanos / NANOS_PER_HOUR;
        let minutes = (self.nanos % NANOS_PER_HOUR) / NANOS_PER_MINUTE;
        let rest = self.nanos % NANOS_PER_MINUTE;
        if hours != 0 {
            write!(f, "{hours}H")?;
        }
        if minutes != 0 {
            write!(f, "{minutes}M")?;
        }
        if rest != 0 {
            let sign = if rest < 0 { "-" } else { "" };
            let seconds = rest.abs() / NANOS_PER_SECOND;
            let fraction = rest.abs() % NANOS_PER_SECOND;
            if fraction == 0 {
                write!(f, "{sign}{seconds}S")?;
            } else {
                let digits = format!("{fraction:09}");
                write!(f, "{sign}{seconds}.{}S", digits.trim_end_matches('0'))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || IntervalParseError(s.to_string());
        let body = s.strip_prefix('P').ok_or_else(err)?;
        if body.is_empty() {
            return Err(err());
        }
        let (date, time) = match body.split_once('T') {
            Some((_, "")) => return Err(err()),
            Some((date, time)) => (date, Some(time)),
            None => (body, None),
        };

        let mut interval = Interval::default();
        for (number, unit) in components(date).ok_or_else(err)? {
            let value: i32 = number.parse().map_err(|_| err())?;
            match unit {
                'Y' => interval.months = value.checked_mul(12).and_then(|y| interval.months.checked_add(y)).ok_or_else(err)?,
                'M' => interval.months = interval.months.checked_add(value).ok_or_else(err)?,
                'D' => interval.days = value,
                _ => return Err(err()),
            }
        }
        if let Some(time) = time {
            for (number, unit) in components(time).ok_or_else(err)? {
                let nanos = match unit {
                    'H' => number.parse::<i128>().ok().and_then(|h| h.checked_mul(NANOS_PER_HOUR)),
                    'M' => number.parse::<i128>().ok().and_then(|m| m.checked_mul(NANOS_PER_MINUTE)),
                    'S' => parse_seconds(number),
                    _ => return Err(err()),
                };
                interval.nanos = nanos.and_then(|n| interval.nanos.checked_add(n)).ok_or_else(err)?;
            }
        }
        Ok(interval)
    }
}

/// Splits `1Y-2M3D` into `[("1", 'Y'), ("-2", 'M'), ("3", 'D')]`.
fn components(s: &str) -> Option<Vec<(&str, char)>> {
    let mut out = vec![];
    let mut start = 0;
    for (i, c) in s.char_indices() {
        if c.is_ascii_alphabetic() {
            if i == start {
                return None;
            }
            out.push((&s[start..i], c));
            start = i + c.len_utf8();
        }
    }
    if start != s.len() {
        return None;
    }
    Some(out)
}

fn parse_seconds(s: &str) -> Option<i128> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if fraction.len() > 9 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let whole: i128 = whole.parse().ok()?;
    let fraction: i128 = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<9}").parse().ok()?
    };
    let nanos = whole.checked_mul(NANOS_PER_SECOND)?.checked_add(fraction)?;
    Some(if negative { -nanos } else { nanos })
}

/// The bound used to choose the read timestamp of a read-only transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TimestampBound {
    /// Read at a timestamp where all previously committed transactions are visible.
    #[default]
    Strong,
    /// Read at a timestamp at or after the given one.
    MinReadTimestamp(OffsetDateTime),
    /// Read at a timestamp no older than `now - duration`.
    MaxStaleness(Duration),
    /// Read at exactly the given timestamp.
    ReadTimestamp(OffsetDateTime),
    /// Read at exactly `now - duration`.
    ExactStaleness(Duration),
}

impl TimestampBound {
    pub fn strong_read() -> Self {
        TimestampBound::Strong
    }
    pub fn exact_staleness(d: Duration) -> Self {
        TimestampBound::ExactStaleness(d)
    }
    pub fn max_staleness(d: Duration) -> Self {
        TimestampBound::MaxStaleness(d)
    }
    pub fn min_read_timestamp(t: OffsetDateTime) -> Self {
        TimestampBound::MinReadTimestamp(t)
    }
    pub fn read_timestamp(t: OffsetDateTime) -> Self {
        TimestampBound::ReadTimestamp(t)
    }

    /// Single-use bounds may pick their timestamp lazily; the others are fixed up front.
    pub fn is_single_use_only(&self) -> bool {
        matches!(self, TimestampBound::MinReadTimestamp(_) | TimestampBound::MaxStaleness(_))
    }
}

impl From<TimestampBound> for InternalTimestampBound {
    fn from(tb: TimestampBound) -> Self {
        match tb {
            TimestampBound::Strong => InternalTimestampBound::Strong(true),
            TimestampBound::MinReadTimestamp(t) => InternalTimestampBound::MinReadTimestamp(to_timestamp(t)),
            TimestampBound::MaxStaleness(d) => InternalTimestampBound::MaxStaleness(to_duration(d)),
            TimestampBound::ReadTimestamp(t) => InternalTimestampBound::ReadTimestamp(to_timestamp(t)),
            TimestampBound::ExactStaleness(d) => InternalTimestampBound::ExactStaleness(to_duration(d)),
        }
    }
}

impl From<TimestampBound> for ReadOnly {
    fn from(tb: TimestampBound) -> Self {
        ReadOnly {
            return_read_timestamp: true,
            timestamp_bound: Some(tb.into()),
        }
    }
}

pub(crate) fn to_timestamp(t: OffsetDateTime) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: t.unix_timestamp(),
        nanos: t.nanosecond() as i32,
    }
}

pub(crate) fn to_duration(d: Duration) -> prost_types::Duration {
    prost_types::Duration {
        seconds: i64::try_from(d.as_secs()).unwrap_or(i64::MAX),
        nanos: d.subsec_nanos() as i32,
    }
}

/// `None` for timestamps outside the range `time` can represent.
pub(crate) fn from_timestamp(t: &prost_types::Timestamp) -> Option<OffsetDateTime> {
    let nanos = t.seconds as i128 * NANOS_PER_SECOND + t.nanos as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use time::macros::datetime;

    use crate::value::{
        from_timestamp, to_timestamp, Interval, IntervalParseError, TimestampBound, NANOS_PER_HOUR, NANOS_PER_SECOND,
    };
    use spanwire_googleapis::spanner::v1::transaction_options::read_only::TimestampBound as InternalTimestampBound;
    use spanwire_googleapis::spanner::v1::transaction_options::ReadOnly;

    #[test]
    fn test_interval_format() {
        assert_eq!(Interval::default().to_string(), "P0Y");
        assert_eq!(
            Interval::new(14, 3, 4 * NANOS_PER_HOUR + 5 * 60 * NANOS_PER_SECOND + 6_500_000_000).to_string(),
            "P1Y2M3DT4H5M6.5S"
        );
        assert_eq!(Interval::new(-1, 0, 0).to_string(), "P-1M");
        assert_eq!(Interval::new(0, 0, -1_500_000_000).to_string(), "PT-1.5S");
        assert_eq!(Interval::new(0, 0, 1).to_string(), "PT0.000000001S");
    }

    #[test]
    fn test_interval_parse() {
        let v: Interval = "P1Y2M3DT4H5M6.5S".parse().unwrap();
        assert_eq!(v, Interval::new(14, 3, 4 * NANOS_PER_HOUR + 5 * 60 * NANOS_PER_SECOND + 6_500_000_000));
        let v: Interval = "P-1Y2M".parse().unwrap();
        assert_eq!(v.months, -10);
        let v: Interval = "PT-0.5S".parse().unwrap();
        assert_eq!(v.nanos, -500_000_000);
        let v: Interval = "P0Y".parse().unwrap();
        assert_eq!(v, Interval::default());
        for invalid in ["", "P", "1Y", "PT", "PY", "P1X", "PT1.0000000001S", "P1"] {
            assert!(invalid.parse::<Interval>().is_err(), "{invalid}");
        }
        let v = Interval::new(-25, 7, -3 * NANOS_PER_HOUR - 1);
        assert_eq!(v.to_string().parse::<Interval>().unwrap(), v);
    }

    #[test]
    fn test_interval_parse_overflow() {
        let huge = "1".repeat(36);
        for overflowing in [
            format!("PT{huge}H"),
            format!("PT{huge}M"),
            format!("PT{huge}S"),
            format!("PT{}H{}H", i128::MAX / NANOS_PER_HOUR, i128::MAX / NANOS_PER_HOUR),
            "P2147483647Y".to_string(),
        ] {
            assert_eq!(
                overflowing.parse::<Interval>(),
                Err(IntervalParseError(overflowing.clone())),
                "{overflowing}"
            );
        }
    }

    #[test]
    fn test_timestamp_bound() {
        let ts = datetime!(2024-01-02 03:04:05.000000006 UTC);
        let ro: ReadOnly = TimestampBound::read_timestamp(ts).into();
        assert!(ro.return_read_timestamp);
        match ro.timestamp_bound {
            Some(InternalTimestampBound::ReadTimestamp(t)) => {
                assert_eq!(t.nanos, 6);
                assert_eq!(from_timestamp(&t).unwrap(), ts);
            }
            other => panic!("unexpected {other:?}"),
        }
        let ro: ReadOnly = TimestampBound::exact_staleness(Duration::from_millis(1500)).into();
        match ro.timestamp_bound {
            Some(InternalTimestampBound::ExactStaleness(d)) => {
                assert_eq!(d.seconds, 1);
                assert_eq!(d.nanos, 500_000_000);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(TimestampBound::max_staleness(Duration::from_secs(1)).is_single_use_only());
        assert!(!TimestampBound::strong_read().is_single_use_only());
        assert_eq!(to_timestamp(ts).seconds, ts.unix_timestamp());
    }
}
