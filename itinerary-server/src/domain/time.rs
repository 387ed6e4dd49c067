//! Timestamp conversion between the compact numeric form and ISO-8601.
//!
//! Callers send times as integers in `yyyymmddHHMMSS` layout; Digitransit
//! wants and returns ISO-8601 strings with an explicit UTC offset. Encoding
//! fails loudly because its input comes from a validated request. Decoding
//! consumes upstream output and degrades to `None` instead.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// UTC offset attached to encoded timestamps when none is configured.
///
/// Fixed at +03:00 (Finnish summer time); there is no DST awareness.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 3;

/// Offset-carrying layouts accepted by [`decode_timestamp`] besides RFC 3339.
///
/// `%#z` also takes `Z` and offsets without a colon.
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
];

/// Offset-less layouts accepted by [`decode_timestamp`].
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Date-only layout, read as local midnight.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a compact timestamp cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Encode a `yyyymmddHHMMSS` timestamp as `YYYY-MM-DDThh:mm+HH:MM`.
///
/// The digits are read as local wall-clock time in a zone `offset_hours`
/// east of UTC. Seconds are dropped from the output.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::encode_timestamp;
///
/// assert_eq!(
///     encode_timestamp(20250909143003, 3).unwrap(),
///     "2025-09-09T14:30+03:00"
/// );
/// assert!(encode_timestamp(20251309143000, 3).is_err());
/// ```
pub fn encode_timestamp(timestamp: u64, offset_hours: i32) -> Result<String, TimeError> {
    let local = parse_compact(timestamp)?;

    let offset = offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| TimeError::new("UTC offset out of range"))?;

    let zoned = local
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| TimeError::new("ambiguous local time"))?;

    Ok(zoned.format("%Y-%m-%dT%H:%M%:z").to_string())
}

/// Decode an ISO-8601 datetime into a `yyyymmddHHMMSS` integer.
///
/// The result is rendered in the local time of the offset the string
/// carries; no conversion to a common zone happens. Returns `None` for
/// missing, empty or unparseable input.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::decode_timestamp;
///
/// assert_eq!(decode_timestamp(Some("2025-09-09T14:30+03:00")), Some(20250909143000));
/// assert_eq!(decode_timestamp(Some("not-a-date")), None);
/// assert_eq!(decode_timestamp(None), None);
/// ```
pub fn decode_timestamp(iso: Option<&str>) -> Option<u64> {
    let iso = iso.filter(|s| !s.is_empty())?;
    let local = parse_iso_local(iso)?;
    to_compact(&local)
}

/// Parse the 14 digits of a compact timestamp into a naive datetime.
fn parse_compact(timestamp: u64) -> Result<NaiveDateTime, TimeError> {
    let digits = timestamp.to_string();
    let bytes = digits.as_bytes();

    if bytes.len() != 14 {
        return Err(TimeError::new("expected 14 digits (yyyymmddHHMMSS)"));
    }

    let year = parse_digits(&bytes[0..4]).ok_or_else(|| TimeError::new("invalid year digits"))?;
    let month =
        parse_digits(&bytes[4..6]).ok_or_else(|| TimeError::new("invalid month digits"))?;
    let day = parse_digits(&bytes[6..8]).ok_or_else(|| TimeError::new("invalid day digits"))?;
    let hour = parse_digits(&bytes[8..10]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    let minute =
        parse_digits(&bytes[10..12]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    let second =
        parse_digits(&bytes[12..14]).ok_or_else(|| TimeError::new("invalid second digits"))?;

    let date = NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| TimeError::new("not a calendar date"))?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| TimeError::new("not a time of day"))?;

    Ok(date.and_time(time))
}

/// Parse ASCII digit bytes into a u32.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        let digit = (b as char).to_digit(10)?;
        Some(acc * 10 + digit)
    })
}

/// Parse an ISO-8601 string, keeping the wall-clock time of its own offset.
fn parse_iso_local(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.naive_local());
        }
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Render a naive datetime as a `yyyymmddHHMMSS` integer.
///
/// Years outside 0..=9999 do not fit the layout and yield `None`.
fn to_compact(dt: &NaiveDateTime) -> Option<u64> {
    let year = u64::try_from(dt.year()).ok().filter(|y| *y <= 9999)?;

    Some(
        year * 10_000_000_000
            + u64::from(dt.month()) * 100_000_000
            + u64::from(dt.day()) * 1_000_000
            + u64::from(dt.hour()) * 10_000
            + u64::from(dt.minute()) * 100
            + u64::from(dt.second()),
    )
}
