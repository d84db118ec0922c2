//! Date/time display utilities.
//!
//! Wrapper types for formatting wall-clock schedule times and record
//! timestamps in a consistent, human-readable way.

use std::fmt;

use jiff::civil::DateTime;
use jiff::{tz::TimeZone, Timestamp};

/// A wrapper around a scheduled wall-clock time that formats as `HH:MM`.
///
/// Timeline output talks in clock times: "15:00", not full datetimes. The
/// calendar day is carried by the planning and shown once per timeline.
pub struct ClockTime<'a>(pub &'a DateTime);

impl<'a> fmt::Display for ClockTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%H:%M"))
    }
}

/// A wrapper around `Timestamp` that provides system timezone formatting
/// via the `Display` trait.
///
/// Used for record metadata (`created_at`/`updated_at`). The display
/// format follows the pattern `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_clock_time_format() {
        let at = date(2026, 6, 20).at(15, 5, 0, 0);
        assert_eq!(format!("{}", ClockTime(&at)), "15:05");
    }
}
