//! Date and time formatting for minute entries.

use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Formats a date as e.g. `Wednesday 14 October 2026`.
pub fn format_date<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%A %-d %B %Y").to_string()
}

/// Formats a time on a 12-hour clock with the zone, e.g. `2:05 pm UTC`.
pub fn format_time<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%-I:%M %P %Z").to_string()
}

/// Today's local date.
pub fn today() -> String {
    format_date(&Local::now())
}

/// The current local time.
pub fn now() -> String {
    format_time(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_date() {
        let at = Utc.with_ymd_and_hms(2026, 10, 14, 14, 5, 0).unwrap();
        assert_eq!(format_date(&at), "Wednesday 14 October 2026");
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        assert_eq!(format_date(&at), "Sunday 1 March 2026");
    }

    #[test]
    fn test_format_time() {
        let at = Utc.with_ymd_and_hms(2026, 10, 14, 14, 5, 0).unwrap();
        assert_eq!(format_time(&at), "2:05 pm UTC");
        let at = Utc.with_ymd_and_hms(2026, 10, 14, 0, 30, 0).unwrap();
        assert_eq!(format_time(&at), "12:30 am UTC");
    }
}
