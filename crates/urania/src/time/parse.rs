//! Civil date and time-of-day parsing.
//!
//! Birth data arrives as free-form user text. Dates are tried against a fixed
//! list of formats and then a permissive day/month/year pattern; times accept
//! `H:MM AM/PM` and `HH:MM`.

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use super::TimeError;

/// Formats tried in order. Day-first wins over month-first for ambiguous
/// slash dates.
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y", // April 20, 1995
    "%b %d, %Y", // Apr 20, 1995
    "%Y-%m-%d",  // 1995-04-20
    "%d/%m/%Y",  // 20/04/1995
    "%m/%d/%Y",  // 04/20/1995
    "%d-%m-%Y",  // 20-04-1995
];

lazy_static::lazy_static! {
    static ref LOOSE_DATE: Regex =
        Regex::new(r"(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{4})").expect("valid date regex");
    // Trailing zone names or notes ("16:30 IST") are ignored; digits are not.
    static ref CLOCK_TIME: Regex =
        Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?\s*([AaPp][Mm])?[^\d:]*$")
            .expect("valid time regex");
}

/// Parse a civil birth date.
pub fn parse_civil_date(input: &str) -> Result<NaiveDate, TimeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeError::DateParse {
            input: input.to_string(),
        });
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }

    // Last resort: any d/m/yyyy shaped fragment.
    if let Some(caps) = LOOSE_DATE.captures(trimmed) {
        let day = caps[1].parse::<u32>().ok();
        let month = caps[2].parse::<u32>().ok();
        let year = caps[3].parse::<i32>().ok();
        if let (Some(day), Some(month), Some(year)) = (day, month, year) {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Ok(date);
            }
        }
    }

    Err(TimeError::DateParse {
        input: input.to_string(),
    })
}

/// Parse a civil time of day in 12- or 24-hour notation.
pub fn parse_civil_time(input: &str) -> Result<NaiveTime, TimeError> {
    let err = || TimeError::TimeParse {
        input: input.to_string(),
    };

    let caps = CLOCK_TIME.captures(input.trim()).ok_or_else(err)?;
    let mut hour: u32 = caps[1].parse().map_err(|_| err())?;
    let minute: u32 = caps[2].parse().map_err(|_| err())?;
    let second: u32 = match caps.get(3) {
        Some(m) => m.as_str().parse().map_err(|_| err())?,
        None => 0,
    };

    if let Some(period) = caps.get(4) {
        if hour == 0 || hour > 12 {
            return Err(err());
        }
        let pm = period.as_str().eq_ignore_ascii_case("pm");
        hour = match (pm, hour) {
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, 12) => 0,
            (false, h) => h,
        };
    }

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(err)
}
