//! Civil time normalization.
//!
//! Converts a user-supplied birth date, optional birth time and UTC offset into
//! an absolute [`JulianDay`], and computes birthday-exact ages.

pub mod julian;
pub mod parse;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use julian::JulianDay;
pub use parse::{parse_civil_date, parse_civil_time};

/// Errors raised while resolving civil time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeError {
    #[error("Unrecognized birth date: {input:?}")]
    DateParse { input: String },
    #[error("Unrecognized birth time: {input:?}")]
    TimeParse { input: String },
    #[error("UTC offset out of range: {hours} hours")]
    InvalidOffset { hours: f64 },
}

/// Whether the birth time was supplied or assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeConfidence {
    /// A parseable birth time was given.
    Exact,
    /// No usable birth time; local noon was assumed. Angles, houses and sect
    /// are approximate.
    Assumed,
}

/// A birth moment resolved to absolute time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthMoment {
    pub local: NaiveDateTime,
    pub utc: DateTime<Utc>,
    pub julian_day: JulianDay,
    pub utc_offset_hours: f64,
    pub time_confidence: TimeConfidence,
}

fn local_noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Resolve a civil date/time at a fixed UTC offset to absolute time.
///
/// An unparseable date is an error. A missing or unparseable time falls back
/// to local noon and is reported as [`TimeConfidence::Assumed`].
pub fn to_absolute_time(
    civil_date: &str,
    civil_time: Option<&str>,
    utc_offset_hours: f64,
) -> Result<BirthMoment, TimeError> {
    if !utc_offset_hours.is_finite() || utc_offset_hours.abs() > 14.0 {
        return Err(TimeError::InvalidOffset {
            hours: utc_offset_hours,
        });
    }

    let date = parse_civil_date(civil_date)?;

    let (time, time_confidence) = match civil_time.map(str::trim).filter(|t| !t.is_empty()) {
        None => (local_noon(), TimeConfidence::Assumed),
        Some(raw) => match parse_civil_time(raw) {
            Ok(time) => (time, TimeConfidence::Exact),
            Err(e) => {
                log::warn!("{}; assuming local noon", e);
                (local_noon(), TimeConfidence::Assumed)
            }
        },
    };

    let local = date.and_time(time);
    let offset = Duration::milliseconds((utc_offset_hours * 3_600_000.0).round() as i64);
    let utc = (local - offset).and_utc();
    let julian_day = JulianDay::from_utc(utc);

    log::debug!(
        "Resolved {} (UTC{:+}) to JD {:.6}",
        local,
        utc_offset_hours,
        julian_day.value()
    );

    Ok(BirthMoment {
        local,
        utc,
        julian_day,
        utc_offset_hours,
        time_confidence,
    })
}

/// Completed years between `birth` and `on`, by calendar comparison.
///
/// Never negative: a query date before the birth date yields 0.
pub fn age_on(birth: NaiveDate, on: NaiveDate) -> u32 {
    let mut years = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
