use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Julian Day of the Unix epoch (1970-01-01T00:00:00Z).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Absolute astronomical time as a continuous Julian Day count (UT).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDay(pub f64);

impl JulianDay {
    /// JD of the J2000.0 epoch (2000-01-01T12:00:00).
    pub const J2000: f64 = 2_451_545.0;

    /// Convert a UTC instant to Julian Day.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
        JulianDay(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }

    /// Convert back to a UTC instant, rounded to the millisecond.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let millis = ((self.0 - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
        if !millis.is_finite() {
            return None;
        }
        Utc.timestamp_millis_opt(millis as i64).single()
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Julian centuries since J2000.0.
    pub fn centuries_since_j2000(self) -> f64 {
        (self.0 - Self::J2000) / 36_525.0
    }

    /// Shift by a (possibly fractional) number of days.
    pub fn offset_days(self, days: f64) -> Self {
        JulianDay(self.0 + days)
    }
}
