//! Essential dignity for Western astrology.
//!
//! Domicile and detriment are sign-based. Exaltation and fall are
//! degree-based: a body is exalted only within [`EXALTATION_ORB`] of its
//! exact exaltation degree, and in fall within the same orb of the opposite
//! point.

use serde::{Deserialize, Serialize};

use super::rulers::domiciles;
use super::signs::ZodiacSign;
use crate::ephemeris::coords::{angular_separation, normalize_degrees};
use crate::ephemeris::Body;

/// Orb around the exact exaltation degree, in degrees.
pub const EXALTATION_ORB: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dignity {
    Domicile,
    Exaltation,
    Detriment,
    Fall,
    Peregrine,
}

impl Dignity {
    pub fn weight(self) -> i32 {
        match self {
            Dignity::Domicile => 5,
            Dignity::Exaltation => 4,
            Dignity::Detriment => -5,
            Dignity::Fall => -4,
            Dignity::Peregrine => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DignityScore {
    pub body: Body,
    pub sign: ZodiacSign,
    pub dignity: Dignity,
    pub weight: i32,
}

/// Exact exaltation longitudes of the seven classical planets.
pub fn exact_exaltation(body: Body) -> Option<f64> {
    match body {
        Body::Sun => Some(19.0),      // 19 Aries
        Body::Moon => Some(33.0),     // 3 Taurus
        Body::Mercury => Some(165.0), // 15 Virgo
        Body::Venus => Some(357.0),   // 27 Pisces
        Body::Mars => Some(298.0),    // 28 Capricorn
        Body::Jupiter => Some(105.0), // 15 Cancer
        Body::Saturn => Some(201.0),  // 21 Libra
        _ => None,
    }
}

/// Dignity of `body` at ecliptic `longitude`.
pub fn dignity_of(body: Body, longitude: f64) -> DignityScore {
    let longitude = normalize_degrees(longitude);
    let sign = ZodiacSign::from_longitude(longitude);
    let ruled = domiciles(body);

    let near = |target: f64| angular_separation(longitude, target) <= EXALTATION_ORB;
    let exaltation = exact_exaltation(body);

    let dignity = if ruled.contains(&sign) {
        Dignity::Domicile
    } else if exaltation.map_or(false, near) {
        Dignity::Exaltation
    } else if ruled.iter().any(|s| s.opposite() == sign) {
        Dignity::Detriment
    } else if exaltation.map_or(false, |e| near(e + 180.0)) {
        Dignity::Fall
    } else {
        Dignity::Peregrine
    };

    DignityScore {
        body,
        sign,
        dignity,
        weight: dignity.weight(),
    }
}
