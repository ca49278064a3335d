use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::sidereal::SiderealStandard;
use crate::ephemeris::coords::normalize_degrees;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris tables unavailable at {path}: {message}")]
    Unavailable { path: String, message: String },
    #[error("Body {body} is not supported by this provider")]
    UnknownBody { body: Body },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed {
        body: Body,
        jd: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Observer location out of range: lat {latitude}, lon {longitude}")]
    InvalidObserver { latitude: f64, longitude: f64 },
}

/// Tracked celestial bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
}

impl Body {
    /// Every body placed in a natal chart.
    pub const ALL: [Body; 12] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::NorthNode,
        Body::SouthNode,
    ];

    /// Bodies followed by the transit engine. Nodes are natal-only.
    pub const TRANSITING: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
        }
    }

    pub fn is_node(self) -> bool {
        matches!(self, Body::NorthNode | Body::SouthNode)
    }

    /// The seven visible planets of the traditional scheme.
    pub fn is_classical(self) -> bool {
        matches!(
            self,
            Body::Sun
                | Body::Moon
                | Body::Mercury
                | Body::Venus
                | Body::Mars
                | Body::Jupiter
                | Body::Saturn
        )
    }

    pub fn is_benefic(self) -> bool {
        matches!(self, Body::Venus | Body::Jupiter)
    }

    pub fn is_malefic(self) -> bool {
        matches!(self, Body::Mars | Body::Saturn)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Geographic observer on the Earth's surface, altitude 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    /// Latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
}

impl ObserverLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, EphemerisError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(EphemerisError::InvalidObserver {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Ecliptic position straight from a backend: tropical, of date, geocentric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPosition {
    /// Longitude in degrees (any range, normalized by the caller)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

/// Planetary position data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub body: Body,
    /// Longitude in degrees [0, 360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day); negative when retrograde
    pub speed: f64,
    /// Sign index, 0 = Aries
    pub sign: u8,
    /// Degrees into the sign [0, 30)
    pub degree_in_sign: f64,
    pub retrograde: bool,
}

impl PlanetPosition {
    pub fn new(body: Body, raw: RawPosition) -> Self {
        let longitude = normalize_degrees(raw.longitude);
        let (sign, degree_in_sign) = sign_and_degree(longitude);
        Self {
            body,
            longitude,
            latitude: raw.latitude,
            distance: raw.distance,
            speed: raw.speed,
            sign,
            degree_in_sign,
            retrograde: raw.speed < 0.0,
        }
    }
}

/// Split a normalized longitude into (sign index, degree within sign).
pub fn sign_and_degree(longitude: f64) -> (u8, f64) {
    let lon = normalize_degrees(longitude);
    let sign = ((lon / 30.0).floor() as u8).min(11);
    let degree = lon - f64::from(sign) * 30.0;
    (sign, degree.max(0.0))
}

/// Reference frame for reported longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "standard")]
pub enum ZodiacFrame {
    Tropical,
    Sidereal(SiderealStandard),
}

impl Default for ZodiacFrame {
    fn default() -> Self {
        ZodiacFrame::Tropical
    }
}

/// Which backend tier is answering position queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Swiss Ephemeris tables.
    Precise,
    /// Closed-form analytic model.
    Degraded,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Precise => f.write_str("precise"),
            Precision::Degraded => f.write_str("degraded"),
        }
    }
}

/// Ascendant and midheaven in tropical longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartAngles {
    pub ascendant: f64,
    pub midheaven: f64,
}

/// Settings for constructing the ephemeris service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisConfig {
    /// Directory holding Swiss Ephemeris `.se1` files. `None` selects the
    /// analytic tier.
    pub path: Option<std::path::PathBuf>,
    pub sidereal_standard: SiderealStandard,
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        Self {
            path: None,
            sidereal_standard: SiderealStandard::Lahiri,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_degree_ranges() {
        for i in 0..3600 {
            let lon = i as f64 * 0.1;
            let (sign, deg) = sign_and_degree(lon);
            assert!(sign <= 11);
            assert!((0.0..30.0).contains(&deg), "lon {} gave {}", lon, deg);
            assert_eq!(sign, (lon / 30.0).floor() as u8);
        }
    }

    #[test]
    fn sign_boundaries() {
        assert_eq!(sign_and_degree(0.0), (0, 0.0));
        assert_eq!(sign_and_degree(30.0), (1, 0.0));
        assert_eq!(sign_and_degree(-0.5).0, 11);
        assert_eq!(sign_and_degree(360.0), (0, 0.0));
    }

    #[test]
    fn retrograde_follows_speed() {
        let raw = RawPosition {
            longitude: 372.5,
            latitude: 1.0,
            distance: 1.2,
            speed: -0.3,
        };
        let pos = PlanetPosition::new(Body::Mercury, raw);
        assert!(pos.retrograde);
        assert!((pos.longitude - 12.5).abs() < 1e-9);
        assert_eq!(pos.sign, 0);
    }

    #[test]
    fn observer_validation() {
        assert!(ObserverLocation::new(28.6139, 77.2090).is_ok());
        assert!(ObserverLocation::new(91.0, 0.0).is_err());
        assert!(ObserverLocation::new(0.0, -180.5).is_err());
        assert!(ObserverLocation::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn body_sets() {
        assert!(Body::TRANSITING.iter().all(|b| !b.is_node()));
        assert_eq!(Body::ALL.iter().filter(|b| b.is_classical()).count(), 7);
    }
}
