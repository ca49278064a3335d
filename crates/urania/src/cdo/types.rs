use serde::{Deserialize, Serialize};

use super::CdoError;
use crate::aspects::Aspect;
use crate::chart::{ChartPoint, HouseAssignment, SectState};
use crate::ephemeris::{PlanetPosition, Precision, ZodiacFrame};
use crate::scoring::MaleficSeverity;
use crate::time::{JulianDay, TimeConfidence};
use crate::western::{DignityScore, ProfectionResult};

/// Birth tuple as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub birth_date: String,
    #[serde(default)]
    pub birth_time: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Hours east of UTC; UTC when absent.
    #[serde(default)]
    pub utc_offset_hours: Option<f64>,
    /// Report longitudes in the configured sidereal frame.
    #[serde(default)]
    pub sidereal: bool,
    /// Compute transits from the birth place instead of the Earth's centre.
    #[serde(default)]
    pub topocentric_transits: bool,
}

impl BirthData {
    pub fn new(birth_date: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            birth_date: birth_date.into(),
            birth_time: None,
            latitude,
            longitude,
            utc_offset_hours: None,
            sidereal: false,
            topocentric_transits: false,
        }
    }

    pub fn with_time(mut self, birth_time: impl Into<String>) -> Self {
        self.birth_time = Some(birth_time.into());
        self
    }

    pub fn with_offset(mut self, hours: f64) -> Self {
        self.utc_offset_hours = Some(hours);
        self
    }
}

/// The Cosmic Data Object: everything computed for one birth tuple at one
/// query moment. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmicDataObject {
    pub birth_julian_day: JulianDay,
    pub query_julian_day: JulianDay,
    pub time_confidence: TimeConfidence,
    pub precision: Precision,
    pub frame: ZodiacFrame,
    pub ayanamsa: Option<f64>,
    pub ascendant: ChartPoint,
    pub midheaven: ChartPoint,
    pub natal_planets: Vec<PlanetPosition>,
    pub houses: HouseAssignment,
    pub sect: SectState,
    pub transits: Vec<PlanetPosition>,
    pub age: u32,
    pub profection: ProfectionResult,
    pub aspects: Vec<Aspect>,
    pub dignities: Vec<DignityScore>,
    pub luck_score: u8,
    pub malefic_severity: MaleficSeverity,
}

impl CosmicDataObject {
    /// Plain key/value wire document.
    pub fn to_document(&self) -> Result<serde_json::Value, CdoError> {
        serde_json::to_value(self).map_err(|e| CdoError::Assembly(e.to_string()))
    }

    pub fn from_document(document: serde_json::Value) -> Result<Self, CdoError> {
        serde_json::from_value(document).map_err(|e| CdoError::Assembly(e.to_string()))
    }
}
