//! Natal/transit computation core.
//!
//! Turns a birth moment, a birth place and a query moment into a
//! [`cdo::CosmicDataObject`]: planetary positions, chart angles, whole-sign
//! houses, sect, the annual profection, transit-to-natal aspects and the
//! dignity/severity scores derived from them.

pub mod aspects;
pub mod cdo;
pub mod chart;
pub mod ephemeris;
pub mod scoring;
pub mod time;
pub mod western;

pub use aspects::{Aspect, AspectCalculator, AspectKind, AspectPhase, OrbTable};
pub use cdo::{BirthData, CdoAssembler, CdoError, CdoSummary, CosmicDataObject};
pub use chart::{NatalChart, NatalChartBuilder, SectState, TransitEngine};
pub use ephemeris::{
    Body, Ephemeris, EphemerisConfig, ObserverLocation, PlanetPosition, Precision,
    SiderealStandard, ZodiacFrame,
};
pub use scoring::{MaleficSeverity, VibeStatus};
pub use time::{JulianDay, TimeConfidence};
pub use western::{Dignity, DignityScore, ProfectionResult, ZodiacSign};
