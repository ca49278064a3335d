#[cfg(feature = "swisseph")]
pub mod adapter;
pub mod analytic;
pub mod coords;
pub mod provider;
pub mod sidereal;
pub mod types;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use analytic::AnalyticEphemeris;
pub use provider::{Ephemeris, EphemerisProvider};
pub use sidereal::{SiderealStandard, UnknownSiderealStandard};
pub use types::{
    sign_and_degree, Body, ChartAngles, EphemerisConfig, EphemerisError, ObserverLocation,
    PlanetPosition, Precision, RawPosition, ZodiacFrame,
};
