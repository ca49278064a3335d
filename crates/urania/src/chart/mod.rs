pub mod houses;
pub mod natal;
pub mod sect;
pub mod transit;

pub use houses::{whole_sign_house, HouseAssignment, HousePlacement};
pub use natal::{ChartPoint, NatalChart, NatalChartBuilder};
pub use sect::{determine_sect, SectState};
pub use transit::TransitEngine;

use thiserror::Error;

use crate::ephemeris::EphemerisError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Solar altitude unavailable: {message}")]
    AltitudeUnavailable { message: String },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}
