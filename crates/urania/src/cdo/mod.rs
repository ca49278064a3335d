pub mod assembler;
pub mod summary;
pub mod types;

pub use assembler::CdoAssembler;
pub use summary::{CdoSummary, DIGNITY_WARNING_THRESHOLD};
pub use types::{BirthData, CosmicDataObject};

use thiserror::Error;

use crate::ephemeris::EphemerisError;
use crate::time::TimeError;

/// Errors surfaced to the caller of the assembler.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CdoError {
    /// Bad birth date or offset. The request should be rejected.
    #[error(transparent)]
    DateParse(#[from] TimeError),
    #[error("Invalid birth location: {0}")]
    InvalidLocation(EphemerisError),
    /// CDO unavailable; the caller should fall back to a coarser estimate.
    #[error("CDO unavailable: {0}")]
    Assembly(String),
}
