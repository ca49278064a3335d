use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::ephemeris::Body;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AspectError {
    #[error("Invalid orb for {kind}: {value} (must be > 0 and <= {max})")]
    InvalidOrb {
        kind: AspectKind,
        value: f64,
        max: f64,
    },
}

/// The five major (Ptolemaic) aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Matching order: the first kind whose orb admits a separation wins.
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Opposition,
        AspectKind::Trine,
        AspectKind::Square,
        AspectKind::Sextile,
    ];

    /// Exact angle in degrees.
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn is_harmonious(self) -> bool {
        matches!(self, AspectKind::Trine | AspectKind::Sextile)
    }

    pub fn is_discordant(self) -> bool {
        matches!(self, AspectKind::Square | AspectKind::Opposition)
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectPhase {
    /// Moving toward exactitude.
    Applying,
    /// Moving away from exactitude, or not moving relative to the target.
    Separating,
}

/// A natal point an aspect can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartObject {
    Body(Body),
    Ascendant,
    Midheaven,
}

impl ChartObject {
    pub fn body(self) -> Option<Body> {
        match self {
            ChartObject::Body(body) => Some(body),
            _ => None,
        }
    }
}

impl fmt::Display for ChartObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartObject::Body(body) => write!(f, "{}", body),
            ChartObject::Ascendant => f.write_str("Ascendant"),
            ChartObject::Midheaven => f.write_str("Midheaven"),
        }
    }
}

/// A natal longitude with its daily motion (zero for angles).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectTarget {
    pub object: ChartObject,
    pub longitude: f64,
    pub speed: f64,
}

/// Core aspect information
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectCore {
    pub kind: AspectKind,
    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub exact_angle: f64,
    /// Orb value (deviation from exact angle)
    pub orb: f64,
    pub phase: AspectPhase,
    /// Whether the aspect is exact (within 0.1 degrees)
    pub is_exact: bool,
    /// Whether the moving body is retrograde
    pub is_retrograde: bool,
}

/// A transit-to-natal aspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub transiting: Body,
    pub natal: ChartObject,
    pub kind: AspectKind,
    pub exact_angle: f64,
    pub orb: f64,
    pub phase: AspectPhase,
    pub is_exact: bool,
    pub is_retrograde: bool,
}

impl Aspect {
    pub fn from_core(transiting: Body, natal: ChartObject, core: AspectCore) -> Self {
        Self {
            transiting,
            natal,
            kind: core.kind,
            exact_angle: core.exact_angle,
            orb: core.orb,
            phase: core.phase,
            is_exact: core.is_exact,
            is_retrograde: core.is_retrograde,
        }
    }

    pub fn is_applying(&self) -> bool {
        self.phase == AspectPhase::Applying
    }

    /// Whether `body` is on either end of the aspect.
    pub fn involves(&self, body: Body) -> bool {
        self.transiting == body || self.natal == ChartObject::Body(body)
    }
}

/// Maximum orb per aspect kind, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbTable {
    pub conjunction: f64,
    pub sextile: f64,
    pub square: f64,
    pub trine: f64,
    pub opposition: f64,
}

impl OrbTable {
    /// Largest orb accepted. Keeps adjacent aspects from overlapping.
    pub const MAX_ORB: f64 = 12.0;

    pub fn get(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Conjunction => self.conjunction,
            AspectKind::Sextile => self.sextile,
            AspectKind::Square => self.square,
            AspectKind::Trine => self.trine,
            AspectKind::Opposition => self.opposition,
        }
    }

    pub fn validate(&self) -> Result<(), AspectError> {
        for kind in AspectKind::ALL {
            let value = self.get(kind);
            if !(value > 0.0 && value <= Self::MAX_ORB) {
                return Err(AspectError::InvalidOrb {
                    kind,
                    value,
                    max: Self::MAX_ORB,
                });
            }
        }
        Ok(())
    }
}

impl Default for OrbTable {
    fn default() -> Self {
        Self {
            conjunction: 6.0,
            sextile: 4.0,
            square: 6.0,
            trine: 6.0,
            opposition: 6.0,
        }
    }
}
