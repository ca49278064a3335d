//! The 0-100 luck score.
//!
//! Starts from a neutral 50. Each transit-to-natal aspect adds or subtracts a
//! base amount for its kind, scaled by how tight it is, whether it is still
//! applying, and the essential dignity of the natal body it touches.

use serde::{Deserialize, Serialize};

use crate::aspects::{Aspect, AspectKind, AspectPhase, ChartObject};
use crate::chart::SectState;
use crate::ephemeris::Body;
use crate::western::DignityScore;

const BASELINE: f64 = 50.0;

/// Orb at which an aspect's weight is halved.
const HALF_WEIGHT_ORB: f64 = 6.0;

const SEPARATING_FACTOR: f64 = 0.75;

/// Qualitative band of the luck score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VibeStatus {
    Stellar,
    Ascending,
    Shaky,
    Eclipse,
}

impl VibeStatus {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => VibeStatus::Stellar,
            60..=79 => VibeStatus::Ascending,
            40..=59 => VibeStatus::Shaky,
            _ => VibeStatus::Eclipse,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VibeStatus::Stellar => "Stellar",
            VibeStatus::Ascending => "Ascending",
            VibeStatus::Shaky => "Shaky",
            VibeStatus::Eclipse => "Eclipse",
        }
    }
}

/// Signed base contribution of an aspect before scaling.
pub fn base_weight(aspect: &Aspect, sect: &SectState) -> f64 {
    match aspect.kind {
        AspectKind::Trine => 8.0,
        AspectKind::Sextile => 5.0,
        AspectKind::Square => -6.0,
        AspectKind::Opposition => -7.0,
        AspectKind::Conjunction => match aspect.natal {
            ChartObject::Body(body) => conjunction_weight(body, sect),
            _ => 2.0,
        },
    }
}

/// A conjunction is as good or bad as the natal body it lands on.
fn conjunction_weight(body: Body, sect: &SectState) -> f64 {
    if body == sect.sect_benefic() {
        7.0
    } else if body.is_benefic() {
        4.0
    } else if body == sect.out_of_sect_malefic() {
        -8.0
    } else if body == sect.sect_malefic() {
        -3.0
    } else {
        2.0
    }
}

fn dignity_weight(body: Option<Body>, dignities: &[DignityScore]) -> i32 {
    body.and_then(|b| dignities.iter().find(|d| d.body == b))
        .map(|d| d.weight)
        .unwrap_or(0)
}

/// Weighted, clamped luck score.
pub fn luck_score(aspects: &[Aspect], dignities: &[DignityScore], sect: &SectState) -> u8 {
    let total: f64 = aspects
        .iter()
        .map(|aspect| {
            let base = base_weight(aspect, sect);
            let tightness = 1.0 / (1.0 + aspect.orb / HALF_WEIGHT_ORB);
            let phase = match aspect.phase {
                AspectPhase::Applying => 1.0,
                AspectPhase::Separating => SEPARATING_FACTOR,
            };
            // Dignity amplifies good contacts and cushions bad ones.
            let w = f64::from(dignity_weight(aspect.natal.body(), dignities));
            let dignity = if base >= 0.0 {
                1.0 + w / 10.0
            } else {
                1.0 - w / 10.0
            };
            base * tightness * phase * dignity
        })
        .sum();

    (BASELINE + total).round().clamp(0.0, 100.0) as u8
}
