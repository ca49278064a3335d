//! Condensed, flat projection of a CDO for downstream prompt building.

use serde::{Deserialize, Serialize};

use super::types::CosmicDataObject;
use crate::ephemeris::Precision;
use crate::scoring::{aspect_label, most_significant, MaleficSeverity, VibeStatus, NO_MAJOR_ASPECT};
use crate::time::TimeConfidence;
use crate::western::Dignity;

/// Natal dignity weights below this raise a warning.
pub const DIGNITY_WARNING_THRESHOLD: i32 = -3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdoSummary {
    /// "Diurnal" or "Nocturnal"
    pub sect: String,
    /// Sign and degree, e.g. "Leo 12.34°"
    pub ascendant: String,
    pub is_cusp: bool,
    pub time_lord: String,
    pub profection_house: u8,
    pub profection_theme: String,
    pub major_aspect: String,
    /// Labels of the aspects touching the time lord.
    pub time_lord_activation: Vec<String>,
    /// Empty when no natal body is debilitated.
    pub dignity_warning: String,
    pub malefic_severity: MaleficSeverity,
    pub luck_score: u8,
    pub vibe_status: VibeStatus,
    pub time_confidence: TimeConfidence,
    pub precision: Precision,
}

impl CosmicDataObject {
    pub fn summary(&self) -> CdoSummary {
        let time_lord = self.profection.time_lord;

        let major_aspect = most_significant(&self.aspects)
            .map(aspect_label)
            .unwrap_or_else(|| NO_MAJOR_ASPECT.to_string());

        let time_lord_activation = self
            .aspects
            .iter()
            .filter(|a| a.involves(time_lord))
            .map(aspect_label)
            .collect();

        let dignity_warning = self
            .dignities
            .iter()
            .filter(|d| d.weight < DIGNITY_WARNING_THRESHOLD)
            .map(|d| {
                let state = match d.dignity {
                    Dignity::Detriment => "detriment",
                    Dignity::Fall => "fall",
                    _ => "debility",
                };
                format!("{} in {} ({})", d.body, state, d.sign)
            })
            .collect::<Vec<_>>()
            .join("; ");

        CdoSummary {
            sect: self.sect.label().to_string(),
            ascendant: self.ascendant.label(),
            is_cusp: self.ascendant.is_cusp(),
            time_lord: time_lord.name().to_string(),
            profection_house: self.profection.active_house,
            profection_theme: self.profection.theme.clone(),
            major_aspect,
            time_lord_activation,
            dignity_warning,
            malefic_severity: self.malefic_severity,
            luck_score: self.luck_score,
            vibe_status: VibeStatus::from_score(self.luck_score),
            time_confidence: self.time_confidence,
            precision: self.precision,
        }
    }
}
