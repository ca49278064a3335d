//! Malefic severity: how hard Saturn and Mars are pressing this year.
//!
//! Hard aspects touching a malefic add load. The malefic of the chart's own
//! sect is tempered (Saturn in a day chart, Mars in a night chart) while the
//! out-of-sect malefic is aggravated, so an identical aspect pattern reads
//! milder in one sect than the other.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aspects::{Aspect, AspectKind};
use crate::chart::SectState;
use crate::ephemeris::Body;

const IN_SECT_FACTOR: f64 = 0.5;
const OUT_OF_SECT_FACTOR: f64 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaleficSeverity {
    Benign,
    Constructive,
    Tense,
    Severe,
}

impl MaleficSeverity {
    pub fn from_load(load: f64) -> Self {
        if load <= 0.0 {
            MaleficSeverity::Benign
        } else if load < 2.0 {
            MaleficSeverity::Constructive
        } else if load < 4.0 {
            MaleficSeverity::Tense
        } else {
            MaleficSeverity::Severe
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MaleficSeverity::Benign => "benign",
            MaleficSeverity::Constructive => "constructive",
            MaleficSeverity::Tense => "tense",
            MaleficSeverity::Severe => "severe",
        }
    }
}

impl fmt::Display for MaleficSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn kind_load(kind: AspectKind) -> f64 {
    match kind {
        AspectKind::Square | AspectKind::Opposition => 2.0,
        AspectKind::Conjunction => 1.5,
        AspectKind::Trine | AspectKind::Sextile => 0.0,
    }
}

/// Aggregate malefic load of `aspects` under `sect`.
pub fn malefic_load(sect: &SectState, aspects: &[Aspect]) -> f64 {
    aspects
        .iter()
        .filter_map(|aspect| {
            // Harsher factor wins when both ends are malefic.
            [Body::Saturn, Body::Mars]
                .iter()
                .filter(|m| aspect.involves(**m))
                .map(|m| {
                    if *m == sect.sect_malefic() {
                        IN_SECT_FACTOR
                    } else {
                        OUT_OF_SECT_FACTOR
                    }
                })
                .reduce(f64::max)
                .map(|factor| kind_load(aspect.kind) * factor)
        })
        .sum()
}

pub fn malefic_severity(sect: &SectState, aspects: &[Aspect]) -> MaleficSeverity {
    MaleficSeverity::from_load(malefic_load(sect, aspects))
}
