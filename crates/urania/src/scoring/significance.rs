//! Ranking aspects to pick the one worth headlining.

use crate::aspects::{Aspect, AspectKind, AspectPhase, ChartObject};
use crate::ephemeris::Body;

/// Sentinel used when there is no aspect to report.
pub const NO_MAJOR_ASPECT: &str = "none";

fn kind_weight(kind: AspectKind) -> f64 {
    match kind {
        AspectKind::Conjunction => 1.0,
        AspectKind::Opposition => 0.9,
        AspectKind::Square => 0.85,
        AspectKind::Trine => 0.7,
        AspectKind::Sextile => 0.5,
    }
}

/// Slow movers shape a year; the Moon passes in hours.
fn transit_weight(body: Body) -> f64 {
    match body {
        Body::Pluto | Body::Neptune | Body::Uranus | Body::Saturn => 1.0,
        Body::Jupiter => 0.9,
        Body::Mars => 0.7,
        Body::Sun | Body::Venus | Body::Mercury => 0.5,
        Body::Moon => 0.3,
        Body::NorthNode | Body::SouthNode => 0.4,
    }
}

fn natal_weight(target: ChartObject) -> f64 {
    match target {
        ChartObject::Body(Body::Sun) | ChartObject::Body(Body::Moon) => 1.2,
        ChartObject::Ascendant | ChartObject::Midheaven => 1.2,
        ChartObject::Body(b) if b.is_node() => 0.8,
        ChartObject::Body(_) => 1.0,
    }
}

/// Relative importance of an aspect; larger is more significant.
pub fn significance(aspect: &Aspect) -> f64 {
    let tightness = 1.0 / (1.0 + aspect.orb);
    let phase = match aspect.phase {
        AspectPhase::Applying => 1.2,
        AspectPhase::Separating => 1.0,
    };
    kind_weight(aspect.kind)
        * tightness
        * phase
        * transit_weight(aspect.transiting)
        * natal_weight(aspect.natal)
}

/// The single most significant aspect. Ties keep the earlier aspect.
pub fn most_significant(aspects: &[Aspect]) -> Option<&Aspect> {
    aspects.iter().fold(None, |best: Option<&Aspect>, a| match best {
        Some(b) if significance(b) >= significance(a) => Some(b),
        _ => Some(a),
    })
}

/// e.g. "Transit Saturn square natal Sun (orb 1.23°, applying)"
pub fn aspect_label(aspect: &Aspect) -> String {
    let phase = match aspect.phase {
        AspectPhase::Applying => "applying",
        AspectPhase::Separating => "separating",
    };
    format!(
        "Transit {} {} natal {} (orb {:.2}°, {})",
        aspect.transiting, aspect.kind, aspect.natal, aspect.orb, phase
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspect(transiting: Body, natal: ChartObject, kind: AspectKind, orb: f64) -> Aspect {
        Aspect {
            transiting,
            natal,
            kind,
            exact_angle: kind.angle(),
            orb,
            phase: AspectPhase::Applying,
            is_exact: false,
            is_retrograde: false,
        }
    }

    #[test]
    fn slow_tight_aspects_win() {
        let aspects = [
            aspect(Body::Moon, ChartObject::Body(Body::Sun), AspectKind::Conjunction, 0.2),
            aspect(Body::Saturn, ChartObject::Body(Body::Sun), AspectKind::Square, 1.23),
            aspect(Body::Jupiter, ChartObject::Body(Body::Venus), AspectKind::Sextile, 3.0),
        ];
        let best = most_significant(&aspects).unwrap();
        assert_eq!(best.transiting, Body::Saturn);
        assert_eq!(
            aspect_label(best),
            "Transit Saturn square natal Sun (orb 1.23°, applying)"
        );
    }

    #[test]
    fn empty_has_none() {
        assert!(most_significant(&[]).is_none());
    }

    #[test]
    fn angle_label() {
        let a = aspect(Body::Pluto, ChartObject::Ascendant, AspectKind::Opposition, 0.5);
        assert_eq!(
            aspect_label(&a),
            "Transit Pluto opposition natal Ascendant (orb 0.50°, applying)"
        );
    }
}
