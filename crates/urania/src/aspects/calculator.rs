use crate::aspects::types::{
    Aspect, AspectCore, AspectKind, AspectPhase, AspectTarget, OrbTable,
};
use crate::ephemeris::coords::{angular_separation, signed_delta};
use crate::ephemeris::PlanetPosition;

/// Orb below which an aspect counts as exact.
const EXACT_ORB: f64 = 0.1;

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    orbs: OrbTable,
}

impl AspectCalculator {
    pub fn new(orbs: OrbTable) -> Self {
        Self { orbs }
    }

    pub fn orbs(&self) -> &OrbTable {
        &self.orbs
    }

    /// Aspects from every transiting body to every natal target.
    ///
    /// A transiting body may aspect its own natal place (a return).
    pub fn aspects_between(
        &self,
        transiting: &[PlanetPosition],
        natal: &[AspectTarget],
    ) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for t in transiting {
            for n in natal {
                if let Some(core) =
                    self.calculate_aspect(t.longitude, n.longitude, t.speed, n.speed)
                {
                    aspects.push(Aspect::from_core(t.body, n.object, core));
                }
            }
        }
        aspects
    }

    /// Calculate aspect between two longitudes using their speeds.
    ///
    /// The first body is the moving (transiting) one for the retrograde flag.
    pub fn calculate_aspect(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
    ) -> Option<AspectCore> {
        let angle_diff = angular_separation(lon1, lon2);

        for kind in AspectKind::ALL {
            let aspect_angle = kind.angle();
            let orb_value = (angle_diff - aspect_angle).abs();

            if orb_value <= self.orbs.get(kind) {
                let phase = if is_aspect_applying(lon1, lon2, speed1, speed2, aspect_angle) {
                    AspectPhase::Applying
                } else {
                    AspectPhase::Separating
                };

                return Some(AspectCore {
                    kind,
                    exact_angle: aspect_angle,
                    orb: orb_value,
                    phase,
                    is_exact: orb_value < EXACT_ORB,
                    is_retrograde: speed1 < 0.0,
                });
            }
        }

        None
    }
}

/// Determine if an aspect is applying (approaching exact) or separating.
///
/// Uses the instantaneous rate of the distance from exact: the signed gap
/// moves at the relative speed, so the distance shrinks when the gap, its
/// offset from the aspect angle and the relative speed have a negative
/// product. Exact aspects and equal speeds count as separating. Swapping the
/// two bodies negates both the gap and the relative speed, so the verdict is
/// symmetric.
fn is_aspect_applying(
    lon1: f64,
    lon2: f64,
    speed1: f64,
    speed2: f64,
    aspect_angle: f64,
) -> bool {
    let relative_speed = speed1 - speed2;
    if relative_speed == 0.0 || !relative_speed.is_finite() {
        return false;
    }

    let signed_diff = signed_delta(lon2, lon1);
    let offset = signed_diff.abs() - aspect_angle;
    if offset == 0.0 || signed_diff == 0.0 {
        return false;
    }

    offset.signum() * signed_diff.signum() * relative_speed < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> AspectCalculator {
        AspectCalculator::default()
    }

    #[test]
    fn finds_trine_within_orb() {
        let core = calc().calculate_aspect(10.0, 128.0, 1.0, 0.0).unwrap();
        assert_eq!(core.kind, AspectKind::Trine);
        assert!((core.orb - 2.0).abs() < 1e-9);
        assert!(!core.is_exact);
    }

    #[test]
    fn sextile_uses_tighter_orb() {
        assert!(calc().calculate_aspect(0.0, 64.5, 1.0, 0.0).is_none());
        assert_eq!(
            calc().calculate_aspect(0.0, 63.5, 1.0, 0.0).unwrap().kind,
            AspectKind::Sextile
        );
    }

    #[test]
    fn conjunction_across_aries_point() {
        let core = calc().calculate_aspect(359.0, 1.0, 1.0, 0.0).unwrap();
        assert_eq!(core.kind, AspectKind::Conjunction);
        assert!((core.orb - 2.0).abs() < 1e-9);
        // 359 moving forward closes on 1.
        assert_eq!(core.phase, AspectPhase::Applying);
    }

    #[test]
    fn applying_and_separating() {
        // Faster body behind the square point: applying.
        let a = calc().calculate_aspect(85.0, 0.0, 1.0, 0.0).unwrap();
        assert_eq!(a.phase, AspectPhase::Applying);
        // Past the square point and still moving away: separating.
        let s = calc().calculate_aspect(95.0, 0.0, 1.0, 0.0).unwrap();
        assert_eq!(s.phase, AspectPhase::Separating);
        // Retrograde back toward it: applying again, and flagged.
        let r = calc().calculate_aspect(95.0, 0.0, -0.5, 0.0).unwrap();
        assert_eq!(r.phase, AspectPhase::Applying);
        assert!(r.is_retrograde);
    }

    #[test]
    fn stationary_pair_is_separating() {
        let core = calc().calculate_aspect(100.0, 100.5, 0.3, 0.3).unwrap();
        assert_eq!(core.phase, AspectPhase::Separating);
    }

    #[test]
    fn fast_body_near_exact_is_applying() {
        // Moon-speed transit half a degree short of the square.
        let core = calc().calculate_aspect(89.5, 0.0, 13.0, 0.0).unwrap();
        assert_eq!(core.kind, AspectKind::Square);
        assert_eq!(core.phase, AspectPhase::Applying);
        let core = calc().calculate_aspect(90.2, 0.0, 13.0, 0.0).unwrap();
        assert_eq!(core.phase, AspectPhase::Separating);
    }

    #[test]
    fn opposition_across_wrap() {
        // Gap of +179.5 growing toward 180.
        let a = calc().calculate_aspect(179.5, 0.0, 13.0, 0.0).unwrap();
        assert_eq!(a.kind, AspectKind::Opposition);
        assert_eq!(a.phase, AspectPhase::Applying);
        // Gap of -179.5 moving away from -180, then back toward it.
        let b = calc().calculate_aspect(180.5, 0.0, 13.0, 0.0).unwrap();
        assert_eq!(b.phase, AspectPhase::Separating);
        let c = calc().calculate_aspect(180.5, 0.0, -13.0, 0.0).unwrap();
        assert_eq!(c.phase, AspectPhase::Applying);
    }

    #[test]
    fn exact_aspects_are_separating() {
        assert_eq!(
            calc().calculate_aspect(42.0, 42.0, 13.0, 0.0).unwrap().phase,
            AspectPhase::Separating
        );
        assert_eq!(
            calc().calculate_aspect(120.0, 0.0, 13.0, 0.0).unwrap().phase,
            AspectPhase::Separating
        );
    }

    #[test]
    fn exact_flag() {
        assert!(calc().calculate_aspect(0.0, 180.05, 1.0, 0.0).unwrap().is_exact);
    }
}
