use crate::ephemeris::{Body, Ephemeris, EphemerisError, ObserverLocation, PlanetPosition, ZodiacFrame};
use crate::time::JulianDay;

/// Current sky positions for transit comparison.
pub struct TransitEngine<'a> {
    ephemeris: &'a Ephemeris,
}

impl<'a> TransitEngine<'a> {
    pub fn new(ephemeris: &'a Ephemeris) -> Self {
        Self { ephemeris }
    }

    /// Positions of every transiting body (nodes excluded) at `jd`.
    ///
    /// Geocentric unless an observer is supplied.
    pub fn current_positions(
        &self,
        jd: JulianDay,
        observer: Option<&ObserverLocation>,
        frame: ZodiacFrame,
    ) -> Result<Vec<PlanetPosition>, EphemerisError> {
        Body::TRANSITING
            .iter()
            .map(|&body| self.ephemeris.position(jd, body, observer, frame))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_are_not_transits() {
        let eph = Ephemeris::analytic(Default::default());
        let positions = TransitEngine::new(&eph)
            .current_positions(JulianDay(JulianDay::J2000), None, ZodiacFrame::Tropical)
            .unwrap();
        assert_eq!(positions.len(), 10);
        assert!(positions.iter().all(|p| !p.body.is_node()));
    }
}
