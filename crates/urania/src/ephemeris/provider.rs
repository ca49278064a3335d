use log::{info, warn};

use super::analytic::AnalyticEphemeris;
use super::coords::{
    altitude, ascendant, ecliptic_to_equatorial, local_sidereal_time, mean_obliquity, midheaven,
    normalize_degrees, topocentric,
};
use super::sidereal::SiderealStandard;
use super::types::{
    Body, ChartAngles, EphemerisConfig, EphemerisError, ObserverLocation, PlanetPosition,
    Precision, RawPosition, ZodiacFrame,
};
use crate::time::JulianDay;

/// A source of geocentric tropical positions.
///
/// Implementations are shared read-only across requests.
pub trait EphemerisProvider: Send + Sync {
    fn precision(&self) -> Precision;

    /// Geocentric ecliptic position, tropical and of date.
    fn geocentric(&self, jd: JulianDay, body: Body) -> Result<RawPosition, EphemerisError>;

    /// Tropical ascendant and midheaven for an observer.
    fn angles(
        &self,
        jd: JulianDay,
        observer: &ObserverLocation,
    ) -> Result<ChartAngles, EphemerisError> {
        Ok(analytic_angles(jd, observer))
    }
}

/// Closed-form angles from local sidereal time and mean obliquity.
pub fn analytic_angles(jd: JulianDay, observer: &ObserverLocation) -> ChartAngles {
    let ramc = local_sidereal_time(jd, observer.longitude);
    let eps = mean_obliquity(jd);
    ChartAngles {
        ascendant: ascendant(ramc, observer.latitude, eps),
        midheaven: midheaven(ramc, eps),
    }
}

/// Ephemeris service. Chooses its backend once at construction and then
/// answers every position query from it.
pub struct Ephemeris {
    provider: Box<dyn EphemerisProvider>,
    sidereal_standard: SiderealStandard,
}

impl Ephemeris {
    /// Build the service, preferring the Swiss Ephemeris tables and degrading
    /// to the analytic model when they cannot be used.
    pub fn new(config: &EphemerisConfig) -> Self {
        #[cfg(feature = "swisseph")]
        {
            match super::adapter::SwissEphemerisAdapter::new(config.path.as_deref()) {
                Ok(adapter) => {
                    info!(
                        "Ephemeris initialized: precise tier (Swiss Ephemeris at {})",
                        adapter.path().display()
                    );
                    return Self::with_provider(Box::new(adapter), config.sidereal_standard);
                }
                Err(e) => warn!("{}; falling back to analytic ephemeris", e),
            }
        }

        #[cfg(not(feature = "swisseph"))]
        {
            if let Some(path) = &config.path {
                warn!(
                    "Built without Swiss Ephemeris support; ignoring table path {}",
                    path.display()
                );
            }
        }

        info!("Ephemeris initialized: degraded tier (analytic model)");
        Self::analytic(config.sidereal_standard)
    }

    pub fn analytic(sidereal_standard: SiderealStandard) -> Self {
        Self::with_provider(Box::new(AnalyticEphemeris::new()), sidereal_standard)
    }

    pub fn with_provider(
        provider: Box<dyn EphemerisProvider>,
        sidereal_standard: SiderealStandard,
    ) -> Self {
        Self {
            provider,
            sidereal_standard,
        }
    }

    pub fn precision(&self) -> Precision {
        self.provider.precision()
    }

    pub fn sidereal_standard(&self) -> SiderealStandard {
        self.sidereal_standard
    }

    /// Sidereal frame using the configured standard.
    pub fn sidereal_frame(&self) -> ZodiacFrame {
        ZodiacFrame::Sidereal(self.sidereal_standard)
    }

    /// Ayanamsa applied in `frame`, `None` for tropical.
    pub fn ayanamsa(&self, jd: JulianDay, frame: ZodiacFrame) -> Option<f64> {
        match frame {
            ZodiacFrame::Tropical => None,
            ZodiacFrame::Sidereal(standard) => Some(standard.ayanamsa(jd)),
        }
    }

    /// Position of `body` at `jd`.
    ///
    /// With an observer the position is topocentric (nodes are never
    /// parallax-corrected). Speed stays geocentric.
    pub fn position(
        &self,
        jd: JulianDay,
        body: Body,
        observer: Option<&ObserverLocation>,
        frame: ZodiacFrame,
    ) -> Result<PlanetPosition, EphemerisError> {
        let mut raw = self.provider.geocentric(jd, body)?;

        if let Some(obs) = observer {
            if !body.is_node() && raw.distance > 0.0 {
                let lst = local_sidereal_time(jd, obs.longitude);
                let (lon, lat, dist) = topocentric(
                    raw.longitude,
                    raw.latitude,
                    raw.distance,
                    obs.latitude,
                    lst,
                    mean_obliquity(jd),
                );
                raw.longitude = lon;
                raw.latitude = lat;
                raw.distance = dist;
            }
        }

        if let Some(ayanamsa) = self.ayanamsa(jd, frame) {
            raw.longitude = normalize_degrees(raw.longitude - ayanamsa);
        }

        Ok(PlanetPosition::new(body, raw))
    }

    /// Ascendant and midheaven in `frame`.
    pub fn angles(
        &self,
        jd: JulianDay,
        observer: &ObserverLocation,
        frame: ZodiacFrame,
    ) -> Result<ChartAngles, EphemerisError> {
        let mut angles = self.provider.angles(jd, observer)?;
        if let Some(ayanamsa) = self.ayanamsa(jd, frame) {
            angles.ascendant = normalize_degrees(angles.ascendant - ayanamsa);
            angles.midheaven = normalize_degrees(angles.midheaven - ayanamsa);
        }
        Ok(angles)
    }

    /// Apparent altitude of `body` above the observer's horizon, in degrees.
    pub fn altitude(
        &self,
        jd: JulianDay,
        body: Body,
        observer: &ObserverLocation,
    ) -> Result<f64, EphemerisError> {
        let pos = self.position(jd, body, Some(observer), ZodiacFrame::Tropical)?;
        let eps = mean_obliquity(jd);
        let (ra, dec) = ecliptic_to_equatorial(pos.longitude, pos.latitude, eps);
        let lst = local_sidereal_time(jd, observer.longitude);
        Ok(altitude(ra, dec, observer.latitude, lst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::coords::angular_separation;

    struct FixedProvider;

    impl EphemerisProvider for FixedProvider {
        fn precision(&self) -> Precision {
            Precision::Precise
        }

        fn geocentric(&self, _jd: JulianDay, body: Body) -> Result<RawPosition, EphemerisError> {
            match body {
                Body::Pluto => Err(EphemerisError::UnknownBody { body }),
                _ => Ok(RawPosition {
                    longitude: 10.0,
                    latitude: 0.0,
                    distance: 1.0,
                    speed: 1.0,
                }),
            }
        }
    }

    fn delhi() -> ObserverLocation {
        ObserverLocation::new(28.6139, 77.2090).unwrap()
    }

    #[test]
    fn sidereal_subtracts_ayanamsa() {
        let eph = Ephemeris::with_provider(Box::new(FixedProvider), SiderealStandard::Lahiri);
        let jd = JulianDay(JulianDay::J2000);
        let pos = eph.position(jd, Body::Sun, None, eph.sidereal_frame()).unwrap();
        assert!((pos.longitude - (10.0 - 23.853 + 360.0)).abs() < 1e-9);
        assert_eq!(pos.sign, 11);
    }

    #[test]
    fn provider_errors_propagate() {
        let eph = Ephemeris::with_provider(Box::new(FixedProvider), SiderealStandard::Lahiri);
        let err = eph
            .position(JulianDay(JulianDay::J2000), Body::Pluto, None, ZodiacFrame::Tropical)
            .unwrap_err();
        assert!(matches!(err, EphemerisError::UnknownBody { .. }));
    }

    #[test]
    fn precision_is_reported() {
        let eph = Ephemeris::with_provider(Box::new(FixedProvider), SiderealStandard::Lahiri);
        assert_eq!(eph.precision(), Precision::Precise);
        assert_eq!(Ephemeris::analytic(SiderealStandard::Raman).precision(), Precision::Degraded);
    }

    #[test]
    fn missing_tables_degrade() {
        let config = EphemerisConfig {
            path: Some("/nonexistent/swisseph".into()),
            ..EphemerisConfig::default()
        };
        assert_eq!(Ephemeris::new(&config).precision(), Precision::Degraded);
        assert_eq!(Ephemeris::new(&EphemerisConfig::default()).precision(), Precision::Degraded);
    }

    #[test]
    fn topocentric_moon_differs_slightly() {
        let eph = Ephemeris::analytic(SiderealStandard::Lahiri);
        let jd = JulianDay(2_449_827.958_333);
        let geo = eph.position(jd, Body::Moon, None, ZodiacFrame::Tropical).unwrap();
        let topo = eph.position(jd, Body::Moon, Some(&delhi()), ZodiacFrame::Tropical).unwrap();
        let shift = angular_separation(geo.longitude, topo.longitude);
        assert!(shift > 0.0 && shift < 1.0);
        assert_eq!(geo.speed, topo.speed);
    }

    #[test]
    fn nodes_skip_parallax() {
        let eph = Ephemeris::analytic(SiderealStandard::Lahiri);
        let jd = JulianDay(2_449_827.958_333);
        let geo = eph.position(jd, Body::NorthNode, None, ZodiacFrame::Tropical).unwrap();
        let topo = eph.position(jd, Body::NorthNode, Some(&delhi()), ZodiacFrame::Tropical).unwrap();
        assert_eq!(geo, topo);
    }

    #[test]
    fn sidereal_angles_shift_together() {
        let eph = Ephemeris::analytic(SiderealStandard::FaganBradley);
        let jd = JulianDay(2_449_827.958_333);
        let trop = eph.angles(jd, &delhi(), ZodiacFrame::Tropical).unwrap();
        let sid = eph.angles(jd, &delhi(), eph.sidereal_frame()).unwrap();
        let ayan = eph.ayanamsa(jd, eph.sidereal_frame()).unwrap();
        assert!((angular_separation(trop.ascendant, sid.ascendant) - ayan).abs() < 1e-9);
        assert!((angular_separation(trop.midheaven, sid.midheaven) - ayan).abs() < 1e-9);
    }
}
