//! Sect: day or night chart from the Sun's altitude at birth.

use log::warn;
use serde::{Deserialize, Serialize};

use super::ChartError;
use crate::ephemeris::{Body, Ephemeris, ObserverLocation};
use crate::time::JulianDay;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectState {
    pub is_day_chart: bool,
    /// Solar altitude in degrees; `None` when it could not be computed.
    pub sun_altitude: Option<f64>,
}

impl SectState {
    pub fn from_altitude(sun_altitude: f64) -> Result<Self, ChartError> {
        if !sun_altitude.is_finite() {
            return Err(ChartError::AltitudeUnavailable {
                message: format!("non-finite solar altitude {}", sun_altitude),
            });
        }
        Ok(Self {
            is_day_chart: sun_altitude > 0.0,
            sun_altitude: Some(sun_altitude),
        })
    }

    /// Fallback when altitude is unknown.
    pub fn assumed_day() -> Self {
        Self {
            is_day_chart: true,
            sun_altitude: None,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.is_day_chart {
            "Diurnal"
        } else {
            "Nocturnal"
        }
    }

    /// Jupiter by day, Venus by night.
    pub fn sect_benefic(&self) -> Body {
        if self.is_day_chart {
            Body::Jupiter
        } else {
            Body::Venus
        }
    }

    pub fn contrary_benefic(&self) -> Body {
        if self.is_day_chart {
            Body::Venus
        } else {
            Body::Jupiter
        }
    }

    /// Saturn by day, Mars by night.
    pub fn sect_malefic(&self) -> Body {
        if self.is_day_chart {
            Body::Saturn
        } else {
            Body::Mars
        }
    }

    pub fn out_of_sect_malefic(&self) -> Body {
        if self.is_day_chart {
            Body::Mars
        } else {
            Body::Saturn
        }
    }
}

/// Sect at `jd` for `observer`, defaulting to a day chart when the solar
/// altitude cannot be computed.
pub fn determine_sect(
    ephemeris: &Ephemeris,
    jd: JulianDay,
    observer: &ObserverLocation,
) -> SectState {
    let state = ephemeris
        .altitude(jd, Body::Sun, observer)
        .map_err(ChartError::from)
        .and_then(SectState::from_altitude);

    match state {
        Ok(state) => state,
        Err(e) => {
            warn!("{}; assuming a day chart", e);
            SectState::assumed_day()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{
        EphemerisError, EphemerisProvider, Precision, RawPosition, SiderealStandard,
    };

    /// Provider that cannot place the Sun.
    struct SunlessProvider;

    impl EphemerisProvider for SunlessProvider {
        fn precision(&self) -> Precision {
            Precision::Precise
        }

        fn geocentric(&self, jd: JulianDay, body: Body) -> Result<RawPosition, EphemerisError> {
            match body {
                Body::Sun => Err(EphemerisError::CalculationFailed {
                    body,
                    jd: jd.value(),
                    message: "no data".to_string(),
                }),
                _ => Ok(RawPosition {
                    longitude: 45.0,
                    latitude: 0.0,
                    distance: 1.0,
                    speed: 1.0,
                }),
            }
        }
    }

    #[test]
    fn failed_altitude_defaults_to_day() {
        let eph = Ephemeris::with_provider(Box::new(SunlessProvider), SiderealStandard::Lahiri);
        let observer = ObserverLocation::new(28.6139, 77.2090).unwrap();
        let sect = determine_sect(&eph, JulianDay(JulianDay::J2000), &observer);
        assert_eq!(
            sect,
            SectState {
                is_day_chart: true,
                sun_altitude: None,
            }
        );
    }

    #[test]
    fn computed_altitude_is_kept() {
        let eph = Ephemeris::analytic(SiderealStandard::Lahiri);
        let observer = ObserverLocation::new(28.6139, 77.2090).unwrap();
        // 1995-04-20 11:00 UTC, mid-afternoon in New Delhi.
        let sect = determine_sect(&eph, JulianDay(2_449_827.958_333), &observer);
        assert!(sect.is_day_chart);
        assert!(sect.sun_altitude.unwrap() > 20.0);
    }

    #[test]
    fn altitude_sign_decides() {
        assert!(SectState::from_altitude(0.5).unwrap().is_day_chart);
        assert!(!SectState::from_altitude(-0.5).unwrap().is_day_chart);
        assert!(!SectState::from_altitude(0.0).unwrap().is_day_chart);
    }

    #[test]
    fn nan_altitude_is_an_error() {
        assert!(matches!(
            SectState::from_altitude(f64::NAN),
            Err(ChartError::AltitudeUnavailable { .. })
        ));
    }

    #[test]
    fn sect_roles_swap() {
        let day = SectState::from_altitude(30.0).unwrap();
        let night = SectState::from_altitude(-30.0).unwrap();
        assert_eq!(day.sect_malefic(), Body::Saturn);
        assert_eq!(night.sect_malefic(), Body::Mars);
        assert_eq!(day.sect_benefic(), Body::Jupiter);
        assert_eq!(night.sect_benefic(), Body::Venus);
        assert_eq!(day.label(), "Diurnal");
        assert_eq!(night.label(), "Nocturnal");
    }
}
