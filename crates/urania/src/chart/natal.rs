use log::debug;
use serde::{Deserialize, Serialize};

use super::houses::HouseAssignment;
use super::sect::{determine_sect, SectState};
use super::ChartError;
use crate::aspects::{AspectTarget, ChartObject};
use crate::ephemeris::{
    sign_and_degree, Body, Ephemeris, ObserverLocation, PlanetPosition, Precision, ZodiacFrame,
};
use crate::time::JulianDay;
use crate::western::ZodiacSign;

/// Degrees from a sign boundary within which an angle is on the cusp.
pub const CUSP_MARGIN: f64 = 1.0;

/// An angle of the chart (ascendant or midheaven).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub longitude: f64,
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
}

impl ChartPoint {
    pub fn from_longitude(longitude: f64) -> Self {
        let (sign, degree_in_sign) = sign_and_degree(longitude);
        Self {
            longitude: f64::from(sign) * 30.0 + degree_in_sign,
            sign: ZodiacSign::from_index(sign),
            degree_in_sign,
        }
    }

    /// e.g. "Libra 0.24°"
    pub fn label(&self) -> String {
        format!("{} {:.2}°", self.sign, self.degree_in_sign)
    }

    /// Within [`CUSP_MARGIN`] of either edge of its sign.
    pub fn is_cusp(&self) -> bool {
        self.degree_in_sign < CUSP_MARGIN || self.degree_in_sign > 30.0 - CUSP_MARGIN
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub julian_day: JulianDay,
    pub frame: ZodiacFrame,
    /// Ayanamsa subtracted from every longitude, sidereal frames only.
    pub ayanamsa: Option<f64>,
    pub precision: Precision,
    pub ascendant: ChartPoint,
    pub midheaven: ChartPoint,
    pub planets: Vec<PlanetPosition>,
    pub houses: HouseAssignment,
    pub sect: SectState,
}

impl NatalChart {
    pub fn planet(&self, body: Body) -> Option<&PlanetPosition> {
        self.planets.iter().find(|p| p.body == body)
    }

    /// Every natal body plus the two angles, as aspect targets.
    pub fn aspect_targets(&self) -> Vec<AspectTarget> {
        let mut targets: Vec<AspectTarget> = self
            .planets
            .iter()
            .map(|p| AspectTarget {
                object: ChartObject::Body(p.body),
                longitude: p.longitude,
                speed: p.speed,
            })
            .collect();
        targets.push(AspectTarget {
            object: ChartObject::Ascendant,
            longitude: self.ascendant.longitude,
            speed: 0.0,
        });
        targets.push(AspectTarget {
            object: ChartObject::Midheaven,
            longitude: self.midheaven.longitude,
            speed: 0.0,
        });
        targets
    }
}

/// Builds natal charts against a shared ephemeris.
pub struct NatalChartBuilder<'a> {
    ephemeris: &'a Ephemeris,
}

impl<'a> NatalChartBuilder<'a> {
    pub fn new(ephemeris: &'a Ephemeris) -> Self {
        Self { ephemeris }
    }

    /// Angles, topocentric positions of all twelve bodies, whole-sign houses
    /// and sect for a birth moment.
    pub fn build(
        &self,
        jd: JulianDay,
        observer: &ObserverLocation,
        frame: ZodiacFrame,
    ) -> Result<NatalChart, ChartError> {
        let angles = self.ephemeris.angles(jd, observer, frame)?;
        let ascendant = ChartPoint::from_longitude(angles.ascendant);
        let midheaven = ChartPoint::from_longitude(angles.midheaven);

        let planets = Body::ALL
            .iter()
            .map(|&body| self.ephemeris.position(jd, body, Some(observer), frame))
            .collect::<Result<Vec<_>, _>>()?;

        let houses = HouseAssignment::assign(ascendant.sign, &planets);
        let sect = determine_sect(self.ephemeris, jd, observer);

        debug!(
            "Natal chart at JD {:.5}: ascendant {}, {} chart",
            jd.value(),
            ascendant.label(),
            sect.label()
        );

        Ok(NatalChart {
            julian_day: jd,
            frame,
            ayanamsa: self.ephemeris.ayanamsa(jd, frame),
            precision: self.ephemeris.precision(),
            ascendant,
            midheaven,
            planets,
            houses,
            sect,
        })
    }
}
