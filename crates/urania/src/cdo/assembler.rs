use chrono::{DateTime, Duration, Utc};
use log::debug;

use super::types::{BirthData, CosmicDataObject};
use super::CdoError;
use crate::aspects::AspectCalculator;
use crate::chart::{NatalChartBuilder, TransitEngine};
use crate::ephemeris::{Ephemeris, ObserverLocation, ZodiacFrame};
use crate::scoring::{luck_score, malefic_severity};
use crate::time::{age_on, to_absolute_time, JulianDay};
use crate::western::{dignity_of, profect, DignityScore};

/// Runs the full pipeline for one birth tuple.
pub struct CdoAssembler<'a> {
    ephemeris: &'a Ephemeris,
    calculator: AspectCalculator,
}

impl<'a> CdoAssembler<'a> {
    pub fn new(ephemeris: &'a Ephemeris, calculator: AspectCalculator) -> Self {
        Self {
            ephemeris,
            calculator,
        }
    }

    /// Build the CDO for `birth` as seen at `query`.
    ///
    /// Unparseable dates and out-of-range coordinates are input errors; any
    /// other failure is reported as [`CdoError::Assembly`].
    pub fn assemble(
        &self,
        birth: &BirthData,
        query: DateTime<Utc>,
    ) -> Result<CosmicDataObject, CdoError> {
        let offset_hours = birth.utc_offset_hours.unwrap_or(0.0);
        let moment = to_absolute_time(&birth.birth_date, birth.birth_time.as_deref(), offset_hours)?;
        let observer = ObserverLocation::new(birth.latitude, birth.longitude)
            .map_err(CdoError::InvalidLocation)?;

        let frame = if birth.sidereal {
            self.ephemeris.sidereal_frame()
        } else {
            ZodiacFrame::Tropical
        };

        let natal = NatalChartBuilder::new(self.ephemeris)
            .build(moment.julian_day, &observer, frame)
            .map_err(assembly)?;

        let query_jd = JulianDay::from_utc(query);
        let transit_observer = birth.topocentric_transits.then_some(&observer);
        let transits = TransitEngine::new(self.ephemeris)
            .current_positions(query_jd, transit_observer, frame)
            .map_err(assembly)?;

        // Birthdays turn over on the native's local calendar.
        let offset = Duration::milliseconds((offset_hours * 3_600_000.0).round() as i64);
        let query_local = (query + offset).date_naive();
        let age = age_on(moment.local.date(), query_local);
        let profection = profect(age, natal.ascendant.sign);

        let aspects = self
            .calculator
            .aspects_between(&transits, &natal.aspect_targets());

        let dignities: Vec<DignityScore> = natal
            .planets
            .iter()
            .filter(|p| !p.body.is_node())
            .map(|p| dignity_of(p.body, p.longitude))
            .collect();

        let luck = luck_score(&aspects, &dignities, &natal.sect);
        let severity = malefic_severity(&natal.sect, &aspects);

        debug!(
            "CDO assembled: age {}, house {} ({}), {} aspects, luck {}, severity {}",
            age,
            profection.active_house,
            profection.time_lord,
            aspects.len(),
            luck,
            severity
        );

        Ok(CosmicDataObject {
            birth_julian_day: moment.julian_day,
            query_julian_day: query_jd,
            time_confidence: moment.time_confidence,
            precision: natal.precision,
            frame,
            ayanamsa: natal.ayanamsa,
            ascendant: natal.ascendant,
            midheaven: natal.midheaven,
            houses: natal.houses,
            sect: natal.sect,
            natal_planets: natal.planets,
            transits,
            age,
            profection,
            aspects,
            dignities,
            luck_score: luck,
            malefic_severity: severity,
        })
    }
}

fn assembly(e: impl std::fmt::Display) -> CdoError {
    CdoError::Assembly(e.to_string())
}
