use chrono::{DateTime, TimeZone, Utc};
use urania::aspects::ChartObject;
use urania::cdo::DIGNITY_WARNING_THRESHOLD;
use urania::{
    AspectCalculator, BirthData, Body, CdoAssembler, CdoError, CosmicDataObject, Ephemeris,
    OrbTable, Precision, SiderealStandard, TimeConfidence, VibeStatus, ZodiacFrame, ZodiacSign,
};

fn new_delhi_birth() -> BirthData {
    BirthData::new("1995-04-20", 28.6139, 77.2090)
        .with_time("16:30")
        .with_offset(5.5)
}

fn query() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

fn assemble(birth: &BirthData) -> Result<CosmicDataObject, CdoError> {
    let ephemeris = Ephemeris::analytic(SiderealStandard::Lahiri);
    CdoAssembler::new(&ephemeris, AspectCalculator::default()).assemble(birth, query())
}

#[test]
fn test_new_delhi_chart() {
    let cdo = assemble(&new_delhi_birth()).unwrap();

    assert_eq!(cdo.precision, Precision::Degraded);
    assert_eq!(cdo.time_confidence, TimeConfidence::Exact);
    assert_eq!(cdo.frame, ZodiacFrame::Tropical);
    assert_eq!(cdo.ayanamsa, None);

    assert_eq!(cdo.ascendant.sign, ZodiacSign::Libra);
    assert!(cdo.ascendant.is_cusp());
    assert_eq!(cdo.houses.ascendant_sign, ZodiacSign::Libra);
    assert_eq!(cdo.houses.house_of(Body::Sun), Some(7));
    assert_eq!(cdo.houses.sign_on(7), ZodiacSign::Aries);

    assert!(cdo.sect.is_day_chart);
    assert!(cdo.sect.sun_altitude.unwrap() > 20.0);

    assert_eq!(cdo.natal_planets.len(), 12);
    assert_eq!(cdo.transits.len(), 10);
    assert!(cdo.transits.iter().all(|p| !p.body.is_node()));
    assert_eq!(cdo.dignities.len(), 10);
}

#[test]
fn test_profection_for_thirtieth_year() {
    let cdo = assemble(&new_delhi_birth()).unwrap();
    assert_eq!(cdo.age, 30);
    assert_eq!(cdo.profection.active_house, 7);
    assert_eq!(cdo.profection.profected_sign, ZodiacSign::Aries);
    assert_eq!(cdo.profection.time_lord, Body::Mars);
}

#[test]
fn test_aspects_respect_orbs() {
    let cdo = assemble(&new_delhi_birth()).unwrap();
    let orbs = OrbTable::default();
    assert!(!cdo.aspects.is_empty());
    for aspect in &cdo.aspects {
        assert!(aspect.orb <= orbs.get(aspect.kind) + 1e-9);
        assert!(aspect.transiting != Body::NorthNode && aspect.transiting != Body::SouthNode);
    }
    let angle_targets = cdo
        .aspects
        .iter()
        .filter(|a| matches!(a.natal, ChartObject::Ascendant | ChartObject::Midheaven))
        .count();
    assert!(angle_targets <= 2 * cdo.transits.len());
}

#[test]
fn test_scores_in_range() {
    let cdo = assemble(&new_delhi_birth()).unwrap();
    assert!(cdo.luck_score <= 100);
    let summary = cdo.summary();
    assert_eq!(summary.vibe_status, VibeStatus::from_score(cdo.luck_score));
    assert_eq!(summary.malefic_severity, cdo.malefic_severity);
}

#[test]
fn test_assembly_is_deterministic() {
    let a = assemble(&new_delhi_birth()).unwrap();
    let b = assemble(&new_delhi_birth()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_document_round_trip() {
    let cdo = assemble(&new_delhi_birth()).unwrap();
    let doc = cdo.to_document().unwrap();
    assert_eq!(doc["ascendant"]["sign"], "libra");
    assert_eq!(doc["precision"], "degraded");
    assert_eq!(doc["time_confidence"], "exact");
    let back = CosmicDataObject::from_document(doc).unwrap();
    assert_eq!(back, cdo);
}

#[test]
fn test_summary_fields() {
    let cdo = assemble(&new_delhi_birth()).unwrap();
    let summary = cdo.summary();

    assert_eq!(summary.sect, "Diurnal");
    assert!(summary.ascendant.starts_with("Libra 0."), "{}", summary.ascendant);
    assert!(summary.is_cusp);
    assert_eq!(summary.time_lord, "Mars");
    assert_eq!(summary.profection_house, 7);
    assert_eq!(summary.profection_theme, "Partnerships");
    assert!(summary.major_aspect.starts_with("Transit "));
    assert!(summary
        .time_lord_activation
        .iter()
        .all(|label| label.contains("Mars")));

    let debilitated = cdo
        .dignities
        .iter()
        .filter(|d| d.weight < DIGNITY_WARNING_THRESHOLD)
        .count();
    if debilitated == 0 {
        assert!(summary.dignity_warning.is_empty());
    } else {
        assert_eq!(summary.dignity_warning.split("; ").count(), debilitated);
    }
}

#[test]
fn test_sidereal_chart() {
    let mut birth = new_delhi_birth();
    birth.sidereal = true;
    let cdo = assemble(&birth).unwrap();

    assert_eq!(cdo.frame, ZodiacFrame::Sidereal(SiderealStandard::Lahiri));
    let ayanamsa = cdo.ayanamsa.unwrap();
    assert!((ayanamsa - 23.787).abs() < 0.01);
    assert_eq!(cdo.ascendant.sign, ZodiacSign::Virgo);
    // Profection follows the sidereal rising sign.
    assert_eq!(cdo.profection.profected_sign, ZodiacSign::Pisces);
    assert_eq!(cdo.profection.time_lord, Body::Jupiter);
}

#[test]
fn test_missing_time_is_assumed_noon() {
    let birth = BirthData::new("1995-04-20", 28.6139, 77.2090).with_offset(5.5);
    let cdo = assemble(&birth).unwrap();
    assert_eq!(cdo.time_confidence, TimeConfidence::Assumed);
    assert_eq!(cdo.summary().time_confidence, TimeConfidence::Assumed);
}

#[test]
fn test_bad_date_is_rejected() {
    let birth = BirthData::new("not a date", 28.6139, 77.2090);
    assert!(matches!(assemble(&birth), Err(CdoError::DateParse(_))));
}

#[test]
fn test_bad_location_is_rejected() {
    let birth = BirthData::new("1995-04-20", 123.0, 77.2090);
    assert!(matches!(assemble(&birth), Err(CdoError::InvalidLocation(_))));
}

#[test]
fn test_query_before_birth_has_age_zero() {
    let ephemeris = Ephemeris::analytic(SiderealStandard::Lahiri);
    let early = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
    let cdo = CdoAssembler::new(&ephemeris, AspectCalculator::default())
        .assemble(&new_delhi_birth(), early)
        .unwrap();
    assert_eq!(cdo.age, 0);
    assert_eq!(cdo.profection.active_house, 1);
}

#[test]
fn test_birth_data_from_json() {
    let birth: BirthData = serde_json::from_str(
        r#"{"birth_date": "April 20, 1995", "birth_time": "4:30 PM",
            "latitude": 28.6139, "longitude": 77.2090, "utc_offset_hours": 5.5}"#,
    )
    .unwrap();
    assert!(!birth.sidereal);
    let a = assemble(&birth).unwrap();
    let b = assemble(&new_delhi_birth()).unwrap();
    assert_eq!(a.birth_julian_day, b.birth_julian_day);
}
