//! Closed-form fallback ephemeris.
//!
//! Planets use Keplerian mean elements with linear secular rates (J2000
//! mean ecliptic, valid roughly 1800-2050) rotated to the equinox of date by
//! general precession. The Moon uses a truncated lunar theory with the
//! principal periodic terms, good to a few arcminutes. The lunar node is the
//! mean node. Accuracy is arcminutes for the inner planets and better than a
//! degree everywhere in range, which keeps sign placement stable except
//! within a hair of a boundary.

use super::coords::{general_precession, normalize_degrees, signed_delta};
use super::provider::EphemerisProvider;
use super::types::{Body, EphemerisError, Precision, RawPosition};
use crate::time::JulianDay;

const KM_PER_AU: f64 = 149_597_870.7;

/// Half-width of the symmetric difference used for daily speed.
const SPEED_STEP_DAYS: f64 = 0.5;

/// Keplerian elements at J2000 and their rates per Julian century:
/// a (AU), e, I, L, longitude of perihelion, longitude of node (degrees).
struct Elements {
    base: [f64; 6],
    rate: [f64; 6],
}

const MERCURY: Elements = Elements {
    base: [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
    rate: [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
};

const VENUS: Elements = Elements {
    base: [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
    rate: [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
};

const EARTH_MOON_BARYCENTER: Elements = Elements {
    base: [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    rate: [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
};

const MARS: Elements = Elements {
    base: [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
    rate: [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
};

const JUPITER: Elements = Elements {
    base: [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
    rate: [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
};

const SATURN: Elements = Elements {
    base: [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
    rate: [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
};

const URANUS: Elements = Elements {
    base: [19.189_164_64, 0.047_257_44, 0.772_637_83, 313.238_104_51, 170.954_276_30, 74.016_925_03],
    rate: [-0.001_961_76, -0.000_043_97, -0.002_429_39, 428.482_027_85, 0.408_052_81, 0.042_405_89],
};

const NEPTUNE: Elements = Elements {
    base: [30.069_922_76, 0.008_590_48, 1.770_043_47, -55.120_029_69, 44.964_762_27, 131.784_225_74],
    rate: [0.000_262_91, 0.000_051_05, 0.000_353_72, 218.459_453_25, -0.322_414_64, -0.005_086_64],
};

const PLUTO: Elements = Elements {
    base: [39.482_116_75, 0.248_827_30, 17.140_012_06, 238.929_038_33, 224.068_916_29, 110.303_936_84],
    rate: [-0.000_315_96, 0.000_051_70, 0.000_048_18, 145.207_805_15, -0.040_629_42, -0.011_834_82],
};

/// Periodic terms for lunar longitude and distance:
/// multipliers of D, M, M', F; sine coefficient (1e-6 deg); cosine
/// coefficient (1e-3 km).
const MOON_LR: [(i8, i8, i8, i8, f64, f64); 32] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
];

/// Periodic terms for lunar latitude (1e-6 deg).
const MOON_B: [(i8, i8, i8, i8, f64); 20] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
];

/// Analytic provider. Stateless and always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        AnalyticEphemeris
    }

    /// (longitude, latitude, distance) of date, without speed.
    fn ecliptic(&self, jd: JulianDay, body: Body) -> (f64, f64, f64) {
        match body {
            Body::Moon => moon(jd),
            Body::NorthNode => (mean_node(jd), 0.0, 0.0),
            Body::SouthNode => (normalize_degrees(mean_node(jd) + 180.0), 0.0, 0.0),
            Body::Sun => {
                let earth = heliocentric(&EARTH_MOON_BARYCENTER, jd);
                to_geocentric([0.0; 3], earth, jd)
            }
            planet => {
                let earth = heliocentric(&EARTH_MOON_BARYCENTER, jd);
                let target = heliocentric(elements_for(planet), jd);
                to_geocentric(target, earth, jd)
            }
        }
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn precision(&self) -> Precision {
        Precision::Degraded
    }

    fn geocentric(&self, jd: JulianDay, body: Body) -> Result<RawPosition, EphemerisError> {
        let (longitude, latitude, distance) = self.ecliptic(jd, body);
        let (before, _, _) = self.ecliptic(jd.offset_days(-SPEED_STEP_DAYS), body);
        let (after, _, _) = self.ecliptic(jd.offset_days(SPEED_STEP_DAYS), body);
        let speed = signed_delta(before, after) / (2.0 * SPEED_STEP_DAYS);

        if !(longitude.is_finite() && latitude.is_finite() && speed.is_finite()) {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd: jd.value(),
                message: "non-finite analytic result".to_string(),
            });
        }

        Ok(RawPosition {
            longitude,
            latitude,
            distance,
            speed,
        })
    }
}

fn elements_for(body: Body) -> &'static Elements {
    match body {
        Body::Mercury => &MERCURY,
        Body::Venus => &VENUS,
        Body::Mars => &MARS,
        Body::Jupiter => &JUPITER,
        Body::Saturn => &SATURN,
        Body::Uranus => &URANUS,
        Body::Neptune => &NEPTUNE,
        Body::Pluto => &PLUTO,
        // Sun, Moon and nodes are handled before this lookup.
        _ => &EARTH_MOON_BARYCENTER,
    }
}

/// Heliocentric rectangular coordinates (AU), J2000 mean ecliptic.
fn heliocentric(el: &Elements, jd: JulianDay) -> [f64; 3] {
    let t = jd.centuries_since_j2000();
    let at = |i: usize| el.base[i] + el.rate[i] * t;
    let (a, e, incl, mean_lon, peri, node) = (at(0), at(1), at(2), at(3), at(4), at(5));

    let arg_peri = (peri - node).to_radians();
    let mean_anomaly = normalize_degrees(mean_lon - peri).to_radians();
    let ecc_anomaly = solve_kepler(mean_anomaly, e);

    let xp = a * (ecc_anomaly.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc_anomaly.sin();

    let (sw, cw) = arg_peri.sin_cos();
    let (so, co) = node.to_radians().sin_cos();
    let (si, ci) = incl.to_radians().sin_cos();

    [
        (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
        (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
        (sw * si) * xp + (cw * si) * yp,
    ]
}

/// Newton iteration on Kepler's equation, radians.
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..30 {
        let delta = (ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ecc
}

/// Geocentric ecliptic (lon, lat, distance) of date.
fn to_geocentric(target: [f64; 3], earth: [f64; 3], jd: JulianDay) -> (f64, f64, f64) {
    let x = target[0] - earth[0];
    let y = target[1] - earth[1];
    let z = target[2] - earth[2];
    let distance = (x * x + y * y + z * z).sqrt();
    let lon = normalize_degrees(y.atan2(x).to_degrees() + general_precession(jd));
    let lat = z.atan2((x * x + y * y).sqrt()).to_degrees();
    (lon, lat, distance)
}

fn moon(jd: JulianDay) -> (f64, f64, f64) {
    let t = jd.centuries_since_j2000();
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean_lon = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let elong = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let sun_anom = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let moon_anom = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let arg_lat = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    let ecc = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    let a3 = (313.45 + 481_266.484 * t).to_radians();

    let (d, m, mp, f, lp) = (
        elong.to_radians(),
        sun_anom.to_radians(),
        moon_anom.to_radians(),
        arg_lat.to_radians(),
        mean_lon.to_radians(),
    );

    let ecc_factor = |mult: i8| match mult.abs() {
        1 => ecc,
        2 => ecc * ecc,
        _ => 1.0,
    };

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(cd, cm, cmp, cf, sl, sr) in MOON_LR.iter() {
        let arg = f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * mp + f64::from(cf) * f;
        let k = ecc_factor(cm);
        sum_l += sl * k * arg.sin();
        sum_r += sr * k * arg.cos();
    }

    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, sb) in MOON_B.iter() {
        let arg = f64::from(cd) * d + f64::from(cm) * m + f64::from(cmp) * mp + f64::from(cf) * f;
        sum_b += sb * ecc_factor(cm) * arg.sin();
    }

    sum_l += 3958.0 * a1.sin() + 1962.0 * (lp - f).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();

    let lon = normalize_degrees(mean_lon + sum_l / 1_000_000.0);
    let lat = sum_b / 1_000_000.0;
    let distance_km = 385_000.56 + sum_r / 1000.0;
    (lon, lat, distance_km / KM_PER_AU)
}

/// Mean longitude of the ascending lunar node, equinox of date.
fn mean_node(jd: JulianDay) -> f64 {
    let t = jd.centuries_since_j2000();
    normalize_degrees(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t * t + t.powi(3) / 467_441.0
            - t.powi(4) / 60_616_000.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::coords::angular_separation;

    fn j2000() -> JulianDay {
        JulianDay(JulianDay::J2000)
    }

    #[test]
    fn sun_at_j2000() {
        let pos = AnalyticEphemeris.geocentric(j2000(), Body::Sun).unwrap();
        assert!(angular_separation(pos.longitude, 280.37) < 0.1, "{}", pos.longitude);
        assert!((pos.distance - 0.983).abs() < 0.01);
        assert!((pos.speed - 1.019).abs() < 0.01);
    }

    #[test]
    fn kepler_solution_satisfies_equation() {
        for &(m, e) in &[(0.3, 0.0167), (2.5, 0.2056), (5.9, 0.2488)] {
            let ecc = solve_kepler(m, e);
            assert!((ecc - e * ecc.sin() - m).abs() < 1e-10);
        }
    }

    #[test]
    fn moon_speed_and_distance_in_range() {
        for i in 0..30 {
            let jd = j2000().offset_days(i as f64 * 1.7);
            let pos = AnalyticEphemeris.geocentric(jd, Body::Moon).unwrap();
            assert!(pos.speed > 11.0 && pos.speed < 16.0, "speed {}", pos.speed);
            let km = pos.distance * KM_PER_AU;
            assert!(km > 355_000.0 && km < 407_000.0, "distance {}", km);
            assert!(pos.latitude.abs() < 5.4);
        }
    }

    #[test]
    fn nodes_are_opposite_and_retrograde() {
        let jd = j2000().offset_days(4321.0);
        let north = AnalyticEphemeris.geocentric(jd, Body::NorthNode).unwrap();
        let south = AnalyticEphemeris.geocentric(jd, Body::SouthNode).unwrap();
        assert!((angular_separation(north.longitude, south.longitude) - 180.0).abs() < 1e-9);
        assert!(north.speed < 0.0);
    }

    #[test]
    fn deterministic() {
        let jd = JulianDay(2_449_827.958_333);
        for body in Body::ALL {
            let a = AnalyticEphemeris.geocentric(jd, body).unwrap();
            let b = AnalyticEphemeris.geocentric(jd, body).unwrap();
            assert_eq!(a, b);
        }
    }
}
