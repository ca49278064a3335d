//! Spherical astronomy helpers: angle normalization, sidereal time, frame
//! rotations, chart angles and topocentric parallax.
//!
//! All public functions take and return degrees.

use crate::time::JulianDay;

/// Equatorial radius of the Earth in AU (6378.14 km).
const EARTH_RADIUS_AU: f64 = 6378.14 / 149_597_870.7;

/// Polar/equatorial axis ratio of the reference ellipsoid.
const EARTH_AXIS_RATIO: f64 = 0.996_647_19;

/// Wrap an angle into [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let r = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Smallest angle between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    if d > 180.0 {
        360.0 - d
    } else {
        d
    }
}

/// Signed shortest rotation from `from` to `to`, in (-180, 180].
pub fn signed_delta(from: f64, to: f64) -> f64 {
    let d = normalize_degrees(to - from);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Mean obliquity of the ecliptic (IAU 1980, linear term).
pub fn mean_obliquity(jd: JulianDay) -> f64 {
    let t = jd.centuries_since_j2000();
    23.439_291 - 0.013_004_2 * t
}

/// General precession in longitude since J2000, in degrees.
pub fn general_precession(jd: JulianDay) -> f64 {
    let t = jd.centuries_since_j2000();
    let arcsec = 5028.796_195 * t + 1.105_434_8 * t.powi(2) + 0.000_079_64 * t.powi(3)
        - 0.000_023_857 * t.powi(4)
        - 0.000_000_038_3 * t.powi(5);
    arcsec / 3600.0
}

/// Greenwich mean sidereal time: Earth rotation angle plus the IAU 2006
/// polynomial.
pub fn gmst(jd: JulianDay) -> f64 {
    let du = jd.value() - JulianDay::J2000;
    let era_turns = 0.779_057_273_264 + 1.002_737_811_911_354_5 * du;
    let era = era_turns.rem_euclid(1.0) * 360.0;

    let t = jd.centuries_since_j2000();
    let poly_arcsec = 0.014_506 + 4612.156_534 * t + 1.391_581_7 * t.powi(2)
        - 0.000_000_44 * t.powi(3)
        - 0.000_029_956 * t.powi(4)
        - 0.000_000_036_8 * t.powi(5);

    normalize_degrees(era + poly_arcsec / 3600.0)
}

/// Local sidereal time for an east-positive longitude.
pub fn local_sidereal_time(jd: JulianDay, longitude: f64) -> f64 {
    normalize_degrees(gmst(jd) + longitude)
}

/// Ecliptic (lon, lat) to equatorial (right ascension, declination).
pub fn ecliptic_to_equatorial(lon: f64, lat: f64, obliquity: f64) -> (f64, f64) {
    let (l, b, e) = (lon.to_radians(), lat.to_radians(), obliquity.to_radians());
    let ra = (l.sin() * e.cos() - b.tan() * e.sin()).atan2(l.cos());
    let dec = (b.sin() * e.cos() + b.cos() * e.sin() * l.sin()).asin();
    (normalize_degrees(ra.to_degrees()), dec.to_degrees())
}

/// Equatorial (right ascension, declination) to ecliptic (lon, lat).
pub fn equatorial_to_ecliptic(ra: f64, dec: f64, obliquity: f64) -> (f64, f64) {
    let (a, d, e) = (ra.to_radians(), dec.to_radians(), obliquity.to_radians());
    let lon = (a.sin() * e.cos() + d.tan() * e.sin()).atan2(a.cos());
    let lat = (d.sin() * e.cos() - d.cos() * e.sin() * a.sin()).asin();
    (normalize_degrees(lon.to_degrees()), lat.to_degrees())
}

/// Ecliptic longitude rising on the eastern horizon.
///
/// `ramc` is the local sidereal time (right ascension of the meridian).
pub fn ascendant(ramc: f64, latitude: f64, obliquity: f64) -> f64 {
    let (th, phi, e) = (ramc.to_radians(), latitude.to_radians(), obliquity.to_radians());
    let y = th.cos();
    let x = -(th.sin() * e.cos() + phi.tan() * e.sin());
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Ecliptic longitude culminating on the meridian.
pub fn midheaven(ramc: f64, obliquity: f64) -> f64 {
    let (th, e) = (ramc.to_radians(), obliquity.to_radians());
    normalize_degrees(th.sin().atan2(th.cos() * e.cos()).to_degrees())
}

/// Altitude above the horizon of an equatorial position.
pub fn altitude(ra: f64, dec: f64, latitude: f64, lst: f64) -> f64 {
    let h = (lst - ra).to_radians();
    let (d, phi) = (dec.to_radians(), latitude.to_radians());
    (phi.sin() * d.sin() + phi.cos() * d.cos() * h.cos())
        .asin()
        .to_degrees()
}

/// Shift a geocentric ecliptic position to the observer's viewpoint.
///
/// Returns topocentric (lon, lat, distance). Works by subtracting the
/// observer's geocentric equatorial vector at sea level.
pub fn topocentric(
    lon: f64,
    lat: f64,
    distance: f64,
    latitude: f64,
    lst: f64,
    obliquity: f64,
) -> (f64, f64, f64) {
    let (ra, dec) = ecliptic_to_equatorial(lon, lat, obliquity);
    let (a, d) = (ra.to_radians(), dec.to_radians());
    let px = distance * d.cos() * a.cos();
    let py = distance * d.cos() * a.sin();
    let pz = distance * d.sin();

    let phi = latitude.to_radians();
    let u = (EARTH_AXIS_RATIO * phi.tan()).atan();
    let rho_cos = u.cos();
    let rho_sin = EARTH_AXIS_RATIO * u.sin();
    let theta = lst.to_radians();
    let ox = EARTH_RADIUS_AU * rho_cos * theta.cos();
    let oy = EARTH_RADIUS_AU * rho_cos * theta.sin();
    let oz = EARTH_RADIUS_AU * rho_sin;

    let (x, y, z) = (px - ox, py - oy, pz - oz);
    let r = (x * x + y * y + z * z).sqrt();
    let topo_ra = normalize_degrees(y.atan2(x).to_degrees());
    let topo_dec = (z / r).asin().to_degrees();
    let (tlon, tlat) = equatorial_to_ecliptic(topo_ra, topo_dec, obliquity);
    (tlon, tlat, r)
}
