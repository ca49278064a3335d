use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::AscMc;

use super::provider::EphemerisProvider;
use super::types::{Body, ChartAngles, EphemerisError, ObserverLocation, Precision, RawPosition};
use crate::ephemeris::coords::normalize_degrees;
use crate::time::JulianDay;

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: u32 = 2 | 256;
const HOUSE_FLAGS: i32 = 2;
const PLACIDUS: i32 = b'P' as i32;

lazy_static::lazy_static! {
    /// The Swiss Ephemeris C library keeps global state; calls are serialized.
    static ref SWISS_LOCK: Mutex<()> = Mutex::new(());
}

fn swiss_lock() -> MutexGuard<'static, ()> {
    SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Swiss Ephemeris body codes.
fn body_code(body: Body) -> Option<u32> {
    match body {
        Body::Sun => Some(0),
        Body::Moon => Some(1),
        Body::Mercury => Some(2),
        Body::Venus => Some(3),
        Body::Mars => Some(4),
        Body::Jupiter => Some(5),
        Body::Saturn => Some(6),
        Body::Uranus => Some(7),
        Body::Neptune => Some(8),
        Body::Pluto => Some(9),
        Body::NorthNode => Some(11), // TRUE_NODE
        // Derived from the north node.
        Body::SouthNode => None,
    }
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Open the tables in `ephemeris_path`.
    ///
    /// Fails with [`EphemerisError::Unavailable`] unless the directory exists
    /// and holds at least one `.se1` data file.
    pub fn new(ephemeris_path: Option<&Path>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.ok_or_else(|| EphemerisError::Unavailable {
            path: "<unset>".to_string(),
            message: "no ephemeris path configured".to_string(),
        })?;

        let unavailable = |message: &str| EphemerisError::Unavailable {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        let entries = std::fs::read_dir(path)
            .map_err(|e| unavailable(&format!("cannot read directory: {}", e)))?;
        let has_tables = entries.filter_map(Result::ok).any(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("se1"))
                .unwrap_or(false)
        });
        if !has_tables {
            return Err(unavailable("no .se1 data files found"));
        }

        let path_str = path
            .to_str()
            .ok_or_else(|| unavailable("path is not valid UTF-8"))?;
        {
            let _guard = swiss_lock();
            set_ephe_path(path_str);
        }

        Ok(Self {
            ephemeris_path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.ephemeris_path
    }

    fn calc(&self, jd: JulianDay, body: Body, code: u32) -> Result<RawPosition, EphemerisError> {
        let result = {
            let _guard = swiss_lock();
            calc_ut(jd.value(), code, CALC_FLAGS)
        }
        .map_err(|e| EphemerisError::CalculationFailed {
            body,
            jd: jd.value(),
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let out = result.out;
        Ok(RawPosition {
            longitude: normalize_degrees(out[0]),
            latitude: out[1],
            distance: out[2],
            speed: out[3],
        })
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn precision(&self) -> Precision {
        Precision::Precise
    }

    fn geocentric(&self, jd: JulianDay, body: Body) -> Result<RawPosition, EphemerisError> {
        match body_code(body) {
            Some(code) => self.calc(jd, body, code),
            None => {
                let north = self.calc(jd, Body::NorthNode, 11)?;
                Ok(RawPosition {
                    longitude: normalize_degrees(north.longitude + 180.0),
                    latitude: -north.latitude,
                    ..north
                })
            }
        }
    }

    fn angles(
        &self,
        jd: JulianDay,
        observer: &ObserverLocation,
    ) -> Result<ChartAngles, EphemerisError> {
        let (_cusps, ascmc) = {
            let _guard = swiss_lock();
            houses_ex(
                jd.value(),
                HOUSE_FLAGS,
                observer.latitude,
                observer.longitude,
                PLACIDUS,
            )
        };
        let ascmc = AscMc::from_array(ascmc);

        if !(ascmc.ascendant.is_finite() && ascmc.mc.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "non-finite angles at lat {} lon {}",
                    observer.latitude, observer.longitude
                ),
            });
        }

        Ok(ChartAngles {
            ascendant: normalize_degrees(ascmc.ascendant),
            midheaven: normalize_degrees(ascmc.mc),
        })
    }
}
