use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use urania::{EphemerisConfig, OrbTable, SiderealStandard};

/// Environment variable that overrides `ephemeris.path`.
pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

/// Relative locations tried when no explicit config path is given.
const SEARCH_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

/// Fully resolved engine settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub ephemeris: EphemerisConfig,
    pub orbs: OrbTable,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    sidereal_standard: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    orbs: Option<OrbTable>,
}

/// Read the config text from `explicit` or the first search path that
/// exists. `Ok(None)` when nothing is found and no path was demanded.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Could not read config {}: {e}", path.display())
        })?;
        return Ok(Some(text));
    }
    for p in &SEARCH_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            log::debug!("Loaded engine config from {}", p);
            return Ok(Some(text));
        }
    }
    Ok(None)
}

/// Parse config text and apply the environment override.
pub fn parse_engine_config(text: &str, env_path: Option<PathBuf>) -> anyhow::Result<EngineConfig> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))?;
    build_engine_config(root, env_path)
}

fn build_engine_config(
    root: RootConfigToml,
    env_path: Option<PathBuf>,
) -> anyhow::Result<EngineConfig> {
    let sidereal_standard = match root.ephemeris.sidereal_standard.as_deref() {
        Some(id) => id
            .parse::<SiderealStandard>()
            .map_err(|e| anyhow::anyhow!("ephemeris.sidereal_standard: {e}"))?,
        None => SiderealStandard::default(),
    };

    let orbs = root.orbs.unwrap_or_default();
    if let Err(e) = orbs.validate() {
        anyhow::bail!("[orbs]: {e}");
    }

    let path = env_path.or(root.ephemeris.path);

    Ok(EngineConfig {
        ephemeris: EphemerisConfig {
            path,
            sidereal_standard,
        },
        orbs,
    })
}

fn env_ephemeris_path() -> Option<PathBuf> {
    env::var_os(EPHEMERIS_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Load engine settings.
///
/// An explicit path must exist. Without one, the search paths are tried and
/// defaults apply when none exists.
pub fn load_engine_config(explicit: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let env_path = env_ephemeris_path();
    match read_config_text(explicit)? {
        Some(text) => parse_engine_config(&text, env_path),
        None => {
            log::info!("No urania.toml found; using default engine settings");
            build_engine_config(RootConfigToml::default(), env_path)
        }
    }
}
