//! Configuration models and loaders for the Horizon Calculator.

use std::fs::File;
use std::path::{Path, PathBuf};

use horizon_crossing::SolverSettings;
use horizon_frames::{Geodetic, Observer, TimeSpan};
use serde::Deserialize;
use thiserror::Error;

/// Observer site parsed from site catalogs. Angles in degrees, altitude in kilometres.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SiteConfig {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub altitude_km: f64,
}

impl SiteConfig {
    pub fn geodetic(&self) -> Geodetic {
        Geodetic::from_degrees(self.latitude_deg, self.longitude_deg, self.altitude_km)
    }

    pub fn observer(&self) -> Observer {
        Observer::new(self.geodetic())
    }
}

/// Crossing solver settings.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SolverConfig {
    /// Elevation treated as the horizon, in degrees.
    #[serde(default)]
    pub critical_angle_deg: f64,
    #[serde(default = "default_scan_step_minutes")]
    pub scan_step_minutes: u32,
}

fn default_scan_step_minutes() -> u32 {
    60
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            critical_angle_deg: 0.0,
            scan_step_minutes: default_scan_step_minutes(),
        }
    }
}

impl SolverConfig {
    pub fn settings(&self) -> SolverSettings {
        SolverSettings {
            scan_step: TimeSpan::from_minutes(i64::from(self.scan_step_minutes)),
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("site `{name}` has latitude {latitude_deg}° outside [-90, 90]")]
    InvalidSite { name: String, latitude_deg: f64 },
    #[error("solver scan step must be at least one minute")]
    InvalidScanStep,
    #[error("site `{0}` not found in catalog")]
    UnknownSite(String),
}

/// Load observer sites from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_sites<P: AsRef<Path>>(path: P) -> Result<Vec<SiteConfig>, ConfigError> {
    let sites: Vec<SiteConfig> = load_records(path.as_ref())?;
    for site in &sites {
        if !(-90.0..=90.0).contains(&site.latitude_deg) {
            return Err(ConfigError::InvalidSite {
                name: site.name.clone(),
                latitude_deg: site.latitude_deg,
            });
        }
    }
    Ok(sites)
}

/// Load solver settings from a YAML or TOML file.
pub fn load_solver_config<P: AsRef<Path>>(path: P) -> Result<SolverConfig, ConfigError> {
    let path = path.as_ref();
    let config: SolverConfig = if is_toml(path) {
        toml::from_str(&read_text(path)?)?
    } else {
        serde_yaml::from_reader(open(path)?)?
    };
    if config.scan_step_minutes == 0 {
        return Err(ConfigError::InvalidScanStep);
    }
    Ok(config)
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError + '_ {
    move |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn open(path: &Path) -> Result<File, ConfigError> {
    File::open(path).map_err(io_error(path))
}

fn read_text(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(io_error(path))
}

/// One record per TOML file, a YAML list, or every `*.toml` in a directory sorted by
/// file name.
fn load_records<T>(path: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    if path.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(path)
            .map_err(io_error(path))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|candidate| is_toml(candidate))
            .collect();
        files.sort();
        files
            .iter()
            .map(|file| -> Result<T, ConfigError> { Ok(toml::from_str(&read_text(file)?)?) })
            .collect()
    } else if is_toml(path) {
        Ok(vec![toml::from_str(&read_text(path)?)?])
    } else {
        Ok(serde_yaml::from_reader(open(path)?)?)
    }
}
