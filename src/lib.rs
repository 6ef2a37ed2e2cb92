//! Frame conversions and horizon-crossing times for ground observers.
//!
//! The member crates are re-exported here so front-ends depend on a single library:
//! vector and angle primitives, reference frames and observers, body-position sources,
//! the crossing solver, and configuration loaders.

pub use horizon_config as config;
pub use horizon_core as primitives;
pub use horizon_crossing as crossing;
pub use horizon_ephem as ephem;
pub use horizon_frames as frames;

use chrono::{DateTime, Utc};
use horizon_config::{ConfigError, SiteConfig, SolverConfig};
use horizon_crossing::{CrossingError, CrossingPair, find_elevation_crossings_with};
use horizon_ephem::SolarPosition;
use horizon_frames::Epoch;
use thiserror::Error;
use tracing::info;

/// Errors surfaced by the top-level helpers.
#[derive(Debug, Error)]
pub enum HorizonError {
    #[error("configuration failed: {0}")]
    Config(#[from] ConfigError),
    #[error("crossing search failed: {0}")]
    Crossing(#[from] CrossingError),
}

/// Sunrise and sunset at `site` on the UTC date of `when`.
pub fn sun_times(
    site: &SiteConfig,
    when: DateTime<Utc>,
    solver: &SolverConfig,
) -> Result<CrossingPair, HorizonError> {
    let observer = site.observer();
    let reference = Epoch::from(when);
    let pair = find_elevation_crossings_with(
        reference,
        &observer,
        &SolarPosition::new(),
        solver.critical_angle_deg,
        &solver.settings(),
    )?;
    info!(site = %site.name, rise = %pair.rise, set = %pair.set, "sun times resolved");
    Ok(pair)
}

/// Load a site catalog and a solver configuration, then compute sun times for the named
/// site (case-insensitive).
pub fn sun_times_from_files(
    sites_path: impl AsRef<std::path::Path>,
    solver_path: impl AsRef<std::path::Path>,
    site_name: &str,
    when: DateTime<Utc>,
) -> Result<CrossingPair, HorizonError> {
    let sites = horizon_config::load_sites(sites_path)?;
    let solver = horizon_config::load_solver_config(solver_path)?;
    let site = find_site(&sites, site_name)?;
    sun_times(site, when, &solver)
}

/// Look up a site by name, ignoring case.
pub fn find_site<'a>(sites: &'a [SiteConfig], name: &str) -> Result<&'a SiteConfig, ConfigError> {
    sites
        .iter()
        .find(|site| site.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::UnknownSite(name.to_string()))
}

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
