//! Earth-centred inertial state and the geodetic conversions in both directions.

use std::ops::{Add, Div, Mul, Sub};

use horizon_core::angles::{ac_tan, wrap_neg_pos_pi};
use horizon_core::constants::EARTH_ROTATION_RAD_S;
use horizon_core::{Ellipsoid, Vector};
use tracing::debug;

use crate::coords::Geodetic;
use crate::epoch::{Epoch, TimeSpan};

/// Iteration cap for the geodetic latitude solve.
pub const MAX_GEODETIC_ITERATIONS: u32 = 10;
/// Convergence threshold on successive latitude estimates (radians).
pub const GEODETIC_TOLERANCE_RAD: f64 = 1e-10;

/// Position and velocity (km, km/s) in the ECI frame at an instant.
///
/// Equality compares the epoch and all four position components exactly; velocity is
/// not part of the comparison.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eci {
    epoch: Epoch,
    position: Vector,
    velocity: Vector,
}

impl Eci {
    pub const fn new(epoch: Epoch, position: Vector, velocity: Vector) -> Self {
        Self {
            epoch,
            position,
            velocity,
        }
    }

    /// State with zero velocity.
    pub const fn at_position(epoch: Epoch, position: Vector) -> Self {
        Self::new(epoch, position, Vector::new(0.0, 0.0, 0.0))
    }

    /// ECI state of a point fixed to the rotating Earth, on the WGS-84 ellipsoid.
    pub fn from_geodetic(epoch: Epoch, geodetic: &Geodetic) -> Self {
        geodetic_to_eci_on(epoch, geodetic, &Ellipsoid::WGS84)
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// Geodetic position on the WGS-84 ellipsoid.
    pub fn to_geodetic(&self) -> Geodetic {
        eci_to_geodetic(self)
    }
}

impl PartialEq for Eci {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.epoch == other.epoch
    }
}

/// Difference between two ECI states.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EciDiff {
    pub d_time: TimeSpan,
    pub d_position: Vector,
    pub d_velocity: Vector,
}

/// Outcome of the iterative latitude solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticSolve {
    /// Rounds executed, at most [`MAX_GEODETIC_ITERATIONS`].
    pub iterations: u32,
    /// Last absolute change in latitude (radians).
    pub residual: f64,
    pub converged: bool,
}

/// Convert a geodetic point to ECI on WGS-84.
pub fn geodetic_to_eci(epoch: Epoch, geodetic: &Geodetic) -> Eci {
    geodetic_to_eci_on(epoch, geodetic, &Ellipsoid::WGS84)
}

/// Convert a geodetic point to ECI on the given ellipsoid.
///
/// The velocity is that of a point at rest on the rotating Earth.
pub fn geodetic_to_eci_on(epoch: Epoch, geodetic: &Geodetic, ellipsoid: &Ellipsoid) -> Eci {
    let f = ellipsoid.flattening;
    let radius = ellipsoid.radius_km;
    let theta = epoch.local_mean_sidereal_time(geodetic.longitude);

    let (sin_lat, cos_lat) = geodetic.latitude.sin_cos();
    let c = 1.0 / (1.0 + f * (f - 2.0) * sin_lat * sin_lat).sqrt();
    let s = (1.0 - f).powi(2) * c;
    let achcp = (radius * c + geodetic.altitude) * cos_lat;

    let position = Vector::new(
        achcp * theta.cos(),
        achcp * theta.sin(),
        (radius * s + geodetic.altitude) * sin_lat,
    )
    .with_magnitude();

    let velocity = Vector::new(
        -EARTH_ROTATION_RAD_S * position.y,
        EARTH_ROTATION_RAD_S * position.x,
        0.0,
    )
    .with_magnitude();

    Eci::new(epoch, position, velocity)
}

/// Convert an ECI state to geodetic coordinates on WGS-84.
pub fn eci_to_geodetic(eci: &Eci) -> Geodetic {
    eci_to_geodetic_on(eci, &Ellipsoid::WGS84).0
}

/// Convert an ECI state to geodetic coordinates on WGS-84 and report how the latitude
/// iteration ended.
pub fn eci_to_geodetic_with_report(eci: &Eci) -> (Geodetic, GeodeticSolve) {
    eci_to_geodetic_on(eci, &Ellipsoid::WGS84)
}

/// Convert an ECI state to geodetic coordinates on the given ellipsoid.
///
/// Latitude is found by fixed-point iteration, stopping once successive estimates differ
/// by less than [`GEODETIC_TOLERANCE_RAD`] or after [`MAX_GEODETIC_ITERATIONS`] rounds.
/// Running out of rounds is not an error: the last estimate is returned and the
/// [`GeodeticSolve`] records it.
///
/// Altitude is `r / cos(lat) - R·c`, which degrades as |lat| approaches 90°.
pub fn eci_to_geodetic_on(eci: &Eci, ellipsoid: &Ellipsoid) -> (Geodetic, GeodeticSolve) {
    let position = eci.position;
    let radius = ellipsoid.radius_km;
    let e2 = ellipsoid.eccentricity_squared();

    let theta = ac_tan(position.y, position.x);
    let longitude = wrap_neg_pos_pi(theta - eci.epoch.greenwich_sidereal_time());
    let r = (position.x * position.x + position.y * position.y).sqrt();

    // ac_tan keeps southern latitudes in (3π/2, 2π); sin and cos are unaffected.
    let mut latitude = ac_tan(position.z, r);
    let mut c;
    let mut residual;
    let mut iterations = 0;
    loop {
        let phi = latitude;
        let sin_phi = phi.sin();
        c = 1.0 / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        latitude = ac_tan(position.z + radius * c * e2 * sin_phi, r);
        iterations += 1;
        residual = (latitude - phi).abs();
        if residual < GEODETIC_TOLERANCE_RAD || iterations >= MAX_GEODETIC_ITERATIONS {
            break;
        }
    }

    let converged = residual < GEODETIC_TOLERANCE_RAD;
    if !converged {
        debug!(
            iterations,
            residual, "geodetic latitude solve stopped at the iteration cap"
        );
    }

    let altitude = r / latitude.cos() - radius * c;
    let geodetic = Geodetic {
        latitude: wrap_neg_pos_pi(latitude),
        longitude,
        altitude,
    };

    (
        geodetic,
        GeodeticSolve {
            iterations,
            residual,
            converged,
        },
    )
}

impl Add<EciDiff> for Eci {
    type Output = Eci;

    fn add(self, diff: EciDiff) -> Eci {
        Eci::new(
            self.epoch + diff.d_time,
            self.position + diff.d_position,
            self.velocity + diff.d_velocity,
        )
    }
}

impl Add<Eci> for EciDiff {
    type Output = Eci;

    fn add(self, eci: Eci) -> Eci {
        eci + self
    }
}

impl Sub for Eci {
    type Output = EciDiff;

    fn sub(self, rhs: Eci) -> EciDiff {
        EciDiff {
            d_time: self.epoch - rhs.epoch,
            d_position: self.position - rhs.position,
            d_velocity: self.velocity - rhs.velocity,
        }
    }
}

/// The span is scaled in floating point and truncated back to whole ticks.
impl Mul<f64> for EciDiff {
    type Output = EciDiff;

    fn mul(self, k: f64) -> EciDiff {
        EciDiff {
            d_time: TimeSpan::from_ticks((self.d_time.ticks() as f64 * k) as i64),
            d_position: self.d_position * k,
            d_velocity: self.d_velocity * k,
        }
    }
}

impl Mul<EciDiff> for f64 {
    type Output = EciDiff;

    fn mul(self, diff: EciDiff) -> EciDiff {
        diff * self
    }
}

/// The span is divided in floating point and truncated back to whole ticks.
impl Div<f64> for EciDiff {
    type Output = EciDiff;

    fn div(self, k: f64) -> EciDiff {
        EciDiff {
            d_time: TimeSpan::from_ticks((self.d_time.ticks() as f64 / k) as i64),
            d_position: self.d_position / k,
            d_velocity: self.d_velocity / k,
        }
    }
}
