//! Core constants, reference ellipsoids, angle helpers, and vector algebra shared by the
//! Horizon Calculator workspace.

pub mod vector;

pub use vector::Vector;

/// Physical and calendar constants. Distances are in kilometres.
pub mod constants {
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 1.495_978_706_91e8;
    /// Ratio of the sidereal to the solar day rate.
    pub const OMEGA_E: f64 = 1.002_737_909_34;
    /// Earth's rotation rate in radians per second.
    pub const EARTH_ROTATION_RAD_S: f64 =
        std::f64::consts::TAU * (OMEGA_E / SECONDS_PER_DAY);
}

/// Unit conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * std::f64::consts::PI / 180.0
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(radians: f64) -> f64 {
        radians * 180.0 / std::f64::consts::PI
    }

    /// Unit attached to angular constructor inputs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum AngleUnit {
        Degrees,
        Radians,
    }

    impl AngleUnit {
        /// Convert `value` expressed in this unit to radians.
        #[inline]
        pub fn to_radians(self, value: f64) -> f64 {
            match self {
                Self::Degrees => deg_to_rad(value),
                Self::Radians => value,
            }
        }
    }
}

/// Angle reduction helpers.
///
/// `ac_tan` deliberately differs from `f64::atan2`: its range is [0, 2π), which the
/// longitude and azimuth arithmetic in the frame engine relies on.
pub mod angles {
    use std::f64::consts::{PI, TAU};

    /// Two-argument arctangent mapped to [0, 2π).
    #[inline]
    pub fn ac_tan(y: f64, x: f64) -> f64 {
        let angle = y.atan2(x);
        if angle < 0.0 { wrap_two_pi(angle + TAU) } else { angle }
    }

    /// Reduce an angle in radians to (-π, π].
    pub fn wrap_neg_pos_pi(angle: f64) -> f64 {
        if angle > -PI && angle <= PI {
            return angle;
        }
        let wrapped = angle.rem_euclid(TAU);
        if wrapped > PI { wrapped - TAU } else { wrapped }
    }

    /// Reduce an angle in radians to [0, 2π).
    pub fn wrap_two_pi(angle: f64) -> f64 {
        if (0.0..TAU).contains(&angle) {
            return angle;
        }
        let wrapped = angle.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= TAU { 0.0 } else { wrapped }
    }

    /// Reduce an angle in degrees to [0, 360).
    pub fn wrap_360(degrees: f64) -> f64 {
        let wrapped = degrees.rem_euclid(360.0);
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }
}

/// Reference ellipsoid used for geodetic conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Equatorial radius (km).
    pub radius_km: f64,
    /// Flattening coefficient.
    pub flattening: f64,
}

impl Ellipsoid {
    /// WGS-84, the default for all conversions.
    pub const WGS84: Ellipsoid = Ellipsoid {
        radius_km: 6_378.137,
        flattening: 1.0 / 298.257_223_563,
    };

    /// WGS-72, the model SGP4 element sets are fitted against.
    pub const WGS72: Ellipsoid = Ellipsoid {
        radius_km: 6_378.135,
        flattening: 1.0 / 298.26,
    };

    /// First eccentricity squared, `f(2 - f)`.
    #[inline]
    pub fn eccentricity_squared(&self) -> f64 {
        self.flattening * (2.0 - self.flattening)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
