//! Geodetic and topocentric coordinate records.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use horizon_core::angles::{wrap_neg_pos_pi, wrap_two_pi};
use horizon_core::units::{AngleUnit, rad_to_deg};

/// Position on the reference ellipsoid.
///
/// Latitude and longitude are stored in radians, altitude in kilometres. Longitude lies
/// in (-π, π]; latitude is taken as given.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geodetic {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl Geodetic {
    /// Build from angles in `unit`; the unit is applied once here and not retained.
    pub fn new(latitude: f64, longitude: f64, altitude_km: f64, unit: AngleUnit) -> Self {
        Self {
            latitude: unit.to_radians(latitude),
            longitude: wrap_neg_pos_pi(unit.to_radians(longitude)),
            altitude: altitude_km,
        }
    }

    pub fn from_degrees(latitude_deg: f64, longitude_deg: f64, altitude_km: f64) -> Self {
        Self::new(latitude_deg, longitude_deg, altitude_km, AngleUnit::Degrees)
    }

    pub fn from_radians(latitude: f64, longitude: f64, altitude_km: f64) -> Self {
        Self::new(latitude, longitude, altitude_km, AngleUnit::Radians)
    }

    pub fn latitude_deg(&self) -> f64 {
        rad_to_deg(self.latitude)
    }

    pub fn longitude_deg(&self) -> f64 {
        rad_to_deg(self.longitude)
    }
}

impl fmt::Display for Geodetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lat: {:8.3}, Lon: {:8.3}, Alt: {:10.3}",
            self.latitude_deg(),
            self.longitude_deg(),
            self.altitude
        )
    }
}

/// Look angle from a ground site.
///
/// Azimuth and elevation in radians, range in km, range rate in km/s. Elevation below
/// zero means the target is under the horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Topocentric {
    pub azimuth: f64,
    pub elevation: f64,
    pub range: f64,
    pub range_rate: f64,
}

impl Topocentric {
    pub const fn new(azimuth: f64, elevation: f64, range: f64, range_rate: f64) -> Self {
        Self {
            azimuth,
            elevation,
            range,
            range_rate,
        }
    }

    /// Bring azimuth into [0, 2π). Elevation is left untouched.
    ///
    /// Non-finite azimuths are left as they are.
    pub fn normalize(&mut self) {
        if !self.azimuth.is_finite() {
            return;
        }
        self.azimuth = wrap_two_pi(self.azimuth);
    }

    pub fn normalized(&self) -> Self {
        let mut copy = *self;
        copy.normalize();
        copy
    }

    /// Linear interpolation between two look angles along the shortest azimuth path.
    pub fn interpolate(from: &Topocentric, to: &Topocentric, fraction: f64) -> Topocentric {
        let delta = (*to - *from).normalized();
        (*from + delta * fraction).normalized()
    }

    pub fn azimuth_deg(&self) -> f64 {
        rad_to_deg(self.azimuth)
    }

    pub fn elevation_deg(&self) -> f64 {
        rad_to_deg(self.elevation)
    }
}

impl fmt::Display for Topocentric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Az: {:8.3}, El: {:8.3}, Rng: {:10.3}, Rng Rt: {:7.3}",
            self.azimuth_deg(),
            self.elevation_deg(),
            self.range,
            self.range_rate
        )
    }
}

/// Componentwise difference of two look angles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TopocentricDiff {
    pub d_azimuth: f64,
    pub d_elevation: f64,
    pub d_range: f64,
    pub d_range_rate: f64,
}

impl TopocentricDiff {
    /// Bring the azimuth delta into (-π, π], the shortest rotation between the two
    /// azimuths.
    ///
    /// Non-finite deltas are left as they are.
    pub fn normalize(&mut self) {
        if !self.d_azimuth.is_finite() {
            return;
        }
        self.d_azimuth = wrap_neg_pos_pi(self.d_azimuth);
    }

    pub fn normalized(&self) -> Self {
        let mut copy = *self;
        copy.normalize();
        copy
    }
}

impl Sub for Topocentric {
    type Output = TopocentricDiff;

    fn sub(self, rhs: Topocentric) -> TopocentricDiff {
        TopocentricDiff {
            d_azimuth: self.azimuth - rhs.azimuth,
            d_elevation: self.elevation - rhs.elevation,
            d_range: self.range - rhs.range,
            d_range_rate: self.range_rate - rhs.range_rate,
        }
    }
}

impl Add<TopocentricDiff> for Topocentric {
    type Output = Topocentric;

    fn add(self, diff: TopocentricDiff) -> Topocentric {
        Topocentric {
            azimuth: self.azimuth + diff.d_azimuth,
            elevation: self.elevation + diff.d_elevation,
            range: self.range + diff.d_range,
            range_rate: self.range_rate + diff.d_range_rate,
        }
    }
}

impl Add<Topocentric> for TopocentricDiff {
    type Output = Topocentric;

    fn add(self, coords: Topocentric) -> Topocentric {
        coords + self
    }
}

impl Mul<f64> for TopocentricDiff {
    type Output = TopocentricDiff;

    fn mul(self, k: f64) -> TopocentricDiff {
        TopocentricDiff {
            d_azimuth: self.d_azimuth * k,
            d_elevation: self.d_elevation * k,
            d_range: self.d_range * k,
            d_range_rate: self.d_range_rate * k,
        }
    }
}

impl Mul<TopocentricDiff> for f64 {
    type Output = TopocentricDiff;

    fn mul(self, diff: TopocentricDiff) -> TopocentricDiff {
        diff * self
    }
}

impl Div<f64> for TopocentricDiff {
    type Output = TopocentricDiff;

    fn div(self, k: f64) -> TopocentricDiff {
        TopocentricDiff {
            d_azimuth: self.d_azimuth / k,
            d_elevation: self.d_elevation / k,
            d_range: self.d_range / k,
            d_range_rate: self.d_range_rate / k,
        }
    }
}
