//! Body-position sources consumed by the crossing solver.
//!
//! [`SolarPosition`] is a low-precision analytic solar ephemeris (mean elements of the
//! Sun referred to the 1900.0 epoch, with first-order equation of centre and nutation
//! terms). It is good to roughly a hundredth of a degree over a few centuries around the
//! present, which is adequate for rise/set work.

use horizon_core::Vector;
use horizon_core::angles::{wrap_360, wrap_two_pi};
use horizon_core::constants::{AU_KM, SECONDS_PER_DAY};
use horizon_core::units::deg_to_rad;
use horizon_frames::{Eci, Epoch};

/// Julian date of 1900 January 0.5, the epoch the solar elements are referred to.
const JD_1900: f64 = 2_415_020.0;

/// Anything that can report where a body is at a given instant.
pub trait PositionSource {
    fn position_at(&self, epoch: Epoch) -> Eci;
}

impl<T: PositionSource + ?Sized> PositionSource for &T {
    fn position_at(&self, epoch: Epoch) -> Eci {
        (**self).position_at(epoch)
    }
}

/// Geocentric position of the Sun in the ECI frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarPosition;

impl SolarPosition {
    pub fn new() -> Self {
        Self
    }

    /// Sun position at `epoch`; the returned velocity is zero and `w` holds the distance.
    pub fn find_position(&self, epoch: Epoch) -> Eci {
        let days = epoch.julian() - JD_1900;
        let year = 1900.0 + days / 365.25;
        // Julian centuries of ephemeris time
        let t = (days + delta_et(year) / SECONDS_PER_DAY) / 36_525.0;

        let mean_anomaly = deg_to_rad(wrap_360(
            358.475_83 + wrap_360(35_999.049_75 * t) - (0.000_150 + 0.000_003_3 * t) * t * t,
        ));
        let mean_longitude = deg_to_rad(wrap_360(
            279.696_68 + wrap_360(36_000.768_92 * t) + 0.000_302_5 * t * t,
        ));
        let eccentricity = 0.016_751_04 - (0.000_041_8 + 0.000_000_126 * t) * t;
        let centre = deg_to_rad(
            (1.919_460 - (0.004_789 + 0.000_014 * t) * t) * mean_anomaly.sin()
                + (0.020_094 - 0.000_100 * t) * (2.0 * mean_anomaly).sin()
                + 0.000_293 * (3.0 * mean_anomaly).sin(),
        );
        let node = deg_to_rad(wrap_360(259.18 - 1_934.142 * t));
        let apparent_longitude =
            wrap_two_pi(mean_longitude + centre - deg_to_rad(0.005_69 - 0.004_79 * node.sin()));
        let true_anomaly = wrap_two_pi(mean_anomaly + centre);

        let distance_au = 1.000_000_2 * (1.0 - eccentricity * eccentricity)
            / (1.0 + eccentricity * true_anomaly.cos());
        let obliquity = deg_to_rad(
            23.452_294 - (0.013_012_5 + (0.000_001_64 - 0.000_000_503 * t) * t) * t
                + 0.002_56 * node.cos(),
        );

        let distance = distance_au * AU_KM;
        let (sin_lon, cos_lon) = apparent_longitude.sin_cos();
        let position = Vector::with_w(
            distance * cos_lon,
            distance * sin_lon * obliquity.cos(),
            distance * sin_lon * obliquity.sin(),
            distance,
        );

        Eci::at_position(epoch, position)
    }
}

impl PositionSource for SolarPosition {
    fn position_at(&self, epoch: Epoch) -> Eci {
        self.find_position(epoch)
    }
}

/// Approximate ET − UT in seconds for a decimal year.
fn delta_et(year: f64) -> f64 {
    26.465
        + 0.747_622 * (year - 1950.0)
        + 1.886_913 * (std::f64::consts::TAU * (year - 1975.0) / 33.0).sin()
}
