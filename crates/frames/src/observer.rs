//! Ground observer and the look-angle seam used by the crossing solver.

use horizon_core::Ellipsoid;
use horizon_core::angles::ac_tan;

use crate::coords::{Geodetic, Topocentric};
use crate::eci::{Eci, geodetic_to_eci_on};
use crate::epoch::Epoch;

/// Anything that can turn an ECI state into a look angle.
pub trait LookAngle {
    fn look_angle(&self, eci: &Eci) -> Topocentric;
}

/// Fixed ground site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    site: Geodetic,
    ellipsoid: Ellipsoid,
}

impl Observer {
    /// Observer on the WGS-84 ellipsoid.
    pub fn new(site: Geodetic) -> Self {
        Self::with_ellipsoid(site, Ellipsoid::WGS84)
    }

    pub fn with_ellipsoid(site: Geodetic, ellipsoid: Ellipsoid) -> Self {
        Self { site, ellipsoid }
    }

    pub fn site(&self) -> Geodetic {
        self.site
    }

    pub fn ellipsoid(&self) -> Ellipsoid {
        self.ellipsoid
    }

    /// ECI state of the site itself at `epoch`.
    pub fn eci_at(&self, epoch: Epoch) -> Eci {
        geodetic_to_eci_on(epoch, &self.site, &self.ellipsoid)
    }
}

impl LookAngle for Observer {
    /// Rotates the site-to-target range vector into the south-east-zenith frame.
    ///
    /// A target coincident with the site has no direction; the result is then all zeros.
    fn look_angle(&self, eci: &Eci) -> Topocentric {
        let epoch = eci.epoch();
        let site = self.eci_at(epoch);

        let range_rate = eci.velocity() - site.velocity();
        let range = (eci.position() - site.position()).with_magnitude();
        if range.w == 0.0 {
            return Topocentric::default();
        }

        let theta = epoch.local_mean_sidereal_time(self.site.longitude);
        let (sin_lat, cos_lat) = self.site.latitude.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();

        let top_s = sin_lat * cos_theta * range.x + sin_lat * sin_theta * range.y - cos_lat * range.z;
        let top_e = -sin_theta * range.x + cos_theta * range.y;
        let top_z = cos_lat * cos_theta * range.x + cos_lat * sin_theta * range.y + sin_lat * range.z;

        // azimuth is measured from north through east
        let azimuth = ac_tan(top_e, -top_s);
        let elevation = (top_z / range.w).clamp(-1.0, 1.0).asin();
        let rate = range.dot(&range_rate) / range.w;

        Topocentric::new(azimuth, elevation, range.w, rate)
    }
}

impl<T: LookAngle + ?Sized> LookAngle for &T {
    fn look_angle(&self, eci: &Eci) -> Topocentric {
        (**self).look_angle(eci)
    }
}
