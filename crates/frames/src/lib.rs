//! Reference frames for the Horizon Calculator: the UTC clock, geodetic and topocentric
//! records, the ECI conversion engine, and ground observers.

pub mod coords;
pub mod eci;
pub mod epoch;
pub mod observer;

pub use coords::{Geodetic, Topocentric, TopocentricDiff};
pub use eci::{
    Eci, EciDiff, GeodeticSolve, eci_to_geodetic, eci_to_geodetic_on, eci_to_geodetic_with_report,
    geodetic_to_eci, geodetic_to_eci_on,
};
pub use epoch::{Epoch, TimeSpan};
pub use observer::{LookAngle, Observer};

use thiserror::Error;

/// Errors raised while building frame values.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error(
        "invalid calendar instant {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{microsecond:06}"
    )]
    InvalidCalendar {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    },
}
