//! Elevation-crossing solver: finds when a body's elevation seen from an observer passes a
//! critical angle during a day.

pub mod bisection;
pub mod solver;

pub use bisection::bisect;
pub use solver::{
    CrossingError, CrossingEvent, CrossingPair, DayCrossings, ElevationProbe, SolverSettings,
    day_crossings, find_elevation_crossings, find_elevation_crossings_with,
};
