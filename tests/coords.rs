use std::f64::consts::{FRAC_PI_2, PI, TAU};

use horizon_calculator::frames::{Geodetic, Topocentric, TopocentricDiff};
use horizon_calculator::primitives::units::AngleUnit;
use proptest::prelude::*;

#[test]
fn geodetic_converts_degrees_once() {
    let from_deg = Geodetic::from_degrees(90.0, 180.0, 1.5);
    let from_rad = Geodetic::new(FRAC_PI_2, PI, 1.5, AngleUnit::Radians);
    assert_eq!(from_deg, from_rad);
    assert_eq!(from_deg.latitude, FRAC_PI_2);
    assert_eq!(from_deg.altitude, 1.5);
}

#[test]
fn geodetic_longitude_wraps_into_half_open_range() {
    let east = Geodetic::from_degrees(10.0, 270.0, 0.0);
    assert!((east.longitude + FRAC_PI_2).abs() < 1e-12);
    let west = Geodetic::from_degrees(10.0, -180.0, 0.0);
    assert_eq!(west.longitude, PI);
    // latitude is not range-checked
    let odd = Geodetic::from_degrees(120.0, 0.0, 0.0);
    assert!(odd.latitude > FRAC_PI_2);
}

#[test]
fn topocentric_normalize_leaves_elevation_alone() {
    let mut look = Topocentric::new(-FRAC_PI_2, -0.3, 1000.0, -2.0);
    look.normalize();
    assert!((look.azimuth - 3.0 * FRAC_PI_2).abs() < 1e-12);
    assert_eq!(look.elevation, -0.3);
    assert_eq!(look.range, 1000.0);
    assert_eq!(look.range_rate, -2.0);

    assert_eq!(Topocentric::new(TAU, 0.0, 0.0, 0.0).normalized().azimuth, 0.0);
}

#[test]
fn diff_normalize_takes_shortest_rotation() {
    let from = Topocentric::new(deg(350.0), 0.0, 0.0, 0.0);
    let to = Topocentric::new(deg(10.0), 0.0, 0.0, 0.0);
    let delta = (to - from).normalized();
    assert!((delta.d_azimuth - deg(20.0)).abs() < 1e-12);

    let back = (from - to).normalized();
    assert!((back.d_azimuth + deg(20.0)).abs() < 1e-12);

    let half_turn = TopocentricDiff {
        d_azimuth: -PI,
        ..Default::default()
    };
    assert_eq!(half_turn.normalized().d_azimuth, PI);
}

#[test]
fn diff_arithmetic_is_componentwise() {
    let a = Topocentric::new(1.0, 0.5, 100.0, 1.0);
    let b = Topocentric::new(0.5, 0.25, 50.0, -1.0);
    let diff = a - b;
    assert_eq!(
        diff,
        TopocentricDiff {
            d_azimuth: 0.5,
            d_elevation: 0.25,
            d_range: 50.0,
            d_range_rate: 2.0,
        }
    );
    assert_eq!(b + diff, a);
    assert_eq!(diff + b, a);
    assert_eq!((diff * 2.0).d_range, 100.0);
    assert_eq!((2.0 * diff).d_range_rate, 4.0);
    assert_eq!((diff / 2.0).d_elevation, 0.125);
}

#[test]
fn interpolation_crosses_north_the_short_way() {
    let from = Topocentric::new(deg(350.0), deg(10.0), 1000.0, 0.0);
    let to = Topocentric::new(deg(10.0), deg(20.0), 2000.0, 0.0);
    let mid = Topocentric::interpolate(&from, &to, 0.5);
    assert!(mid.azimuth.abs() < 1e-12 || (mid.azimuth - TAU).abs() < 1e-12);
    assert!((mid.elevation - deg(15.0)).abs() < 1e-12);
    assert!((mid.range - 1500.0).abs() < 1e-9);
}

fn deg(value: f64) -> f64 {
    value.to_radians()
}

proptest! {
    #[test]
    fn normalized_azimuth_is_in_zero_to_two_pi(azimuth in -1.0e3f64..1.0e3) {
        let look = Topocentric::new(azimuth, 0.1, 1.0, 0.0).normalized();
        prop_assert!(look.azimuth >= 0.0 && look.azimuth < TAU);
    }

    #[test]
    fn normalize_is_idempotent(azimuth in -1.0e3f64..1.0e3) {
        let once = Topocentric::new(azimuth, 0.1, 1.0, 0.0).normalized();
        prop_assert_eq!(once.normalized(), once);
    }

    #[test]
    fn normalized_azimuth_delta_is_in_half_open_pi(delta in -1.0e3f64..1.0e3) {
        let diff = TopocentricDiff { d_azimuth: delta, ..Default::default() }.normalized();
        prop_assert!(diff.d_azimuth > -PI && diff.d_azimuth <= PI);
    }
}
