use horizon_calculator::crossing::{
    CrossingError, CrossingEvent, ElevationProbe, SolverSettings, bisect, day_crossings,
    find_elevation_crossings, find_elevation_crossings_with,
};
use horizon_calculator::ephem::{PositionSource, SolarPosition};
use horizon_calculator::frames::{
    Eci, Epoch, Geodetic, LookAngle, Observer, TimeSpan, Topocentric,
};
use horizon_calculator::primitives::Vector;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Epoch {
    Epoch::from_calendar(year, month, day, hour, minute, 0, 0).expect("valid instant")
}

fn observer(lat: f64, lon: f64, alt: f64) -> Observer {
    Observer::new(Geodetic::from_degrees(lat, lon, alt))
}

/// Reports the epoch back as a position so the scripted observer can read it.
struct Clock;

impl PositionSource for Clock {
    fn position_at(&self, epoch: Epoch) -> Eci {
        Eci::at_position(epoch, Vector::default())
    }
}

/// Elevation rises linearly from `rise` and falls linearly towards `set`.
struct TentProfile {
    rise: Epoch,
    set: Epoch,
}

impl LookAngle for TentProfile {
    fn look_angle(&self, eci: &Eci) -> Topocentric {
        let t = eci.epoch();
        let up = (t - self.rise).total_seconds();
        let down = (self.set - t).total_seconds();
        Topocentric::new(0.0, up.min(down) * 1e-5, 1.0, 0.0)
    }
}

struct Constant(f64);

impl LookAngle for Constant {
    fn look_angle(&self, _eci: &Eci) -> Topocentric {
        Topocentric::new(0.0, self.0.to_radians(), 1.0, 0.0)
    }
}

#[test]
fn bisect_finds_first_tick_of_step_predicate() {
    let low = Epoch::from_ticks(1_000);
    let high = Epoch::from_ticks(5_000_000);
    let threshold = 1_234_567;
    let found = bisect(low, high, |epoch| epoch.ticks() >= threshold);
    assert_eq!(found.ticks(), threshold);
}

#[test]
fn bisect_returns_high_for_adjacent_or_inverted_bracket() {
    let a = Epoch::from_ticks(10);
    let b = Epoch::from_ticks(11);
    assert_eq!(bisect(a, b, |_| panic!("no evaluation expected")), b);
    assert_eq!(bisect(b, a, |_| panic!("no evaluation expected")), a);
}

#[test]
fn scripted_profile_is_solved_to_the_tick() {
    init_tracing();
    let rise = at(2030, 4, 2, 5, 30) + TimeSpan::from_ticks(17);
    let set = at(2030, 4, 2, 17, 15) + TimeSpan::from_ticks(3);
    let profile = TentProfile { rise, set };

    let pair = find_elevation_crossings(at(2030, 4, 2, 12, 0), &profile, &Clock, 0.0)
        .expect("both events");
    // elevation is exactly zero at `rise`, so the first tick above is one later
    assert_eq!(pair.rise, rise + TimeSpan::from_ticks(1));
    assert_eq!(pair.set, set);
}

#[test]
fn crossing_inside_a_single_scan_step_is_still_found() {
    let rise = at(2030, 4, 2, 9, 10);
    let set = at(2030, 4, 2, 9, 40);
    let profile = TentProfile { rise, set };

    // no hourly sample is above the horizon; the peak search still finds the excursion
    let coarse = find_elevation_crossings(at(2030, 4, 2, 0, 0), &profile, &Clock, 0.0)
        .expect("both events");
    assert_eq!(coarse.rise, rise + TimeSpan::from_ticks(1));
    assert_eq!(coarse.set, set);

    let settings = SolverSettings {
        scan_step: TimeSpan::from_minutes(10),
    };
    let fine = find_elevation_crossings_with(at(2030, 4, 2, 0, 0), &profile, &Clock, 0.0, &settings)
        .expect("both events");
    assert_eq!(fine, coarse);
}

/// Elevation is positive except for a V-shaped dip between `start` and `end`.
struct Dip {
    start: Epoch,
    end: Epoch,
}

impl LookAngle for Dip {
    fn look_angle(&self, eci: &Eci) -> Topocentric {
        let t = eci.epoch();
        let after = (t - self.end).total_seconds();
        let before = (self.start - t).total_seconds();
        Topocentric::new(0.0, after.max(before) * 1e-5, 1.0, 0.0)
    }
}

#[test]
fn dip_inside_a_single_scan_step_is_still_found() {
    let start = at(2030, 4, 2, 14, 5);
    let end = at(2030, 4, 2, 14, 50);
    let dip = Dip { start, end };

    let day = day_crossings(at(2030, 4, 2, 0, 0), &dip, &Clock, 0.0, &SolverSettings::default())
        .expect("valid step");
    assert!(day.above_at_start);
    assert_eq!(day.set, Some(start));
    assert_eq!(day.rise, Some(end + TimeSpan::from_ticks(1)));
}

#[test]
fn short_arctic_day_is_not_reported_as_polar_night() {
    init_tracing();
    let sun = SolarPosition::new();
    let reference = at(2024, 12, 10, 12, 0);
    let fine = SolverSettings {
        scan_step: TimeSpan::from_minutes(1),
    };
    let millisecond = TimeSpan::from_ticks(1_000).ticks();

    // (latitude, rise, set, minutes of daylight)
    let cases = [
        (66.95, (11, 3, 34, 855_509), (11, 42, 5, 758_581), 38.5),
        (67.00, (11, 12, 2, 905_141), (11, 33, 37, 679_900), 21.6),
    ];
    for (latitude, rise, set, minutes) in cases {
        let site = observer(latitude, 7.5, 0.0);
        let pair = find_elevation_crossings(reference, &site, &sun, 0.0)
            .unwrap_or_else(|err| panic!("{latitude}°N: {err}"));

        let expected_rise = Epoch::from_calendar(2024, 12, 10, rise.0, rise.1, rise.2, rise.3)
            .expect("valid instant");
        let expected_set = Epoch::from_calendar(2024, 12, 10, set.0, set.1, set.2, set.3)
            .expect("valid instant");
        assert!((pair.rise - expected_rise).ticks().abs() <= millisecond, "rise {}", pair.rise);
        assert!((pair.set - expected_set).ticks().abs() <= millisecond, "set {}", pair.set);
        assert!(((pair.set - pair.rise).total_minutes() - minutes).abs() < 0.1);

        let stepped = find_elevation_crossings_with(reference, &site, &sun, 0.0, &fine)
            .expect("both events");
        assert!((pair.rise - stepped.rise).ticks().abs() <= millisecond);
        assert!((pair.set - stepped.set).ticks().abs() <= millisecond);
    }

    // a little further north the sun stays down
    let night = find_elevation_crossings(reference, &observer(67.2, 7.5, 0.0), &sun, 0.0);
    assert!(matches!(night, Err(CrossingError::AlwaysBelow { .. })));
}

#[test]
fn missing_events_map_to_explicit_errors() {
    let reference = at(2030, 4, 2, 12, 0);

    let up = find_elevation_crossings(reference, &Constant(10.0), &Clock, 0.0);
    assert!(matches!(up, Err(CrossingError::AlwaysAbove { critical_angle_deg }) if critical_angle_deg == 0.0));

    let down = find_elevation_crossings(reference, &Constant(-10.0), &Clock, 0.0);
    assert!(matches!(down, Err(CrossingError::AlwaysBelow { .. })));

    let only_rise = TentProfile {
        rise: at(2030, 4, 2, 20, 0),
        set: at(2030, 4, 3, 8, 0),
    };
    let err = find_elevation_crossings(reference, &only_rise, &Clock, 0.0).unwrap_err();
    assert!(matches!(err, CrossingError::NoSet { rise } if rise == at(2030, 4, 2, 20, 0) + TimeSpan::from_ticks(1)));

    let only_set = TentProfile {
        rise: at(2030, 4, 1, 20, 0),
        set: at(2030, 4, 2, 3, 0),
    };
    let err = find_elevation_crossings(reference, &only_set, &Clock, 0.0).unwrap_err();
    assert!(matches!(err, CrossingError::NoRise { set } if set == at(2030, 4, 2, 3, 0)));
}

#[test]
fn non_positive_scan_step_is_rejected() {
    let settings = SolverSettings {
        scan_step: TimeSpan::ZERO,
    };
    let err = day_crossings(at(2030, 1, 1, 0, 0), &Constant(5.0), &Clock, 0.0, &settings)
        .unwrap_err();
    assert!(matches!(err, CrossingError::InvalidScanStep { ticks: 0 }));
}

#[test]
fn probe_predicates_are_complementary() {
    let probe = ElevationProbe::new(&Constant(3.0), &Clock, 2.0);
    let epoch = at(2030, 1, 1, 0, 0);
    assert!(probe.is_above(epoch));
    assert!(probe.crossed(CrossingEvent::Rise, epoch));
    assert!(!probe.crossed(CrossingEvent::Set, epoch));
    assert!((probe.elevation(epoch) - 3f64.to_radians()).abs() < 1e-12);
}

#[test]
fn equator_equinox_day_is_twelve_hours() {
    init_tracing();
    let site = observer(0.0, 0.0, 0.0);
    let sun = SolarPosition::new();
    let pair = find_elevation_crossings(at(2024, 3, 20, 6, 0), &site, &sun, 0.0)
        .expect("sun rises and sets");

    assert!(pair.rise >= at(2024, 3, 20, 6, 0) && pair.rise <= at(2024, 3, 20, 6, 15));
    assert!(pair.set >= at(2024, 3, 20, 18, 0) && pair.set <= at(2024, 3, 20, 18, 15));
    let hours = (pair.set - pair.rise).total_seconds() / 3600.0;
    assert!((hours - 12.0).abs() < 10.0 / 60.0, "day length {hours} h");

    // Reference instants from the Astronomical Almanac low-precision solar coordinates
    // (section C, 0.01° over 1950-2050) with the USNO GMST series, topocentric parallax
    // on WGS-84, and a microsecond bisection.
    let second = TimeSpan::from_seconds(1);
    let almanac_rise = Epoch::from_calendar(2024, 3, 20, 6, 7, 24, 144_659).expect("valid instant");
    let almanac_set = Epoch::from_calendar(2024, 3, 20, 18, 7, 14, 76_046).expect("valid instant");
    assert!((pair.rise - almanac_rise).ticks().abs() <= second.ticks(), "rise {}", pair.rise);
    assert!((pair.set - almanac_set).ticks().abs() <= second.ticks(), "set {}", pair.set);

    let probe = ElevationProbe::new(&site, &sun, 0.0);
    assert!(probe.elevation(pair.rise - second) <= 0.0);
    assert!(probe.elevation(pair.rise + second) > 0.0);
    assert!(probe.elevation(pair.set - second) > 0.0);
    assert!(probe.elevation(pair.set + second) <= 0.0);
}

#[test]
fn polar_summer_and_winter_have_no_crossings() {
    let pole = observer(90.0, 0.0, 0.0);
    let sun = SolarPosition::new();

    let summer = find_elevation_crossings(at(2024, 6, 21, 12, 0), &pole, &sun, 0.0);
    assert!(matches!(summer, Err(CrossingError::AlwaysAbove { .. })));

    // elevation barely moves over the day at the pole
    let probe = ElevationProbe::new(&pole, &sun, 0.0);
    let morning = probe.elevation(at(2024, 6, 21, 0, 0)).to_degrees();
    let evening = probe.elevation(at(2024, 6, 21, 23, 0)).to_degrees();
    assert!((morning - 23.4).abs() < 0.2, "elevation {morning}°");
    assert!((morning - evening).abs() < 0.1);

    let winter = find_elevation_crossings(at(2024, 12, 21, 12, 0), &pole, &sun, 0.0);
    assert!(matches!(winter, Err(CrossingError::AlwaysBelow { .. })));
}

#[test]
fn set_precedes_rise_when_sun_is_up_at_midnight_utc() {
    let tokyo = observer(35.6762, 139.6503, 0.04);
    let sun = SolarPosition::new();
    let day = day_crossings(
        at(2024, 6, 21, 12, 0),
        &tokyo,
        &sun,
        0.0,
        &SolverSettings::default(),
    )
    .expect("valid step");
    assert!(day.above_at_start);

    let pair = find_elevation_crossings(at(2024, 6, 21, 12, 0), &tokyo, &sun, 0.0)
        .expect("both events");
    assert!(pair.set < pair.rise);
    assert!(pair.set >= at(2024, 6, 21, 9, 50) && pair.set <= at(2024, 6, 21, 10, 0));
    assert!(pair.rise >= at(2024, 6, 21, 19, 25) && pair.rise <= at(2024, 6, 21, 19, 35));
}

#[test]
fn twilight_angle_widens_the_day() {
    let greenwich = observer(51.4769, -0.0005, 0.046);
    let sun = SolarPosition::new();
    let reference = at(2024, 6, 21, 12, 0);

    let geometric = find_elevation_crossings(reference, &greenwich, &sun, 0.0).expect("both events");
    let civil = find_elevation_crossings(reference, &greenwich, &sun, -6.0).expect("both events");

    assert!(geometric.rise >= at(2024, 6, 21, 3, 45) && geometric.rise <= at(2024, 6, 21, 3, 55));
    assert!(geometric.set >= at(2024, 6, 21, 20, 10) && geometric.set <= at(2024, 6, 21, 20, 20));
    assert!(civil.rise < geometric.rise);
    assert!(civil.set > geometric.set);
}

#[test]
fn result_does_not_depend_on_reference_time_of_day() {
    let quito = observer(-0.1807, -78.4678, 2.85);
    let sun = SolarPosition::new();
    let early = find_elevation_crossings(at(2025, 9, 1, 0, 5), &quito, &sun, 0.0).expect("both events");
    let late = find_elevation_crossings(at(2025, 9, 1, 23, 55), &quito, &sun, 0.0).expect("both events");
    assert_eq!(early, late);
}
