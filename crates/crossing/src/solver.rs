//! Rise and set search within a UTC calendar day.
//!
//! The day is sampled on a fixed grid to bracket each side change of the elevation
//! signal, then every bracket is narrowed to a single tick with [`bisect`]. Sampling
//! first keeps the search correct when the elevation curve is not monotonic over the
//! day (the usual case: it rises and falls once).
//!
//! When no sample changes side, the extremum nearest the best sample is located with a
//! golden-section search. A body that is up (or down) for less than one scan step, as on
//! the last short days before polar night, is found that way.

use horizon_core::units::deg_to_rad;
use horizon_ephem::PositionSource;
use horizon_frames::epoch::TICKS_PER_SECOND;
use horizon_frames::{Epoch, LookAngle, TimeSpan};
use thiserror::Error;
use tracing::debug;

use crate::bisection::bisect;

/// Which way the elevation crosses the critical angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrossingEvent {
    /// Elevation goes from at-or-below to above the critical angle.
    Rise,
    /// Elevation goes from above to at-or-below the critical angle.
    Set,
}

/// Tuning for the bracket scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverSettings {
    /// Spacing of the elevation samples used to bracket crossings.
    pub scan_step: TimeSpan,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            scan_step: TimeSpan::from_hours(1),
        }
    }
}

/// Rise and set instants found within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingPair {
    pub rise: Epoch,
    pub set: Epoch,
}

/// Crossings found within one day; either may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCrossings {
    pub day_start: Epoch,
    pub day_end: Epoch,
    pub rise: Option<Epoch>,
    pub set: Option<Epoch>,
    /// Whether the body was above the critical angle at `day_start`.
    pub above_at_start: bool,
}

#[derive(Debug, Error)]
pub enum CrossingError {
    #[error("elevation stays above {critical_angle_deg}° for the whole day")]
    AlwaysAbove { critical_angle_deg: f64 },
    #[error("elevation stays at or below {critical_angle_deg}° for the whole day")]
    AlwaysBelow { critical_angle_deg: f64 },
    #[error("no rise during the day (set at {set})")]
    NoRise { set: Epoch },
    #[error("no set during the day (rise at {rise})")]
    NoSet { rise: Epoch },
    #[error("scan step must be positive (got {ticks} ticks)")]
    InvalidScanStep { ticks: i64 },
}

/// Elevation of a body seen by an observer, compared against a fixed critical angle.
pub struct ElevationProbe<'a, O: ?Sized, S: ?Sized> {
    observer: &'a O,
    source: &'a S,
    critical_angle: f64,
}

impl<'a, O, S> ElevationProbe<'a, O, S>
where
    O: LookAngle + ?Sized,
    S: PositionSource + ?Sized,
{
    pub fn new(observer: &'a O, source: &'a S, critical_angle_deg: f64) -> Self {
        Self {
            observer,
            source,
            critical_angle: deg_to_rad(critical_angle_deg),
        }
    }

    /// Elevation in radians at `epoch`.
    pub fn elevation(&self, epoch: Epoch) -> f64 {
        let eci = self.source.position_at(epoch);
        self.observer.look_angle(&eci).elevation
    }

    pub fn is_above(&self, epoch: Epoch) -> bool {
        self.elevation(epoch) > self.critical_angle
    }

    /// Predicate that turns true once `event` has happened.
    pub fn crossed(&self, event: CrossingEvent, epoch: Epoch) -> bool {
        match event {
            CrossingEvent::Rise => self.is_above(epoch),
            CrossingEvent::Set => !self.is_above(epoch),
        }
    }
}

/// Find the rise and set of a body on the UTC date of `reference`, using the default
/// one-hour scan step.
///
/// `critical_angle_deg` is the elevation treated as the horizon (0° for a geometric
/// sunrise). Rise and set are searched independently, so the set may come before the rise
/// when the body is already up at 00:00 UTC. A day without one of the events is reported
/// as an error rather than approximated.
pub fn find_elevation_crossings<O, S>(
    reference: Epoch,
    observer: &O,
    source: &S,
    critical_angle_deg: f64,
) -> Result<CrossingPair, CrossingError>
where
    O: LookAngle + ?Sized,
    S: PositionSource + ?Sized,
{
    find_elevation_crossings_with(
        reference,
        observer,
        source,
        critical_angle_deg,
        &SolverSettings::default(),
    )
}

/// [`find_elevation_crossings`] with explicit solver settings.
pub fn find_elevation_crossings_with<O, S>(
    reference: Epoch,
    observer: &O,
    source: &S,
    critical_angle_deg: f64,
    settings: &SolverSettings,
) -> Result<CrossingPair, CrossingError>
where
    O: LookAngle + ?Sized,
    S: PositionSource + ?Sized,
{
    let day = day_crossings(reference, observer, source, critical_angle_deg, settings)?;
    match (day.rise, day.set) {
        (Some(rise), Some(set)) => Ok(CrossingPair { rise, set }),
        (Some(rise), None) => Err(CrossingError::NoSet { rise }),
        (None, Some(set)) => Err(CrossingError::NoRise { set }),
        (None, None) if day.above_at_start => {
            Err(CrossingError::AlwaysAbove { critical_angle_deg })
        }
        (None, None) => Err(CrossingError::AlwaysBelow { critical_angle_deg }),
    }
}

/// Locate the first rise and the first set on the UTC date of `reference`.
///
/// Only fails on an invalid scan step; missing events come back as `None`.
pub fn day_crossings<O, S>(
    reference: Epoch,
    observer: &O,
    source: &S,
    critical_angle_deg: f64,
    settings: &SolverSettings,
) -> Result<DayCrossings, CrossingError>
where
    O: LookAngle + ?Sized,
    S: PositionSource + ?Sized,
{
    let step = settings.scan_step.ticks();
    if step <= 0 {
        return Err(CrossingError::InvalidScanStep { ticks: step });
    }

    let probe = ElevationProbe::new(observer, source, critical_angle_deg);
    let day_start = reference.start_of_day();
    let day_end = reference.end_of_day();

    let mut rise = None;
    let mut set = None;
    let start_elevation = probe.elevation(day_start);
    let above_at_start = start_elevation > probe.critical_angle;

    // sample closest to flipping side: highest when starting below, lowest when above
    let toward_flip = |elevation: f64| if above_at_start { -elevation } else { elevation };
    let mut best_sample = (day_start, toward_flip(start_elevation));

    let mut previous = (day_start, above_at_start);
    while previous.0 < day_end && (rise.is_none() || set.is_none()) {
        let next_epoch = Epoch::from_ticks(
            previous
                .0
                .ticks()
                .saturating_add(step)
                .min(day_end.ticks()),
        );
        let elevation = probe.elevation(next_epoch);
        if toward_flip(elevation) > best_sample.1 {
            best_sample = (next_epoch, toward_flip(elevation));
        }
        let next = (next_epoch, elevation > probe.critical_angle);

        let event = match (previous.1, next.1) {
            (false, true) if rise.is_none() => Some(CrossingEvent::Rise),
            (true, false) if set.is_none() => Some(CrossingEvent::Set),
            _ => None,
        };
        if let Some(event) = event {
            let instant = bisect(previous.0, next.0, |epoch| probe.crossed(event, epoch));
            debug!(?event, bracket_start = %previous.0, bracket_end = %next.0, %instant, "crossing located");
            match event {
                CrossingEvent::Rise => rise = Some(instant),
                CrossingEvent::Set => set = Some(instant),
            }
        }

        previous = next;
    }

    if rise.is_none() && set.is_none() {
        let low = Epoch::from_ticks(best_sample.0.ticks().saturating_sub(step).max(day_start.ticks()));
        let high = Epoch::from_ticks(best_sample.0.ticks().saturating_add(step).min(day_end.ticks()));
        let extremum = golden_section(low, high, |epoch| toward_flip(probe.elevation(epoch)));

        if probe.is_above(extremum) != above_at_start {
            let (enter, leave) = if above_at_start {
                (CrossingEvent::Set, CrossingEvent::Rise)
            } else {
                (CrossingEvent::Rise, CrossingEvent::Set)
            };
            let first = bisect(low, extremum, |epoch| probe.crossed(enter, epoch));
            let second = bisect(extremum, high, |epoch| probe.crossed(leave, epoch));
            debug!(%extremum, %first, %second, "excursion shorter than the scan step located");
            match enter {
                CrossingEvent::Rise => {
                    rise = Some(first);
                    set = Some(second);
                }
                CrossingEvent::Set => {
                    set = Some(first);
                    rise = Some(second);
                }
            }
        } else {
            debug!(%day_start, above_at_start, critical_angle_deg, "no crossing during the day");
        }
    }

    Ok(DayCrossings {
        day_start,
        day_end,
        rise,
        set,
        above_at_start,
    })
}

const INV_GOLDEN_RATIO: f64 = 0.618_033_988_749_894_9;

/// Golden-section search for the maximum of `score` over `[low, high]`.
///
/// Assumes a single maximum in the interval and stops once the bracket is narrower than
/// one second. Offsets are kept relative to `low` so the `f64` arithmetic stays exact at
/// tick resolution.
fn golden_section<F>(low: Epoch, high: Epoch, mut score: F) -> Epoch
where
    F: FnMut(Epoch) -> f64,
{
    let origin = low.ticks();
    let at = |offset: f64| Epoch::from_ticks(origin.saturating_add(offset.round() as i64));

    let mut a = 0.0;
    let mut b = high.ticks().saturating_sub(origin).max(0) as f64;
    let mut c = b - INV_GOLDEN_RATIO * (b - a);
    let mut d = a + INV_GOLDEN_RATIO * (b - a);
    let mut score_c = score(at(c));
    let mut score_d = score(at(d));

    while b - a > TICKS_PER_SECOND as f64 {
        if score_c > score_d {
            b = d;
            d = c;
            score_d = score_c;
            c = b - INV_GOLDEN_RATIO * (b - a);
            score_c = score(at(c));
        } else {
            a = c;
            c = d;
            score_c = score_d;
            d = a + INV_GOLDEN_RATIO * (b - a);
            score_d = score(at(d));
        }
    }

    at((a + b) / 2.0)
}
