//! UTC clock with microsecond ticks counted from 0001-01-01T00:00:00.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};
use horizon_core::angles::wrap_two_pi;
use horizon_core::units::deg_to_rad;

use crate::FrameError;

/// Ticks per second (one tick is a microsecond).
pub const TICKS_PER_SECOND: i64 = 1_000_000;
/// Ticks per minute.
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
/// Ticks per hour.
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;
/// Ticks per day.
pub const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;

/// Julian date of tick zero.
const JULIAN_OFFSET: f64 = 1_721_425.5;
/// Julian date of the J2000.0 epoch.
pub const J2000_JD: f64 = 2_451_545.0;
/// Sidereal rate used by the GMST polynomial.
const SIDEREAL_RATE: f64 = 1.002_737_909_35;

/// Tick count of 1970-01-01T00:00:00, the anchor used for chrono conversions.
const UNIX_EPOCH_TICKS: i64 = 62_135_596_800 * TICKS_PER_SECOND;

fn unix_epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

/// Signed duration measured in ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan {
    ticks: i64,
}

impl TimeSpan {
    pub const ZERO: TimeSpan = TimeSpan { ticks: 0 };

    #[inline]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    #[inline]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    pub const fn from_seconds(seconds: i64) -> Self {
        Self::from_ticks(seconds * TICKS_PER_SECOND)
    }

    pub const fn from_minutes(minutes: i64) -> Self {
        Self::from_ticks(minutes * TICKS_PER_MINUTE)
    }

    pub const fn from_hours(hours: i64) -> Self {
        Self::from_ticks(hours * TICKS_PER_HOUR)
    }

    pub fn total_seconds(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_SECOND as f64
    }

    pub fn total_minutes(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_MINUTE as f64
    }

    pub fn total_days(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_DAY as f64
    }
}

impl Add for TimeSpan {
    type Output = TimeSpan;

    fn add(self, rhs: TimeSpan) -> TimeSpan {
        TimeSpan::from_ticks(self.ticks + rhs.ticks)
    }
}

impl Sub for TimeSpan {
    type Output = TimeSpan;

    fn sub(self, rhs: TimeSpan) -> TimeSpan {
        TimeSpan::from_ticks(self.ticks - rhs.ticks)
    }
}

impl From<TimeDelta> for TimeSpan {
    /// Spans beyond the microsecond range of `i64` saturate.
    fn from(delta: TimeDelta) -> Self {
        let ticks = delta.num_microseconds().unwrap_or(if delta < TimeDelta::zero() {
            i64::MIN
        } else {
            i64::MAX
        });
        TimeSpan::from_ticks(ticks)
    }
}

/// Instant on the UTC time scale.
///
/// Ordering and subtraction work directly on the tick count; calendar fields are derived
/// through `chrono`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch {
    ticks: i64,
}

impl Epoch {
    #[inline]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    #[inline]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Build an epoch from UTC calendar fields.
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        microsecond: u32,
    ) -> Result<Self, FrameError> {
        let invalid = || FrameError::InvalidCalendar {
            year,
            month,
            day,
            hour,
            minute,
            second,
            microsecond,
        };
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_micro_opt(hour, minute, second, microsecond))
            .ok_or_else(invalid)?;
        Self::from_naive(naive).ok_or_else(invalid)
    }

    /// Midnight at the start of the given UTC date.
    pub fn from_date(year: i32, month: u32, day: u32) -> Result<Self, FrameError> {
        Self::from_calendar(year, month, day, 0, 0, 0, 0)
    }

    fn from_naive(naive: NaiveDateTime) -> Option<Self> {
        naive
            .signed_duration_since(unix_epoch())
            .num_microseconds()
            .and_then(|micros| micros.checked_add(UNIX_EPOCH_TICKS))
            .map(Self::from_ticks)
    }

    /// Calendar representation; ticks outside chrono's range saturate to its bounds.
    pub fn naive(&self) -> NaiveDateTime {
        let micros = self.ticks.saturating_sub(UNIX_EPOCH_TICKS);
        unix_epoch()
            .checked_add_signed(TimeDelta::microseconds(micros))
            .unwrap_or(if micros < 0 {
                NaiveDateTime::MIN
            } else {
                NaiveDateTime::MAX
            })
    }

    pub fn year(&self) -> i32 {
        self.naive().year()
    }

    pub fn month(&self) -> u32 {
        self.naive().month()
    }

    pub fn day(&self) -> u32 {
        self.naive().day()
    }

    pub fn hour(&self) -> u32 {
        self.naive().hour()
    }

    pub fn minute(&self) -> u32 {
        self.naive().minute()
    }

    pub fn second(&self) -> u32 {
        self.naive().second()
    }

    pub fn microsecond(&self) -> u32 {
        self.naive().nanosecond() / 1_000
    }

    /// 00:00:00.000000 on this epoch's UTC date.
    pub fn start_of_day(&self) -> Epoch {
        Epoch::from_ticks(self.ticks - self.ticks.rem_euclid(TICKS_PER_DAY))
    }

    /// 23:59:59.999999 on this epoch's UTC date.
    pub fn end_of_day(&self) -> Epoch {
        Epoch::from_ticks(self.start_of_day().ticks + TICKS_PER_DAY - 1)
    }

    /// Julian date.
    pub fn julian(&self) -> f64 {
        TimeSpan::from_ticks(self.ticks).total_days() + JULIAN_OFFSET
    }

    /// Greenwich mean sidereal time in radians, [0, 2π).
    pub fn greenwich_sidereal_time(&self) -> f64 {
        let jd = self.julian();
        // previous midnight
        let jd0 = (jd + 0.5).floor() - 0.5;
        let t = (jd0 - J2000_JD) / 36_525.0;
        let jdf = jd - jd0;

        let mut seconds = 24_110.548_41 + t * (8_640_184.812_866 + t * (0.093_104 - t * 6.2e-6));
        seconds += jdf * SIDEREAL_RATE * 86_400.0;

        // 360 degrees per 86400 sidereal seconds
        wrap_two_pi(deg_to_rad(seconds / 240.0))
    }

    /// Local mean sidereal time in radians at `longitude` (radians, east positive).
    pub fn local_mean_sidereal_time(&self, longitude: f64) -> f64 {
        wrap_two_pi(self.greenwich_sidereal_time() + longitude)
    }
}

impl From<DateTime<Utc>> for Epoch {
    /// Instants outside the tick range saturate.
    fn from(datetime: DateTime<Utc>) -> Self {
        let naive = datetime.naive_utc();
        Epoch::from_naive(naive).unwrap_or(if naive < unix_epoch() {
            Epoch::from_ticks(i64::MIN)
        } else {
            Epoch::from_ticks(i64::MAX)
        })
    }
}

impl From<Epoch> for DateTime<Utc> {
    fn from(epoch: Epoch) -> Self {
        epoch.naive().and_utc()
    }
}

impl Add<TimeSpan> for Epoch {
    type Output = Epoch;

    fn add(self, span: TimeSpan) -> Epoch {
        Epoch::from_ticks(self.ticks + span.ticks)
    }
}

impl Sub<TimeSpan> for Epoch {
    type Output = Epoch;

    fn sub(self, span: TimeSpan) -> Epoch {
        Epoch::from_ticks(self.ticks - span.ticks)
    }
}

impl Sub for Epoch {
    type Output = TimeSpan;

    fn sub(self, rhs: Epoch) -> TimeSpan {
        TimeSpan::from_ticks(self.ticks - rhs.ticks)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} UTC", self.naive().format("%Y-%m-%d %H:%M:%S%.6f"))
    }
}
