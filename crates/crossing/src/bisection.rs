//! Tick-level bisection over a boolean predicate of time.

use horizon_frames::Epoch;
use tracing::trace;

/// Find the earliest tick in `(low, high]` at which `predicate` holds.
///
/// Expects `predicate(low)` to be false and `predicate(high)` to be true, with a single
/// false-to-true transition in between. The bracket is halved on the tick midpoint until
/// it spans one tick; `high` is then returned. The endpoints themselves are never
/// evaluated, so a bracket that breaks the precondition still terminates and yields an
/// instant inside it. An empty or inverted bracket returns `high` unchanged.
pub fn bisect<P>(low: Epoch, high: Epoch, mut predicate: P) -> Epoch
where
    P: FnMut(Epoch) -> bool,
{
    let mut low = low.ticks();
    let mut high = high.ticks();
    let mut steps = 0u32;

    while i128::from(high) - i128::from(low) > 1 {
        // i128 keeps the midpoint exact for brackets wider than i64::MAX ticks
        let mid = ((i128::from(low) + i128::from(high)) / 2) as i64;
        if predicate(Epoch::from_ticks(mid)) {
            high = mid;
        } else {
            low = mid;
        }
        steps += 1;
        trace!(steps, low, high, "bisection step");
    }

    Epoch::from_ticks(high)
}
