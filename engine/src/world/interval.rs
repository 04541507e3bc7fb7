//! Fixed Interval Accumulator
//!
//! Throttles periodic maintenance work (registry refresh, ground-snap sweeps)
//! to a fixed cadence independent of the render frame rate.

/// Elapsed-time accumulator that fires once per `interval` seconds.
///
/// At most one firing is reported per [`FixedInterval::tick`]; any backlog
/// beyond one interval is dropped so a long frame cannot trigger a burst of
/// catch-up sweeps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedInterval {
    interval: f32,
    elapsed: f32,
    fired: u64,
}

impl FixedInterval {
    /// Create an accumulator firing every `interval` seconds.
    ///
    /// Non-positive intervals fire on every tick.
    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(0.0),
            elapsed: 0.0,
            fired: 0,
        }
    }

    /// Advance by `delta` seconds; returns `true` when the interval elapsed.
    pub fn tick(&mut self, delta: f32) -> bool {
        self.elapsed += delta.max(0.0);

        if self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            if self.elapsed >= self.interval {
                self.elapsed = 0.0;
            }
            self.fired += 1;
            true
        } else {
            false
        }
    }

    /// Configured interval in seconds.
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// How many times this accumulator has fired.
    pub fn fired_count(&self) -> u64 {
        self.fired
    }
}
