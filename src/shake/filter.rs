//! Debounced threshold filter over a 3-axis accelerometer stream.
//!
//! ## Algorithm
//!
//! Each sample is compared against the previous one:
//!
//! ```text
//! force = | (x + y + z) - (prev_x + prev_y + prev_z) |
//! ```
//!
//! This is the delta of the axis *sum*, not a vector norm: a shake that
//! moves two axes in opposite directions cancels out. It is cheap and good
//! enough for a hand-held "shake to roll" gesture.
//!
//! A shake fires when `force > threshold` and at least `min_interval_ns`
//! has elapsed since the previous shake. Suppressed shakes do not extend
//! the debounce window.
//!
//! ## States
//!
//! | State           | Entered by              | Leaves on            |
//! |-----------------|-------------------------|----------------------|
//! | `Uninitialized` | `new()`, `reset()`      | first sample         |
//! | `Tracking`      | first sample            | `reset()` only       |

/// Default minimum force (sum-of-axes delta, m/s²) for a shake.
pub const DEFAULT_THRESHOLD: f32 = 10.0;

/// Default debounce interval between shakes: 100 ms in sensor-clock ns.
///
/// Sensor timestamps tick in nanoseconds, so a bare `100` on that clock
/// would debounce for only 100 ns. The interval is 100 ms on purpose.
pub const DEFAULT_MIN_INTERVAL_NS: u64 = 100_000_000;

/// One accelerometer reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Monotonic sensor-clock timestamp (nanoseconds).
    pub timestamp_ns: u64,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Sample {
    pub const fn new(timestamp_ns: u64, x: f32, y: f32, z: f32) -> Self {
        Self {
            timestamp_ns,
            x,
            y,
            z,
        }
    }

    fn axis_sum(&self) -> f32 {
        self.x + self.y + self.z
    }
}

/// A discrete shake, handed to the registered observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeEvent {
    pub force: f32,
    pub timestamp_ns: u64,
}

/// What the filter did with a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// First sample of the session, recorded as baseline.
    Baseline,
    /// Timestamp did not advance; sample dropped, state untouched.
    NonMonotonic,
    /// Force did not exceed the threshold.
    BelowThreshold { force: f32 },
    /// Force exceeded the threshold inside the debounce window.
    Debounced { force: f32 },
    /// Shake detected.
    Shake(ShakeEvent),
}

impl SampleOutcome {
    pub fn shake(self) -> Option<ShakeEvent> {
        match self {
            Self::Shake(event) => Some(event),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FilterState {
    Uninitialized,
    Tracking { last: Sample, last_shake_ns: u64 },
}

/// Per-session shake filter. Not thread-safe; feed it from one callback
/// context in arrival order.
#[derive(Debug, Clone)]
pub struct ShakeFilter {
    threshold: f32,
    min_interval_ns: u64,
    state: FilterState,
}

impl Default for ShakeFilter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_MIN_INTERVAL_NS)
    }
}

impl ShakeFilter {
    pub fn new(threshold: f32, min_interval_ns: u64) -> Self {
        Self {
            threshold,
            min_interval_ns,
            state: FilterState::Uninitialized,
        }
    }

    /// Update the threshold and debounce interval. Applies from the next
    /// sample; the current baseline is kept.
    pub fn configure(&mut self, threshold: f32, min_interval_ns: u64) {
        self.threshold = threshold;
        self.min_interval_ns = min_interval_ns;
    }

    /// Drop the baseline and return to `Uninitialized`.
    pub fn reset(&mut self) {
        self.state = FilterState::Uninitialized;
    }

    /// Feed one sample.
    pub fn on_sample(&mut self, sample: &Sample) -> SampleOutcome {
        let FilterState::Tracking {
            last,
            last_shake_ns,
        } = self.state
        else {
            self.state = FilterState::Tracking {
                last: *sample,
                last_shake_ns: sample.timestamp_ns,
            };
            return SampleOutcome::Baseline;
        };

        if sample.timestamp_ns <= last.timestamp_ns {
            return SampleOutcome::NonMonotonic;
        }

        let force = (sample.axis_sum() - last.axis_sum()).abs();

        let mut shake_ns = last_shake_ns;
        let outcome = if force > self.threshold {
            if sample.timestamp_ns.saturating_sub(last_shake_ns) >= self.min_interval_ns {
                shake_ns = sample.timestamp_ns;
                SampleOutcome::Shake(ShakeEvent {
                    force,
                    timestamp_ns: sample.timestamp_ns,
                })
            } else {
                SampleOutcome::Debounced { force }
            }
        } else {
            SampleOutcome::BelowThreshold { force }
        };

        self.state = FilterState::Tracking {
            last: *sample,
            last_shake_ns: shake_ns,
        };
        outcome
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn min_interval_ns(&self) -> u64 {
        self.min_interval_ns
    }

    /// `true` once a baseline sample has been recorded.
    pub fn is_tracking(&self) -> bool {
        matches!(self.state, FilterState::Tracking { .. })
    }

    /// The most recent accepted sample.
    pub fn baseline(&self) -> Option<Sample> {
        match self.state {
            FilterState::Tracking { last, .. } => Some(last),
            FilterState::Uninitialized => None,
        }
    }

    /// Timestamp of the last emitted shake (seeded with the baseline
    /// timestamp when tracking starts).
    pub fn last_shake_ns(&self) -> Option<u64> {
        match self.state {
            FilterState::Tracking { last_shake_ns, .. } => Some(last_shake_ns),
            FilterState::Uninitialized => None,
        }
    }
}
