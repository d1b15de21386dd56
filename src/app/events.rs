//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them: update the counter labels, swap the die
//! image, log to the console.

use crate::dice::DieFace;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Screen created; `start_count` restored from saved state (or 0).
    Created { start_count: u32 },

    /// No accelerometer on this device; shake-to-roll is unavailable.
    NoAccelerometer,

    /// Counter labels need refreshing.
    CountersUpdated { start_count: u32, roll_count: u32 },

    /// Shake listening started (`true`) or stopped (`false`).
    ShakeListening(bool),

    /// A shake was detected with the given force.
    ShakeDetected { force: f32 },

    /// The die was rolled.
    DiceRolled { face: DieFace, roll_count: u32 },

    /// Shake filter parameters changed.
    ShakeConfigured { threshold: f32, min_interval_ns: u64 },
}
