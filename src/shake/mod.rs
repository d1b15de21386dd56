//! Shake gesture subsystem.
//!
//! ```text
//!  MotionSensorPort ──▶ ShakeDetector ──▶ ShakeFilter ──▶ ShakeListener
//!  (accelerometer)      (subscription)    (threshold +     (on_shake)
//!                                          debounce)
//! ```
//!
//! [`filter::ShakeFilter`] is the pure per-sample state machine;
//! [`detector::ShakeDetector`] owns the sensor subscription and the
//! registered observer.

pub mod detector;
pub mod filter;

pub use detector::{ShakeDetector, ShakeListener};
pub use filter::{Sample, SampleOutcome, ShakeEvent, ShakeFilter};
