//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade. A UI binding would implement the same trait to update
//! the counter labels and die image.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Created { start_count } => {
                info!("CREATE | start_count={}", start_count);
            }
            AppEvent::NoAccelerometer => {
                warn!("SHAKE | no accelerometer, shake to roll unavailable");
            }
            AppEvent::CountersUpdated {
                start_count,
                roll_count,
            } => {
                info!("COUNT | starts={} rolls={}", start_count, roll_count);
            }
            AppEvent::ShakeListening(on) => {
                info!("SHAKE | listening={}", on);
            }
            AppEvent::ShakeDetected { force } => {
                info!("SHAKE | force={:.2}", force);
            }
            AppEvent::DiceRolled { face, roll_count } => {
                info!("ROLL  | face={} rolls={}", face, roll_count);
            }
            AppEvent::ShakeConfigured {
                threshold,
                min_interval_ns,
            } => {
                info!(
                    "CONFIG | threshold={:.2} min_interval={}ms",
                    threshold,
                    min_interval_ns / 1_000_000
                );
            }
        }
    }
}
