//! Shake detector — accelerometer subscription plus observer dispatch.
//!
//! The detector owns the [`MotionSensorPort`] adapter for the lifetime of
//! the screen. A listening session is the span between
//! [`start_listening`](ShakeDetector::start_listening) and
//! [`stop_listening`](ShakeDetector::stop_listening); each session starts
//! with a fresh filter baseline.
//!
//! `stop_listening` may be called any number of times, including before
//! the first `start_listening`. Unsubscription failures are logged and
//! swallowed: shake-to-roll is a best-effort gesture.

use log::{debug, info, warn};

use crate::app::ports::{MotionSensorPort, SamplingRate, SensorError};

use super::filter::{Sample, SampleOutcome, ShakeFilter};

/// Observer invoked synchronously from the sampling callback.
pub trait ShakeListener {
    fn on_shake(&mut self, force: f32);
}

impl<F: FnMut(f32)> ShakeListener for F {
    fn on_shake(&mut self, force: f32) {
        self(force);
    }
}

pub struct ShakeDetector<S: MotionSensorPort> {
    sensors: S,
    filter: ShakeFilter,
    rate: SamplingRate,
    listener: Option<Box<dyn ShakeListener>>,
    /// Lazily populated on the first `is_supported` query.
    supported: Option<bool>,
    listening: bool,
}

impl<S: MotionSensorPort> ShakeDetector<S> {
    pub fn new(sensors: S, filter: ShakeFilter, rate: SamplingRate) -> Self {
        Self {
            sensors,
            filter,
            rate,
            listener: None,
            supported: None,
            listening: false,
        }
    }

    /// `true` if the device has at least one accelerometer.
    /// The answer is cached after the first query.
    pub fn is_supported(&mut self) -> bool {
        *self
            .supported
            .get_or_insert_with(|| self.sensors.accelerometer_count() > 0)
    }

    /// Register `listener` and subscribe to the first accelerometer.
    ///
    /// Does nothing when the device has no accelerometer. Calling this
    /// while already listening re-registers and replaces the listener.
    pub fn start_listening(&mut self, listener: Box<dyn ShakeListener>) {
        if self.sensors.accelerometer_count() == 0 {
            info!("ShakeDetector: no accelerometer, not listening");
            return;
        }
        if self.listening {
            self.release();
        }

        self.filter.reset();
        self.listening = self.sensors.register_accelerometer(self.rate);
        self.listener = Some(listener);

        if self.listening {
            info!("ShakeDetector: listening at {:?}", self.rate);
        } else {
            warn!("ShakeDetector: accelerometer registration rejected");
        }
    }

    /// Unsubscribe. Idempotent and safe before any `start_listening`.
    pub fn stop_listening(&mut self) {
        self.listener = None;
        if self.listening {
            info!("ShakeDetector: stopped listening");
        }
        self.release();
    }

    /// Update filter parameters; applies from the next sample.
    pub fn configure(&mut self, threshold: f32, min_interval_ns: u64) {
        self.filter.configure(threshold, min_interval_ns);
        debug!(
            "ShakeDetector: threshold={:.2} min_interval={}ns",
            threshold, min_interval_ns
        );
    }

    /// Sampling callback. Runs the filter and notifies the listener on a
    /// shake. Samples that arrive outside a listening session are dropped.
    pub fn on_sensor_changed(&mut self, sample: &Sample) -> Option<SampleOutcome> {
        if !self.listening {
            return None;
        }

        let outcome = self.filter.on_sample(sample);
        match outcome {
            SampleOutcome::Shake(event) => {
                debug!("ShakeDetector: shake force={:.2}", event.force);
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_shake(event.force);
                }
            }
            SampleOutcome::Baseline => debug!("ShakeDetector: no motion detected (baseline)"),
            SampleOutcome::NonMonotonic => {
                debug!("ShakeDetector: no motion detected (clock did not advance)");
            }
            SampleOutcome::Debounced { force } => {
                debug!("ShakeDetector: no motion detected (debounced, force={:.2})", force);
            }
            SampleOutcome::BelowThreshold { .. } => {}
        }
        Some(outcome)
    }

    /// Drain samples queued by the sensor adapter through
    /// [`on_sensor_changed`](Self::on_sensor_changed). Returns the number of
    /// shakes dispatched.
    pub fn deliver_pending(&mut self) -> usize {
        let mut shakes = 0;
        while let Some(sample) = self.sensors.poll_sample() {
            if let Some(SampleOutcome::Shake(_)) = self.on_sensor_changed(&sample) {
                shakes += 1;
            }
        }
        shakes
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn filter(&self) -> &ShakeFilter {
        &self.filter
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    fn release(&mut self) {
        self.listening = false;
        match self.sensors.unregister() {
            Ok(()) | Err(SensorError::NotRegistered) => {}
            Err(e) => warn!("ShakeDetector: unregister failed (ignored): {}", e),
        }
    }
}

impl<S: MotionSensorPort> Drop for ShakeDetector<S> {
    fn drop(&mut self) {
        if self.listening {
            self.release();
        }
    }
}
