//! Simulated accelerometer service.
//!
//! Implements [`MotionSensorPort`] for host runs and tests. Samples are
//! pushed with [`inject`](SimulatedSensorManager::inject) and queued in a
//! fixed-capacity FIFO, like the hardware batching FIFO on a phone. When
//! the FIFO is full the oldest sample is overwritten.

use heapless::Deque;
use log::{debug, warn};

use crate::app::ports::{MotionSensorPort, SamplingRate, SensorError};
use crate::shake::Sample;

/// Samples held before the oldest is overwritten.
pub const SAMPLE_FIFO_CAP: usize = 64;

pub struct SimulatedSensorManager {
    accelerometers: usize,
    registered: Option<SamplingRate>,
    fifo: Deque<Sample, SAMPLE_FIFO_CAP>,
    overwritten: u32,
    unregister_fails: bool,
}

impl SimulatedSensorManager {
    pub fn new(accelerometers: usize) -> Self {
        Self {
            accelerometers,
            registered: None,
            fifo: Deque::new(),
            overwritten: 0,
            unregister_fails: false,
        }
    }

    /// Push a sample from the "hardware". Ignored unless a listener is
    /// registered. Returns `true` if the sample was queued.
    pub fn inject(&mut self, sample: Sample) -> bool {
        if self.registered.is_none() {
            return false;
        }
        if self.fifo.is_full() {
            self.fifo.pop_front();
            self.overwritten = self.overwritten.saturating_add(1);
            warn!("SimSensor: FIFO full, overwrote oldest sample");
        }
        // Cannot fail: a slot was freed above if the FIFO was full.
        let _ = self.fifo.push_back(sample);
        true
    }

    /// Make subsequent `unregister` calls fail with
    /// [`SensorError::ServiceUnavailable`].
    pub fn fail_unregister(&mut self, fail: bool) {
        self.unregister_fails = fail;
    }

    pub fn set_accelerometer_count(&mut self, count: usize) {
        self.accelerometers = count;
    }

    /// Rate of the active registration, if any.
    pub fn registered_rate(&self) -> Option<SamplingRate> {
        self.registered
    }

    /// Samples lost to FIFO overflow since construction.
    pub fn overwritten(&self) -> u32 {
        self.overwritten
    }

    pub fn pending(&self) -> usize {
        self.fifo.len()
    }
}

impl MotionSensorPort for SimulatedSensorManager {
    fn accelerometer_count(&self) -> usize {
        self.accelerometers
    }

    fn register_accelerometer(&mut self, rate: SamplingRate) -> bool {
        if self.accelerometers == 0 {
            return false;
        }
        debug!(
            "SimSensor: registered at {:?} ({}us period)",
            rate,
            rate.nominal_period_us()
        );
        self.registered = Some(rate);
        true
    }

    fn unregister(&mut self) -> Result<(), SensorError> {
        if self.unregister_fails {
            return Err(SensorError::ServiceUnavailable);
        }
        if self.registered.take().is_none() {
            return Err(SensorError::NotRegistered);
        }
        self.fifo.clear();
        Ok(())
    }

    fn poll_sample(&mut self) -> Option<Sample> {
        self.fifo.pop_front()
    }
}
