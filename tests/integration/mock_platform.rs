//! Mock platform adapters for integration tests.
//!
//! Records every sensor-service call so tests can assert on the full
//! subscription history without a device.

use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::rc::Rc;

use diceroller::app::events::AppEvent;
use diceroller::app::ports::{
    EventSink, MotionSensorPort, RandomPort, SamplingRate, SensorError, StorageError, StoragePort,
};
use diceroller::shake::Sample;

// ── Sensor call record ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SensorCall {
    Register(SamplingRate),
    Unregister,
}

// ── MockSensors ──────────────────────────────────────────────

pub struct MockSensors {
    pub accelerometers: usize,
    pub accept_registration: bool,
    pub calls: Vec<SensorCall>,
    pub queue: VecDeque<Sample>,
    /// Mirror of `calls` that outlives the mock (for drop assertions).
    pub shared: Option<Rc<RefCell<Vec<SensorCall>>>>,
}

#[allow(dead_code)]
impl MockSensors {
    pub fn new(accelerometers: usize) -> Self {
        Self {
            accelerometers,
            accept_registration: true,
            calls: Vec::new(),
            queue: VecDeque::new(),
            shared: None,
        }
    }

    pub fn with_shared_log(accelerometers: usize) -> (Self, Rc<RefCell<Vec<SensorCall>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut sensors = Self::new(accelerometers);
        sensors.shared = Some(Rc::clone(&log));
        (sensors, log)
    }

    fn record(&mut self, call: SensorCall) {
        if let Some(shared) = &self.shared {
            shared.borrow_mut().push(call.clone());
        }
        self.calls.push(call);
    }

    pub fn registrations(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SensorCall::Register(_)))
            .count()
    }

    pub fn unregistrations(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SensorCall::Unregister))
            .count()
    }
}

impl MotionSensorPort for MockSensors {
    fn accelerometer_count(&self) -> usize {
        self.accelerometers
    }

    fn register_accelerometer(&mut self, rate: SamplingRate) -> bool {
        self.record(SensorCall::Register(rate));
        self.accept_registration
    }

    fn unregister(&mut self) -> Result<(), SensorError> {
        self.record(SensorCall::Unregister);
        Ok(())
    }

    fn poll_sample(&mut self) -> Option<Sample> {
        self.queue.pop_front()
    }
}

// ── MockPrefs ────────────────────────────────────────────────

pub struct MockPrefs {
    pub store: HashMap<String, Vec<u8>>,
    pub fail_reads: bool,
}

#[allow(dead_code)]
impl MockPrefs {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            fail_reads: false,
        }
    }
}

impl Default for MockPrefs {
    fn default() -> Self {
        Self::new()
    }
}

impl StoragePort for MockPrefs {
    fn read(&self, ns: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        if self.fail_reads {
            return Err(StorageError::IoError);
        }
        match self.store.get(&format!("{}::{}", ns, key)) {
            Some(v) => {
                let n = v.len().min(buf.len());
                buf[..n].copy_from_slice(&v[..n]);
                Ok(n)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, ns: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.store.insert(format!("{}::{}", ns, key), data.to_vec());
        Ok(())
    }
}

// ── ScriptedRandom ───────────────────────────────────────────

/// Returns the scripted values in order, then repeats the last one.
pub struct ScriptedRandom {
    values: VecDeque<u32>,
    last: u32,
}

impl ScriptedRandom {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.iter().copied().collect(),
            last: 0,
        }
    }
}

impl RandomPort for ScriptedRandom {
    fn next_u32(&mut self) -> u32 {
        if let Some(v) = self.values.pop_front() {
            self.last = v;
        }
        self.last
    }
}

// ── RecordingSink ────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn rolls(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::DiceRolled { .. }))
            .count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
