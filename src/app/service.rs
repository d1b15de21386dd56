//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the shake detector, the die, and the counters. It
//! exposes one method per screen lifecycle callback plus command and
//! sample entry points. All I/O flows through port traits injected at call
//! sites, making the whole service testable with mock adapters.
//!
//! ```text
//!  MotionSensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                       │       AppService        │
//!       StoragePort ◀──▶│  Detector · Dice · Ctr  │◀── RandomPort
//!                       └────────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! | Callback     | Effect                                           |
//! |--------------|--------------------------------------------------|
//! | `on_create`  | restore `start_count`, probe accelerometer       |
//! | `on_start`   | `start_count += 1`, load `roll_count`            |
//! | `on_resume`  | start shake listening (if supported)             |
//! | `on_pause`   | stop shake listening                             |
//! | `on_stop`    | persist `roll_count`                             |

use std::cell::RefCell;
use std::rc::Rc;

use heapless::Deque;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::dice::{Dice, DieFace};
use crate::error::{Error, Result};
use crate::shake::{Sample, SampleOutcome, ShakeDetector, ShakeFilter, ShakeListener};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{EventSink, MotionSensorPort, RandomPort, StorageError, StoragePort};

/// Key of the persisted roll counter inside `prefs_namespace`.
pub const ROLL_COUNTER_KEY: &str = "roll_counter";

/// Read buffer for the roll counter: one byte more than a postcard `u32`.
const ROLL_COUNTER_BUF: usize = 6;

/// Shakes buffered between two dispatches; extra shakes are dropped.
const SHAKE_INBOX_CAP: usize = 16;

// ───────────────────────────────────────────────────────────────
// Saved instance state
// ───────────────────────────────────────────────────────────────

/// State that survives a screen re-creation (rotation, process restore)
/// but not an app restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedState {
    pub start_count: u32,
}

impl SavedState {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| Error::Codec("saved state"))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        postcard::from_bytes(bytes).map_err(|_| Error::Codec("saved state"))
    }
}

/// Last lifecycle callback seen by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Initialized,
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
}

// ───────────────────────────────────────────────────────────────
// Shake inbox (listener → service hand-off)
// ───────────────────────────────────────────────────────────────

/// Listener registered with the detector. Shakes are queued here from the
/// sampling callback and turned into rolls by the service afterwards.
#[derive(Clone, Default)]
struct ShakeInbox(Rc<RefCell<Deque<f32, SHAKE_INBOX_CAP>>>);

impl ShakeInbox {
    fn take(&self) -> Option<f32> {
        self.0.borrow_mut().pop_front()
    }
}

impl ShakeListener for ShakeInbox {
    fn on_shake(&mut self, force: f32) {
        if self.0.borrow_mut().push_back(force).is_err() {
            warn!("Shake inbox full, dropping shake (force={:.2})", force);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all screen logic.
pub struct AppService<S: MotionSensorPort> {
    config: AppConfig,
    detector: ShakeDetector<S>,
    dice: Dice,
    start_count: u32,
    inbox: ShakeInbox,
    lifecycle: Lifecycle,
}

impl<S: MotionSensorPort> AppService<S> {
    /// Construct the service. Does **not** touch storage or the sensor
    /// subscription; drive the lifecycle methods next.
    pub fn new(config: AppConfig, sensors: S) -> Self {
        let filter = ShakeFilter::new(config.shake_threshold, config.shake_min_interval_ns);
        let detector = ShakeDetector::new(sensors, filter, config.sampling_rate);
        Self {
            config,
            detector,
            dice: Dice::default(),
            start_count: 0,
            inbox: ShakeInbox::default(),
            lifecycle: Lifecycle::Initialized,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Restore `start_count` from `saved` and probe for an accelerometer.
    /// Returns whether shake-to-roll is supported.
    pub fn on_create(&mut self, saved: Option<&SavedState>, sink: &mut impl EventSink) -> bool {
        self.start_count = saved.map_or(0, |s| s.start_count);
        self.set_lifecycle(Lifecycle::Created);
        sink.emit(&AppEvent::Created {
            start_count: self.start_count,
        });

        let supported = self.detector.is_supported();
        if !supported {
            sink.emit(&AppEvent::NoAccelerometer);
        }
        supported
    }

    /// Count the start and reload the persisted roll counter.
    pub fn on_start(&mut self, storage: &impl StoragePort, sink: &mut impl EventSink) -> Result<()> {
        self.start_count = self.start_count.saturating_add(1);
        self.set_lifecycle(Lifecycle::Started);

        let roll_count = self.load_roll_count(storage)?;
        self.dice.set_roll_count(roll_count);

        sink.emit(&AppEvent::CountersUpdated {
            start_count: self.start_count,
            roll_count,
        });
        Ok(())
    }

    /// Start listening for shakes if the device supports it.
    pub fn on_resume(&mut self, sink: &mut impl EventSink) {
        self.set_lifecycle(Lifecycle::Resumed);
        if !self.detector.is_supported() {
            return;
        }
        self.detector.start_listening(Box::new(self.inbox.clone()));
        sink.emit(&AppEvent::ShakeListening(self.detector.is_listening()));
    }

    /// Stop listening for shakes.
    pub fn on_pause(&mut self, sink: &mut impl EventSink) {
        self.set_lifecycle(Lifecycle::Paused);
        let was_listening = self.detector.is_listening();
        self.detector.stop_listening();
        if was_listening {
            sink.emit(&AppEvent::ShakeListening(false));
        }
    }

    /// Persist the roll counter.
    pub fn on_stop(&mut self, storage: &mut impl StoragePort) -> Result<()> {
        self.set_lifecycle(Lifecycle::Stopped);
        let bytes = postcard::to_allocvec(&self.dice.roll_count())
            .map_err(|_| Error::Codec("roll counter"))?;
        storage.write(&self.config.prefs_namespace, ROLL_COUNTER_KEY, &bytes)?;
        info!("Roll counter saved ({})", self.dice.roll_count());
        Ok(())
    }

    /// Snapshot of the state to hand back to [`on_create`](Self::on_create)
    /// after the screen is re-created.
    pub fn save_instance_state(&self) -> SavedState {
        SavedState {
            start_count: self.start_count,
        }
    }

    // ── Input ─────────────────────────────────────────────────

    /// Process a user command. Returns the rolled face for [`AppCommand::Roll`].
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        rng: &mut impl RandomPort,
        sink: &mut impl EventSink,
    ) -> Result<Option<DieFace>> {
        match cmd {
            AppCommand::Roll => Ok(Some(self.roll(rng, sink))),
            AppCommand::ConfigureShake {
                threshold,
                min_interval_ns,
            } => {
                let candidate = AppConfig {
                    shake_threshold: threshold,
                    shake_min_interval_ns: min_interval_ns,
                    ..self.config.clone()
                };
                candidate.validate()?;
                self.config = candidate;
                self.detector.configure(threshold, min_interval_ns);
                sink.emit(&AppEvent::ShakeConfigured {
                    threshold,
                    min_interval_ns,
                });
                Ok(None)
            }
        }
    }

    /// Sampling callback entry point: feed one sample and roll on a shake.
    pub fn on_sample(
        &mut self,
        sample: &Sample,
        rng: &mut impl RandomPort,
        sink: &mut impl EventSink,
    ) -> Option<DieFace> {
        let Some(SampleOutcome::Shake(_)) = self.detector.on_sensor_changed(sample) else {
            return None;
        };
        if self.dispatch_shakes(rng, sink) == 0 {
            return None;
        }
        self.dice.last_face()
    }

    /// Drain every sample the sensor adapter has queued and roll once per
    /// shake. Returns the number of rolls performed.
    pub fn pump_sensors(&mut self, rng: &mut impl RandomPort, sink: &mut impl EventSink) -> usize {
        if self.detector.deliver_pending() == 0 {
            return 0;
        }
        self.dispatch_shakes(rng, sink)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn start_count(&self) -> u32 {
        self.start_count
    }

    pub fn roll_count(&self) -> u32 {
        self.dice.roll_count()
    }

    pub fn last_face(&self) -> Option<DieFace> {
        self.dice.last_face()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_listening(&self) -> bool {
        self.detector.is_listening()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Access to the sensor adapter (e.g. to inject simulated samples).
    pub fn sensors_mut(&mut self) -> &mut S {
        self.detector.sensors_mut()
    }

    // ── Internal ──────────────────────────────────────────────

    fn roll(&mut self, rng: &mut impl RandomPort, sink: &mut impl EventSink) -> DieFace {
        let face = self.dice.roll(rng);
        sink.emit(&AppEvent::DiceRolled {
            face,
            roll_count: self.dice.roll_count(),
        });
        face
    }

    /// Turn every queued shake into a roll. Returns the number of rolls.
    fn dispatch_shakes(&mut self, rng: &mut impl RandomPort, sink: &mut impl EventSink) -> usize {
        let mut rolls = 0;
        while let Some(force) = self.inbox.take() {
            sink.emit(&AppEvent::ShakeDetected { force });
            self.roll(rng, sink);
            rolls += 1;
        }
        rolls
    }

    /// A full buffer means the stored blob may have been cut short, and any
    /// bytes left after the varint mean it is not a counter.
    fn load_roll_count(&self, storage: &impl StoragePort) -> Result<u32> {
        let mut buf = [0u8; ROLL_COUNTER_BUF];
        match storage.read(&self.config.prefs_namespace, ROLL_COUNTER_KEY, &mut buf) {
            Ok(len) if len < buf.len() => match postcard::take_from_bytes::<u32>(&buf[..len]) {
                Ok((count, [])) => Ok(count),
                _ => Err(Error::Codec("roll counter")),
            },
            Ok(_) => Err(Error::Codec("roll counter")),
            Err(StorageError::NotFound) => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn set_lifecycle(&mut self, next: Lifecycle) {
        info!("Lifecycle {:?} -> {:?}", self.lifecycle, next);
        self.lifecycle = next;
    }
}
