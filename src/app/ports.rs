//! Port traits — the hexagonal boundary between domain logic and the platform.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService / ShakeDetector (domain)
//! ```
//!
//! Driven adapters (motion sensor service, key-value storage, randomness,
//! event sinks) implement these traits. The domain consumes them via
//! generics, so the core never touches a platform API directly.

use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::shake::Sample;

// ───────────────────────────────────────────────────────────────
// Motion sensor port (driven adapter: platform sensor service → domain)
// ───────────────────────────────────────────────────────────────

/// Delivery-rate category requested when subscribing to the accelerometer.
///
/// The platform picks the real period; these are the nominal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingRate {
    /// As fast as the hardware allows.
    Fastest,
    /// Suitable for games (~50 Hz).
    #[default]
    Game,
    /// Suitable for UI updates (~16 Hz).
    Ui,
    /// Screen-orientation rate (~5 Hz).
    Normal,
}

impl SamplingRate {
    /// Nominal delivery period in microseconds (`0` = unthrottled).
    pub const fn nominal_period_us(self) -> u32 {
        match self {
            Self::Fastest => 0,
            Self::Game => 20_000,
            Self::Ui => 66_667,
            Self::Normal => 200_000,
        }
    }
}

/// Platform accelerometer service.
///
/// Samples are delivered in arrival order on a single callback context;
/// host adapters queue them and hand them out through [`poll_sample`].
///
/// [`poll_sample`]: MotionSensorPort::poll_sample
pub trait MotionSensorPort {
    /// Number of accelerometer sensors present on the device.
    fn accelerometer_count(&self) -> usize;

    /// Subscribe to the first accelerometer at `rate`.
    /// Returns `true` if the platform accepted the registration.
    fn register_accelerometer(&mut self, rate: SamplingRate) -> bool;

    /// Drop the accelerometer subscription.
    fn unregister(&mut self) -> Result<(), SensorError>;

    /// Next queued sample, oldest first.
    fn poll_sample(&mut self) -> Option<Sample>;
}

// ───────────────────────────────────────────────────────────────
// Randomness port
// ───────────────────────────────────────────────────────────────

/// Source of dice randomness.
pub trait RandomPort {
    fn next_u32(&mut self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / UI)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (log, UI binding,
/// test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists application configuration.
///
/// Implementations MUST validate before persisting and reject invalid
/// ranges with [`ConfigError::ValidationFailed`], never clamp silently.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`AppConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ key-value preferences)
// ───────────────────────────────────────────────────────────────

/// Persistent namespaced key-value storage (the roll counter lives here).
///
/// Writes MUST be atomic: a crash mid-write leaves the old value intact.
pub trait StoragePort {
    /// Read a value. Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`MotionSensorPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Nothing is currently registered.
    NotRegistered,
    /// The sensor service is unavailable (e.g. torn down by the platform).
    ServiceUnavailable,
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` names the field and the allowed range.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for SensorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotRegistered => write!(f, "no sensor listener registered"),
            Self::ServiceUnavailable => write!(f, "sensor service unavailable"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
