//! Application configuration.
//!
//! All tunable parameters for shake detection and counter persistence.
//! Values can be overridden from the stored config (via [`ConfigPort`]) or
//! from the command line.
//!
//! [`ConfigPort`]: crate::app::ports::ConfigPort

use serde::{Deserialize, Serialize};

use crate::app::ports::{ConfigError, SamplingRate};
use crate::shake::filter::{DEFAULT_MIN_INTERVAL_NS, DEFAULT_THRESHOLD};

/// Longest storage namespace the preference backends accept.
pub const MAX_NAMESPACE_LEN: usize = 15;

/// Core application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    // --- Shake filter ---
    /// Minimum sum-of-axes delta (m/s²) that counts as a shake.
    pub shake_threshold: f32,
    /// Minimum time between two shakes (sensor-clock nanoseconds).
    pub shake_min_interval_ns: u64,
    /// Accelerometer delivery-rate category.
    pub sampling_rate: SamplingRate,

    // --- Persistence ---
    /// Key-value namespace holding the roll counter.
    pub prefs_namespace: heapless::String<MAX_NAMESPACE_LEN>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut prefs_namespace = heapless::String::new();
        // "diceRollerPref" is 14 bytes, always fits.
        let _ = prefs_namespace.push_str("diceRollerPref");
        Self {
            shake_threshold: DEFAULT_THRESHOLD,
            shake_min_interval_ns: DEFAULT_MIN_INTERVAL_NS, // 100 ms
            sampling_rate: SamplingRate::Game,
            prefs_namespace,
        }
    }
}

impl AppConfig {
    /// Range-check every field. Out-of-range values are rejected, never
    /// clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.shake_threshold.is_finite() || !(0.1..=1000.0).contains(&self.shake_threshold) {
            return Err(ConfigError::ValidationFailed(
                "shake_threshold must be 0.1–1000.0",
            ));
        }
        if self.shake_min_interval_ns > 10_000_000_000 {
            return Err(ConfigError::ValidationFailed(
                "shake_min_interval_ns must be <= 10 s",
            ));
        }
        if self.prefs_namespace.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "prefs_namespace must not be empty",
            ));
        }
        Ok(())
    }
}
