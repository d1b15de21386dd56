//! Inbound commands to the application service.
//!
//! These represent user actions (roll button, settings screen) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Roll button pressed.
    Roll,

    /// Retune shake sensitivity at runtime.
    ConfigureShake {
        threshold: f32,
        min_interval_ns: u64,
    },
}
