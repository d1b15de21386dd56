//! Application core — pure domain logic, zero I/O.
//!
//! This module holds the dice-roller screen logic: lifecycle handling,
//! roll and start counters, and shake-to-roll. All interaction with the
//! platform happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without a device.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
