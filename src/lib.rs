//! DiceRoller library.
//!
//! Exposes the pure-logic modules (shake filter, detector, dice, app
//! service) together with the host adapters used by the binary and the
//! integration tests. The platform is only reached through the port
//! traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod dice;
pub mod error;
pub mod shake;
