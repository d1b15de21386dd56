//! Host randomness adapter.
//!
//! Draws non-cryptographic entropy from `std`'s `RandomState`, which is
//! seeded per process by the OS. Plenty for a die.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

use crate::app::ports::RandomPort;

#[derive(Debug, Default)]
pub struct HostRandom {
    counter: u64,
}

impl HostRandom {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RandomPort for HostRandom {
    fn next_u32(&mut self) -> u32 {
        self.counter = self.counter.wrapping_add(1);
        let mut hasher = RandomState::new().build_hasher();
        hasher.write_u64(self.counter);
        (hasher.finish() >> 32) as u32
    }
}
