//! Fuzz target: `replay::parse_trace`
//!
//! Arbitrary bytes must yield either samples or a `ReplayError`, never a
//! panic.
//!
//! cargo fuzz run fuzz_trace_parser

#![no_main]

use diceroller::adapters::replay::parse_trace;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = parse_trace(data);
});
