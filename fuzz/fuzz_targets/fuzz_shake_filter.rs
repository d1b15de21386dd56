//! Fuzz target: `ShakeFilter::on_sample`
//!
//! Feeds arbitrary sample streams (including NaN, infinities and
//! timestamps that go backwards) through the filter.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - A stale sample never changes the baseline or the last shake
//! - Consecutive shakes are at least `min_interval` apart
//!
//! cargo fuzz run fuzz_shake_filter

#![no_main]

use diceroller::shake::{Sample, SampleOutcome, ShakeFilter};
use libfuzzer_sys::fuzz_target;

const RECORD: usize = 20;

fuzz_target!(|data: &[u8]| {
    if data.len() < 12 {
        return;
    }
    let (head, body) = data.split_at(12);
    let threshold = f32::from_le_bytes([head[0], head[1], head[2], head[3]]);
    let interval = u64::from_le_bytes([
        head[4], head[5], head[6], head[7], head[8], head[9], head[10], head[11],
    ]);

    let mut filter = ShakeFilter::new(threshold, interval);
    let mut last_shake: Option<u64> = None;

    for chunk in body.chunks_exact(RECORD) {
        let t = u64::from_le_bytes([
            chunk[0], chunk[1], chunk[2], chunk[3], chunk[4], chunk[5], chunk[6], chunk[7],
        ]);
        let axis = |i: usize| f32::from_le_bytes([chunk[i], chunk[i + 1], chunk[i + 2], chunk[i + 3]]);
        let sample = Sample::new(t, axis(8), axis(12), axis(16));

        let baseline = filter.baseline();
        let seeded = filter.last_shake_ns();
        match filter.on_sample(&sample) {
            SampleOutcome::NonMonotonic => {
                assert_eq!(filter.baseline().map(|b| b.timestamp_ns), baseline.map(|b| b.timestamp_ns));
                assert_eq!(filter.last_shake_ns(), seeded);
            }
            SampleOutcome::Shake(ev) => {
                if let Some(prev) = last_shake {
                    assert!(ev.timestamp_ns - prev >= interval);
                }
                last_shake = Some(ev.timestamp_ns);
            }
            _ => {}
        }
    }
});
