//! Fast PRNG for dice rolls. Uses SplitMix64 for throughput and good statistical quality.
//! Deterministic: same seed produces the same sequence. Not cryptographically secure.

use std::collections::VecDeque;

const SPLITMIX64_GOLDEN: u64 = 0x9e3779b97f4a7c15;
const SPLITMIX64_M1: u64 = 0xbf58476d1ce4e5b9;
const SPLITMIX64_M2: u64 = 0x94d049bb133111eb;

/// Source of uniform integers for dice faces and direct-hit checks.
///
/// Every trial owns its own source; nothing here is shared across threads.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. `bound` must be non-zero.
    fn next_below(&mut self, bound: u32) -> u32;
}

#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from OS entropy; falls back to a fixed seed if entropy is unavailable.
    pub fn from_entropy_seed() -> u64 {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => u64::from_le_bytes(buf),
            Err(err) => {
                tracing::warn!("entropy unavailable ({err}), using fixed seed");
                SPLITMIX64_GOLDEN
            }
        }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(SPLITMIX64_GOLDEN);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(SPLITMIX64_M1);
        z = (z ^ (z >> 27)).wrapping_mul(SPLITMIX64_M2);
        z ^ (z >> 31)
    }
}

impl RandomSource for Rng {
    /// Lemire's multiply-shift with rejection, so small bounds like 8 and 33 stay unbiased.
    #[inline]
    fn next_below(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "next_below called with zero bound");
        let bound = u64::from(bound);
        let threshold = (u32::MAX as u64 + 1 - bound) % bound;
        loop {
            let x = self.next_u64() >> 32;
            let m = x * bound;
            if (m & 0xffff_ffff) >= threshold {
                return (m >> 32) as u32;
            }
        }
    }
}

/// Replays a fixed list of values. Used to force exact dice faces in replays and tests.
///
/// Panics when the script runs out: a resolution that consumed more randomness
/// than scripted is a broken fixture.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    values: VecDeque<u32>,
}

impl ScriptedRng {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        let value = self
            .values
            .pop_front()
            .unwrap_or_else(|| panic!("scripted rng exhausted (bound {bound})"));
        assert!(value < bound, "scripted value {value} out of range 0..{bound}");
        value
    }
}
