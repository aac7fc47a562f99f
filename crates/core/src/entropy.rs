//! Randomness for the flame
//!
//! The simulator draws from a seeded generator, and once per frame a sample
//! from an outside [`EntropySource`] is mixed into it. Mixing folds the sample
//! into the generator's own next output before reseeding, so the sequence is
//! perturbed rather than restarted and no fixed cycle shows up on the panel.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Odd multiplier used to spread consecutive counter values across all bits
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Outside source of unpredictable values, sampled once per frame
pub trait EntropySource {
    fn sample(&mut self) -> u64;
}

impl<S: EntropySource + ?Sized> EntropySource for Box<S> {
    fn sample(&mut self) -> u64 {
        (**self).sample()
    }
}

/// Entropy from the wall clock's sub-second nanoseconds and a call counter
///
/// Stand-in for a free-running hardware counter or an ADC noise sample.
#[derive(Debug, Clone, Default)]
pub struct ClockEntropy {
    calls: u64,
}

impl ClockEntropy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntropySource for ClockEntropy {
    fn sample(&mut self) -> u64 {
        self.calls = self.calls.wrapping_add(1);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::from(elapsed.subsec_nanos()))
            .unwrap_or(0);
        nanos ^ self.calls.wrapping_mul(GOLDEN_GAMMA)
    }
}

/// Constant entropy, for reproducible runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEntropy(pub u64);

impl EntropySource for FixedEntropy {
    fn sample(&mut self) -> u64 {
        self.0
    }
}

/// Generator owned by the frame loop
#[derive(Debug, Clone)]
pub struct FireRng {
    inner: StdRng,
}

impl FireRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Fold an entropy sample into the generator state
    pub fn mix(&mut self, sample: u64) {
        let folded = self.inner.next_u64() ^ sample.rotate_left(29);
        self.inner = StdRng::seed_from_u64(folded);
    }
}

impl RngCore for FireRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.inner.fill_bytes(dst);
    }
}
