use serde::{Deserialize, Serialize};

/// Tiny deterministic RNG used by the activity generator.
///
/// Same seed, same sequence, on every platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// Next pseudo-random `u64`.
    pub const fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        // High bits of an LCG are the well-mixed ones.
        (self.state >> 33) ^ self.state
    }

    /// Next value in `[0, upper_exclusive)`.
    pub const fn next_bounded(&mut self, upper_exclusive: u64) -> u64 {
        if upper_exclusive == 0 {
            return 0;
        }
        self.next_u64() % upper_exclusive
    }

    /// Next value in `[low, high]`. Returns `low` when the range is empty.
    pub const fn next_in_range(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        #[allow(clippy::cast_possible_truncation)]
        let offset = self.next_bounded((high - low + 1) as u64) as usize;
        low + offset
    }

    /// Bernoulli trial with integer percent.
    pub fn hit_rate_percent(&mut self, percent: u8) -> bool {
        if percent == 0 {
            return false;
        }
        if percent >= 100 {
            return true;
        }
        self.next_bounded(100) < u64::from(percent)
    }

    /// Uniform choice from a slice, `None` when it is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        #[allow(clippy::cast_possible_truncation)]
        let idx = self.next_bounded(items.len() as u64) as usize;
        items.get(idx)
    }
}
