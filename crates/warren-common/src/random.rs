//! Random number sources for generation steps.
//!
//! Steps never reach for a global generator. They draw from a
//! [`RandomSource`] handed to them by the pipeline, so a seeded run (or a
//! [`FixedSequence`] in tests) reproduces exactly.

/// Source of random draws used by generation steps.
pub trait RandomSource {
    /// Returns an integer in the half-open range `[lo, hi)`.
    ///
    /// Returns `lo` when the range is empty.
    fn range(&mut self, lo: i32, hi: i32) -> i32;

    /// Returns `true` with the given probability (clamped to 0..=1).
    fn chance(&mut self, probability: f64) -> bool;

    /// Returns a full-width random value, used to derive child seeds.
    fn next_u64(&mut self) -> u64;
}

impl RandomSource for fastrand::Rng {
    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.i32(lo..hi)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.f64() < probability.clamp(0.0, 1.0)
    }

    fn next_u64(&mut self) -> u64 {
        self.u64(..)
    }
}

/// A scripted random source replaying a fixed list of draws.
///
/// Each call consumes the next value. `range` maps it into the requested
/// range with `lo + value % (hi - lo)`, `chance` treats it as a percentage
/// (`value % 100 < probability * 100`). Once the list is exhausted it starts
/// over from the beginning; an empty list always yields zero.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    values: Vec<u64>,
    cursor: usize,
}

impl FixedSequence {
    /// Creates a sequence replaying `values` in order.
    #[must_use]
    pub fn new(values: impl Into<Vec<u64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn next_value(&mut self) -> u64 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl RandomSource for FixedSequence {
    fn range(&mut self, lo: i32, hi: i32) -> i32 {
        let value = self.next_value();
        if hi <= lo {
            return lo;
        }
        let span = u64::from(hi.abs_diff(lo));
        lo + (value % span) as i32
    }

    fn chance(&mut self, probability: f64) -> bool {
        let value = self.next_value() % 100;
        (value as f64) < probability.clamp(0.0, 1.0) * 100.0
    }

    fn next_u64(&mut self) -> u64 {
        self.next_value()
    }
}
