//! Injectable random sources and the weighted sampler used for pickup kinds.

use std::ops::Range;

use rand_chacha::{ChaCha8Rng, rand_core::Rng};

/// Uniform 64-bit source threaded explicitly through the generation pipeline.
pub trait RandomSource {
    fn next_u64(&mut self) -> u64;

    /// Uniform index in `0..bound`. Returns 0 when `bound` is 0.
    fn below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        ((u128::from(self.next_u64()) * bound as u128) >> 64) as usize
    }

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1_u64 << 53) as f64)
    }

    /// Uniform float in `range`; an empty range yields its start.
    fn range(&mut self, range: Range<f64>) -> f64 {
        if range.is_empty() {
            return range.start;
        }
        let value = range.start + self.unit() * (range.end - range.start);
        value.min(range.end.next_down())
    }
}

impl RandomSource for ChaCha8Rng {
    fn next_u64(&mut self) -> u64 {
        Rng::next_u64(self)
    }
}

/// Replays a fixed, cycling sequence of raw draws.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: Vec<u64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<u64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Every draw returns `value`.
    pub fn constant(value: u64) -> Self {
        Self::new(vec![value])
    }

    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_u64(&mut self) -> u64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// Fisher-Yates permutation driven by `rng`.
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for upper in (1..items.len()).rev() {
        let pick = rng.below(upper + 1);
        items.swap(upper, pick);
    }
}

/// Discrete distribution over `T` backed by a cumulative weight table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedTable<T> {
    values: Vec<T>,
    cumulative: Vec<u64>,
}

impl<T> WeightedTable<T> {
    /// Zero-weight entries are dropped. `None` when no positive weight remains.
    pub fn new(entries: impl IntoIterator<Item = (T, u32)>) -> Option<Self> {
        let mut values = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0_u64;
        for (value, weight) in entries {
            if weight == 0 {
                continue;
            }
            total += u64::from(weight);
            values.push(value);
            cumulative.push(total);
        }
        if values.is_empty() {
            return None;
        }
        Some(Self { values, cumulative })
    }

    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    /// One draw against the cumulative table.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> &T {
        let roll = rng.below(self.total_weight() as usize) as u64;
        self.pick(roll)
    }

    /// Value whose cumulative bucket contains `roll`; rolls past the end land on the last value.
    pub fn pick(&self, roll: u64) -> &T {
        let slot = self.cumulative.partition_point(|&bound| bound <= roll);
        &self.values[slot.min(self.values.len() - 1)]
    }
}
