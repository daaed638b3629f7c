use rand::prelude::*;

use crate::Symbol;

/// Source of randomness for layout shuffling and content category selection.
pub trait Entropy {
    /// Pick an index in `0..len`, `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    fn shuffle(&mut self, symbols: &mut [Symbol]);
}

/// Entropy backed by a seeded small RNG, same seed means same layouts.
#[derive(Clone, Debug)]
pub struct SeededEntropy {
    rng: SmallRng,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Entropy for SeededEntropy {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    fn shuffle(&mut self, symbols: &mut [Symbol]) {
        symbols.shuffle(&mut self.rng);
    }
}

/// Entropy that never reorders and always picks the first candidate, for exact layouts in tests and replays.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FixedEntropy;

impl Entropy for FixedEntropy {
    fn pick(&mut self, _len: usize) -> usize {
        0
    }

    fn shuffle(&mut self, _symbols: &mut [Symbol]) {}
}
