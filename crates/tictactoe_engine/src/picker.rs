//! Candidate selection for the computer opponent.
//!
//! The computer's policy is uniform over the open cells. The engine only asks
//! a picker for an index into the ascending list of empty cells, so tests can
//! swap in a fixed or seeded source and get reproducible games.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Chooses one of `candidates` open cells.
pub trait CandidatePicker {
    /// Returns an index in `0..candidates`. Never called with zero.
    fn pick(&mut self, candidates: usize) -> usize;
}

/// Uniform random choice backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct UniformPicker<R = ChaCha8Rng> {
    rng: R,
}

impl UniformPicker<ChaCha8Rng> {
    /// Seeded picker; the same seed yields the same sequence on every platform.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Picker seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> UniformPicker<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CandidatePicker for UniformPicker<R> {
    fn pick(&mut self, candidates: usize) -> usize {
        let index = self.rng.gen_range(0..candidates);
        trace!(candidates, index, "Uniform pick");
        index
    }
}

/// Always picks the same index, clamped to the last candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedPicker(pub usize);

impl CandidatePicker for FixedPicker {
    fn pick(&mut self, candidates: usize) -> usize {
        self.0.min(candidates.saturating_sub(1))
    }
}
