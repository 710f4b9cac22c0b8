//! Baseline Server Use Case
//!
//! Issues one hash-preimage subpuzzle per index and verifies solutions by
//! recomputation from the server key, never from stored challenge state.

use std::sync::Arc;
use std::time::Instant;

use platform::crypto::{HashService, constant_time_eq};
use rand::Rng;

use crate::application::config::{BitErasure, GeneratorConfig};
use crate::application::elapsed_us;
use crate::domain::entities::{Challenge, Solution, SubPuzzle};
use crate::domain::services::{
    baseline_preimage, clear_leading_bits, keyed_prefix, mask_for_iteration, overlay_mask,
};
use crate::domain::value_objects::Difficulty;
use crate::error::{PuzzleError, PuzzleResult};

/// Baseline puzzle server
pub struct BaselineServer<H>
where
    H: HashService,
{
    hasher: Arc<H>,
    config: Arc<GeneratorConfig>,
}

impl<H> BaselineServer<H>
where
    H: HashService,
{
    pub fn new(hasher: Arc<H>, config: Arc<GeneratorConfig>) -> Self {
        Self { hasher, config }
    }

    /// Generate `k` subpuzzles of `m` difficulty bits.
    ///
    /// Subpuzzle `i` has `x = H(key ∥ data ∥ timestamp ∥ i)`, image `H(x)`
    /// and preimage `x` with its leading `m` bits erased.
    pub fn generate(
        &self,
        data: &[u8],
        key: &[u8],
        timestamp: u32,
        k: u8,
        m: u16,
    ) -> PuzzleResult<Challenge> {
        if data.is_empty() || key.is_empty() {
            return Err(PuzzleError::invalid_input("empty data or key"));
        }
        if k == 0 {
            return Err(PuzzleError::invalid_input("a challenge needs at least one subpuzzle"));
        }
        let difficulty = Difficulty::new(m)?;

        let started = Instant::now();
        let prefix = keyed_prefix(self.hasher.as_ref(), key, data, timestamp);
        let mut challenge = Challenge::new(timestamp, k, difficulty.bits());

        for i in 0..k {
            let x = baseline_preimage(&prefix, i);
            let image = self.hasher.digest(&x);

            let mut preimage = x;
            self.erase(&mut preimage, difficulty)?;
            challenge.push(SubPuzzle::new(preimage, image))?;
        }

        tracing::info!(
            subpuzzles = k,
            difficulty = m,
            timestamp,
            elapsed_us = elapsed_us(started),
            "Generated baseline challenge"
        );
        Ok(challenge)
    }

    /// Check every subsolution against the recomputed preimage at its
    /// position. Stops hashing at the first mismatch.
    pub fn verify(&self, solution: &Solution, data: &[u8], key: &[u8], k: u8) -> bool {
        if data.is_empty() || key.is_empty() || k == 0 {
            tracing::debug!("Baseline verification rejected: empty data, key or k");
            return false;
        }
        if solution.len() != usize::from(k) {
            tracing::debug!(
                expected = k,
                received = solution.len(),
                "Baseline verification rejected: wrong subsolution count"
            );
            return false;
        }

        let started = Instant::now();
        let prefix = keyed_prefix(self.hasher.as_ref(), key, data, solution.timestamp);

        for (i, subsolution) in (0..k).zip(solution.subsolutions()) {
            let expected = baseline_preimage(&prefix, i);
            if !constant_time_eq(&expected, &subsolution.solution) {
                tracing::debug!(index = i, "Baseline verification failed");
                return false;
            }
        }

        tracing::info!(
            subpuzzles = k,
            elapsed_us = elapsed_us(started),
            "Baseline solution verified"
        );
        true
    }

    fn erase(&self, preimage: &mut [u8], difficulty: Difficulty) -> PuzzleResult<()> {
        clear_leading_bits(preimage, difficulty.bits())?;
        if self.config.erasure == BitErasure::Randomize {
            let noise = rand::rng().random_range(0..difficulty.search_space());
            overlay_mask(preimage, &mask_for_iteration(noise, difficulty.bits())?);
        }
        Ok(())
    }
}
