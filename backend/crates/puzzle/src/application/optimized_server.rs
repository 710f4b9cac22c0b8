//! Optimized Server Use Case
//!
//! One keyed hash per challenge regardless of the subpuzzle count; each
//! subpuzzle is a self-consistency search over `x ∥ i ∥ z_i`.

use std::sync::Arc;
use std::time::Instant;

use platform::crypto::{Digest256, HashService};

use crate::application::elapsed_us;
use crate::domain::entities::{OptChallenge, OptSolution};
use crate::domain::services::{is_self_consistent, keyed_prefix};
use crate::domain::value_objects::PuzzleLength;
use crate::error::{PuzzleError, PuzzleResult};

/// Optimized puzzle server
pub struct OptimizedServer<H>
where
    H: HashService,
{
    hasher: Arc<H>,
}

impl<H> OptimizedServer<H>
where
    H: HashService,
{
    pub fn new(hasher: Arc<H>) -> Self {
        Self { hasher }
    }

    /// Generate a challenge whose preimage `x` is the leading `l/2` bits of
    /// `H(key ∥ data ∥ timestamp)`.
    pub fn generate(
        &self,
        data: &[u8],
        key: &[u8],
        timestamp: u32,
        k: u16,
        m: u16,
        l: u32,
    ) -> PuzzleResult<OptChallenge> {
        if data.is_empty() || key.is_empty() {
            return Err(PuzzleError::invalid_input("empty data or key"));
        }
        if k == 0 {
            return Err(PuzzleError::invalid_input("a challenge needs at least one subpuzzle"));
        }
        let length = PuzzleLength::new(l)?;
        let m = length.difficulty(m)?;

        let started = Instant::now();
        let x = self.shared_preimage(data, key, timestamp, length);

        tracing::info!(
            subpuzzles = k,
            difficulty = m,
            len = length.bits(),
            timestamp,
            elapsed_us = elapsed_us(started),
            "Generated optimized challenge"
        );
        Ok(OptChallenge::new(x, timestamp, length.bits(), k, m))
    }

    /// Recompute `x` from the key and check every `z_i` at its position.
    /// Stops hashing at the first failing index.
    pub fn verify(
        &self,
        solution: &OptSolution,
        data: &[u8],
        key: &[u8],
        l: u32,
        k: u16,
        m: u16,
    ) -> bool {
        if data.is_empty() || key.is_empty() || k == 0 {
            tracing::debug!("Optimized verification rejected: empty data, key or k");
            return false;
        }
        let Ok(length) = PuzzleLength::new(l) else {
            tracing::debug!(len = l, "Optimized verification rejected: invalid length");
            return false;
        };
        if length.difficulty(m).is_err() {
            tracing::debug!(difficulty = m, "Optimized verification rejected: invalid difficulty");
            return false;
        }
        if solution.len() != usize::from(k) {
            tracing::debug!(
                expected = k,
                received = solution.len(),
                "Optimized verification rejected: wrong subsolution count"
            );
            return false;
        }

        let started = Instant::now();
        let x = self.shared_preimage(data, key, solution.timestamp, length);
        let mut candidate = Vec::with_capacity(length.candidate_bytes());

        for (i, subsolution) in (0..k).zip(solution.subsolutions()) {
            if subsolution.zi.len() != length.half_bytes() {
                tracing::debug!(index = i, "Optimized verification failed: z_i length");
                return false;
            }

            candidate.clear();
            candidate.extend_from_slice(&x);
            candidate.extend_from_slice(&i.to_le_bytes());
            candidate.extend_from_slice(&subsolution.zi);

            let digest: Digest256 = self.hasher.digest(&candidate);
            if !is_self_consistent(&digest, &candidate, m) {
                tracing::debug!(index = i, "Optimized verification failed");
                return false;
            }
        }

        tracing::info!(
            subpuzzles = k,
            elapsed_us = elapsed_us(started),
            "Optimized solution verified"
        );
        true
    }

    fn shared_preimage(
        &self,
        data: &[u8],
        key: &[u8],
        timestamp: u32,
        length: PuzzleLength,
    ) -> Vec<u8> {
        let h = keyed_prefix(self.hasher.as_ref(), key, data, timestamp).finish();
        h[..length.half_bytes()].to_vec()
    }
}
