//! Optimized Client Use Case
//!
//! For every index `i` the client searches for a `z_i` such that the leading
//! `m` bits of `H(x ∥ i ∥ z_i)` match the leading `m` bits of `x ∥ i ∥ z_i`.
//! The counter is written big-endian into the tail of a zeroed `z_i`.

use std::sync::Arc;
use std::time::Instant;

use platform::crypto::HashService;

use crate::application::config::SolverConfig;
use crate::application::elapsed_us;
use crate::application::workers::solve_in_order;
use crate::domain::entities::{OptChallenge, OptSolution, OptSubSolution};
use crate::domain::services::is_self_consistent;
use crate::domain::value_objects::{OPT_INDEX_LEN, PuzzleLength};
use crate::error::{PuzzleError, PuzzleResult};

const COUNTER_LEN: usize = size_of::<u64>();

/// Optimized puzzle client
pub struct OptimizedClient<H>
where
    H: HashService,
{
    hasher: Arc<H>,
    config: Arc<SolverConfig>,
}

impl<H> OptimizedClient<H>
where
    H: HashService,
{
    pub fn new(hasher: Arc<H>, config: Arc<SolverConfig>) -> Self {
        Self { hasher, config }
    }

    pub fn solve(&self, challenge: &OptChallenge) -> PuzzleResult<OptSolution> {
        let length = PuzzleLength::new(u32::from(challenge.len))?;
        let m = length.difficulty(challenge.difficulty_bits)?;
        if challenge.num_subpuzzles == 0 {
            return Err(PuzzleError::invalid_input("challenge has no subpuzzles"));
        }
        if challenge.preimage.len() != length.half_bytes() {
            return Err(PuzzleError::invalid_length(format!(
                "preimage holds {} bytes, l = {} needs {}",
                challenge.preimage.len(),
                length.bits(),
                length.half_bytes()
            )));
        }

        let started = Instant::now();
        let count = usize::from(challenge.num_subpuzzles);
        let limit = self.search_limit(length);
        let workers = self.config.workers_for(count);

        let found = solve_in_order(count, workers, |index| {
            self.solve_subpuzzle(&challenge.preimage, index, length, m, limit)
        })?;

        let trials: u64 = found.iter().map(|(_, trials)| trials).sum();
        tracing::info!(
            subpuzzles = count,
            difficulty = m,
            len = length.bits(),
            workers,
            trials,
            elapsed_us = elapsed_us(started),
            "Solved optimized challenge"
        );

        Ok(OptSolution::from_subsolutions(
            challenge.timestamp,
            found.into_iter().map(|(zi, _)| OptSubSolution::new(zi)),
        ))
    }

    /// Candidates tried per subpuzzle: the configured ceiling, capped by
    /// how many distinct counters fit in `z_i`
    fn search_limit(&self, length: PuzzleLength) -> u64 {
        let width = length.half_bytes().min(COUNTER_LEN) as u32;
        let capacity = 1u64.checked_shl(8 * width).unwrap_or(u64::MAX);
        self.config.max_attempts.min(capacity)
    }

    fn solve_subpuzzle(
        &self,
        x: &[u8],
        index: usize,
        length: PuzzleLength,
        m: u16,
        limit: u64,
    ) -> PuzzleResult<(Vec<u8>, u64)> {
        // index < num_subpuzzles, which is a u16
        let i = index as u16;
        let prefix = self.hasher.builder().segment(x).segment(i.to_le_bytes());

        let mut candidate = Vec::with_capacity(length.candidate_bytes());
        candidate.extend_from_slice(x);
        candidate.extend_from_slice(&i.to_le_bytes());
        candidate.resize(length.candidate_bytes(), 0);

        let zi_start = x.len() + OPT_INDEX_LEN;
        let width = length.half_bytes().min(COUNTER_LEN);
        let counter_start = candidate.len() - width;

        for itr in 0..limit {
            candidate[counter_start..].copy_from_slice(&itr.to_be_bytes()[COUNTER_LEN - width..]);

            let digest = prefix.clone().segment(&candidate[zi_start..]).finish();
            if is_self_consistent(&digest, &candidate, m) {
                let trials = itr + 1;
                tracing::debug!(index, trials, "Subpuzzle solved");
                return Ok((candidate[zi_start..].to_vec(), trials));
            }
        }

        Err(PuzzleError::SolutionNotFound {
            index,
            attempts: limit,
        })
    }
}
