//! Baseline Client Use Case
//!
//! Brute-forces the erased leading bits of every subpuzzle until the
//! candidate hashes to the published image.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use platform::crypto::{DIGEST_LEN, Digest256, HashService};

use crate::application::config::SolverConfig;
use crate::application::elapsed_us;
use crate::application::workers::solve_in_order;
use crate::domain::entities::{Challenge, Solution, SubPuzzle, SubSolution};
use crate::domain::services::{
    clear_leading_bits, compare_digests, mask_for_iteration, overlay_mask,
};
use crate::domain::value_objects::Difficulty;
use crate::error::{PuzzleError, PuzzleResult};

/// Baseline puzzle client
pub struct BaselineClient<H>
where
    H: HashService,
{
    hasher: Arc<H>,
    config: Arc<SolverConfig>,
}

impl<H> BaselineClient<H>
where
    H: HashService,
{
    pub fn new(hasher: Arc<H>, config: Arc<SolverConfig>) -> Self {
        Self { hasher, config }
    }

    /// Recover the original preimage of every subpuzzle, in order.
    ///
    /// At most `2^m` hashes per subpuzzle. Exhausting that space means the
    /// challenge was not produced by a matching server.
    pub fn solve(&self, challenge: &Challenge) -> PuzzleResult<Solution> {
        let difficulty = Difficulty::new(challenge.difficulty_bits)?;
        if !challenge.is_complete() {
            return Err(PuzzleError::invalid_input(format!(
                "challenge announces {} subpuzzles but holds {}",
                challenge.num_subpuzzles,
                challenge.subpuzzles().len()
            )));
        }

        let started = Instant::now();
        let subpuzzles = challenge.subpuzzles();
        let workers = self.config.workers_for(subpuzzles.len());

        let found = solve_in_order(subpuzzles.len(), workers, |index| {
            self.solve_subpuzzle(index, &subpuzzles[index], difficulty)
        })?;

        let trials: u64 = found.iter().map(|(_, trials)| trials).sum();
        tracing::info!(
            subpuzzles = subpuzzles.len(),
            difficulty = difficulty.bits(),
            workers,
            trials,
            elapsed_us = elapsed_us(started),
            "Solved baseline challenge"
        );

        Ok(Solution::from_subsolutions(
            challenge.timestamp,
            found.into_iter().map(|(preimage, _)| SubSolution::new(preimage)),
        ))
    }

    fn solve_subpuzzle(
        &self,
        index: usize,
        subpuzzle: &SubPuzzle,
        difficulty: Difficulty,
    ) -> PuzzleResult<(Digest256, u64)> {
        let mut erased = subpuzzle.preimage;
        clear_leading_bits(&mut erased, difficulty.bits())?;

        for itr in 0..difficulty.search_space() {
            let mut candidate = erased;
            overlay_mask(&mut candidate, &mask_for_iteration(itr, difficulty.bits())?);

            let digest = self.hasher.digest(&candidate);
            if compare_digests(&digest, &subpuzzle.image, DIGEST_LEN) == Ordering::Equal {
                let trials = u64::from(itr) + 1;
                tracing::debug!(index, trials, "Subpuzzle solved");
                return Ok((candidate, trials));
            }
        }

        Err(PuzzleError::SolutionNotFound {
            index,
            attempts: u64::from(difficulty.search_space()),
        })
    }
}
