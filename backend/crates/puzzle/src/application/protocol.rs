//! Protocol entry points
//!
//! SHA-256 with default configuration. Callers that need parallel solving,
//! a different search ceiling or randomized erasure build the servers and
//! clients directly.

use std::sync::Arc;

use platform::crypto::Sha256Hasher;

use crate::application::baseline_client::BaselineClient;
use crate::application::baseline_server::BaselineServer;
use crate::application::config::{GeneratorConfig, SolverConfig};
use crate::application::optimized_client::OptimizedClient;
use crate::application::optimized_server::OptimizedServer;
use crate::domain::entities::{Challenge, OptChallenge, OptSolution, Solution};
use crate::error::PuzzleResult;

fn baseline_server() -> BaselineServer<Sha256Hasher> {
    BaselineServer::new(Arc::new(Sha256Hasher), Arc::new(GeneratorConfig::default()))
}

fn optimized_server() -> OptimizedServer<Sha256Hasher> {
    OptimizedServer::new(Arc::new(Sha256Hasher))
}

pub fn generate_baseline(
    data: &[u8],
    key: &[u8],
    timestamp: u32,
    k: u8,
    m: u16,
) -> PuzzleResult<Challenge> {
    baseline_server().generate(data, key, timestamp, k, m)
}

pub fn solve_baseline(challenge: &Challenge) -> PuzzleResult<Solution> {
    BaselineClient::new(Arc::new(Sha256Hasher), Arc::new(SolverConfig::default())).solve(challenge)
}

pub fn verify_baseline(solution: &Solution, data: &[u8], key: &[u8], k: u8) -> bool {
    baseline_server().verify(solution, data, key, k)
}

pub fn generate_optimized(
    data: &[u8],
    key: &[u8],
    timestamp: u32,
    k: u16,
    m: u16,
    l: u32,
) -> PuzzleResult<OptChallenge> {
    optimized_server().generate(data, key, timestamp, k, m, l)
}

pub fn solve_optimized(challenge: &OptChallenge) -> PuzzleResult<OptSolution> {
    OptimizedClient::new(Arc::new(Sha256Hasher), Arc::new(SolverConfig::default()))
        .solve(challenge)
}

pub fn verify_optimized(
    solution: &OptSolution,
    data: &[u8],
    key: &[u8],
    l: u32,
    k: u16,
    m: u16,
) -> bool {
    optimized_server().verify(solution, data, key, l, k, m)
}
