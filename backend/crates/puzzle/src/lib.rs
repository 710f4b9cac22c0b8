//! Client Puzzle Module
//!
//! Juels–Brainard style client puzzles in two variants:
//! - baseline: one hash-preimage subpuzzle per index, each with its own
//!   published image
//! - optimized: one keyed hash shared by every index, each index needing its
//!   own self-consistency search
//!
//! Layout:
//! - `domain/` - Entities, value objects, bit-level services
//! - `application/` - Servers, clients, configuration
//!
//! ## Security Model
//! - Servers keep no per-challenge state; verification recomputes everything
//!   from the secret key, the data and the solution's timestamp
//! - A rejected solution is `false`, never an error

pub mod application;
pub mod domain;
pub mod error;

// Re-exports for convenience
pub use application::baseline_client::BaselineClient;
pub use application::baseline_server::BaselineServer;
pub use application::config::{BitErasure, GeneratorConfig, SolverConfig};
pub use application::optimized_client::OptimizedClient;
pub use application::optimized_server::OptimizedServer;
pub use application::protocol::{
    generate_baseline, generate_optimized, solve_baseline, solve_optimized, verify_baseline,
    verify_optimized,
};
pub use domain::entities::{
    Challenge, OptChallenge, OptSolution, OptSubSolution, Solution, SubPuzzle, SubSolution,
};
pub use error::{PuzzleError, PuzzleResult};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, ResultExt},
    kind::ErrorKind,
};
