//! Application Configuration
//!
//! Configuration for puzzle generation and solving.

use std::env;

/// Default per-subpuzzle attempt ceiling of the optimized solver
pub const DEFAULT_MAX_ATTEMPTS: u64 = 1 << 32;

/// How the generator overwrites the leading bits the client must recover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitErasure {
    /// Zero the erased bits
    #[default]
    Zero,
    /// Replace the erased bits with fresh random bits
    Randomize,
}

/// Puzzle generator configuration
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    pub erasure: BitErasure,
}

impl GeneratorConfig {
    pub fn randomized() -> Self {
        Self {
            erasure: BitErasure::Randomize,
        }
    }
}

/// Puzzle solver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Attempts per optimized subpuzzle before giving up
    pub max_attempts: u64,
    /// Worker threads sharing the subpuzzles of one challenge
    pub jobs: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            jobs: 1,
        }
    }
}

impl SolverConfig {
    pub fn single_threaded() -> Self {
        Self::default()
    }

    /// One worker per available CPU
    pub fn parallel() -> Self {
        Self {
            jobs: num_cpus::get(),
            ..Self::default()
        }
    }

    /// Read `PUZZLE_MAX_ATTEMPTS` and `PUZZLE_JOBS`, keeping defaults for
    /// unset or unparsable values
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: read_setting(&lookup, "PUZZLE_MAX_ATTEMPTS")
                .unwrap_or(defaults.max_attempts),
            jobs: read_setting(&lookup, "PUZZLE_JOBS").unwrap_or(defaults.jobs),
        }
    }

    /// Worker count actually used for `tasks` subpuzzles
    pub fn workers_for(&self, tasks: usize) -> usize {
        self.jobs.clamp(1, tasks.max(1))
    }
}

fn read_setting<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "Ignoring unparsable setting");
            None
        }
    }
}
