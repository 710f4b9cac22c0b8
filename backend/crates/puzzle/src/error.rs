//! Puzzle Error Types
//!
//! This module provides puzzle-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Verification never produces one of these: a rejected solution is a
//! plain `false`.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Puzzle-specific result type alias
pub type PuzzleResult<T> = Result<T, PuzzleError>;

/// Puzzle-specific error variants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// Empty data or key, or a malformed challenge
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Difficulty outside the range supported by the scheme
    #[error("Invalid difficulty: {bits} bits (supported: 0..={max})")]
    InvalidDifficulty { bits: u16, max: u16 },

    /// `l` not byte-aligned at `l/2`, out of range, or a buffer too short
    #[error("Invalid length: {0}")]
    InvalidLength(String),

    /// Search space exhausted without a match
    #[error("No solution found for subpuzzle {index} after {attempts} attempts")]
    SolutionNotFound { index: usize, attempts: u64 },
}

impl PuzzleError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        PuzzleError::InvalidInput(message.into())
    }

    pub(crate) fn invalid_length(message: impl Into<String>) -> Self {
        PuzzleError::InvalidLength(message.into())
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PuzzleError::InvalidInput(_) => ErrorKind::InvalidInput,
            PuzzleError::InvalidDifficulty { .. } => ErrorKind::InvalidDifficulty,
            PuzzleError::InvalidLength(_) => ErrorKind::InvalidLength,
            PuzzleError::SolutionNotFound { .. } => ErrorKind::SolutionNotFound,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            PuzzleError::SolutionNotFound { index, attempts } => {
                tracing::error!(
                    index = *index,
                    attempts = *attempts,
                    "Puzzle search exhausted"
                );
            }
            PuzzleError::InvalidDifficulty { bits, max } => {
                tracing::warn!(bits = *bits, max = *max, "Puzzle difficulty rejected");
            }
            _ => {
                tracing::warn!(error = %self, "Puzzle input rejected");
            }
        }
    }
}

impl From<PuzzleError> for AppError {
    fn from(err: PuzzleError) -> Self {
        let message = err.to_string();
        match err {
            PuzzleError::InvalidInput(_) => AppError::invalid_input(message),
            PuzzleError::InvalidDifficulty { max, .. } => AppError::invalid_difficulty(message)
                .with_hint(format!("use a difficulty between 0 and {max} bits")),
            PuzzleError::InvalidLength(_) => AppError::invalid_length(message)
                .with_hint("l must be a multiple of 16 between 16 and 512"),
            PuzzleError::SolutionNotFound { .. } => AppError::solution_not_found(message),
        }
    }
}
