//! Shared Kernel - Crate-crossing minimal core
//!
//! This crate contains the "smallest core" of the puzzle vocabulary:
//! - Common error classification and result aliases
//! - Conversions from the foreign error types the workspace touches
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across every crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}

pub use error::app_error::{AppError, AppResult, ResultExt};
pub use error::kind::ErrorKind;
