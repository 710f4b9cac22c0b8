//! Error conversions - From implementations for foreign error types
//!
//! Provides automatic conversion to [`AppError`] for the decoding errors
//! callers hit while reading puzzle inputs.

#[cfg(feature = "hex")]
use super::app_error::AppError;

// ============================================================================
// hex conversions
// ============================================================================

#[cfg(feature = "hex")]
impl From<hex::FromHexError> for AppError {
    fn from(err: hex::FromHexError) -> Self {
        AppError::invalid_input(format!("Invalid hex string: {}", err))
            .with_hint("pass an even number of hex digits, e.g. --key 00ff10")
            .with_source(err)
    }
}
