//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - The hash service every puzzle computation goes through (SHA-256)
//! - An ordered-segment hash builder
//! - Random bytes, Base64 and constant-time comparison helpers
//! - Serde adapters for byte buffers

pub mod crypto;
pub mod encoding;

pub use crypto::{DIGEST_LEN, Digest256, HashBuilder, HashService, HashState, Sha256Hasher};
