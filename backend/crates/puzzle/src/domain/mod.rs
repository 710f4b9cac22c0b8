//! Domain Layer - Puzzle model and bit-level logic
//!
//! This layer contains:
//! - Domain entities (Challenge, Solution and their optimized forms)
//! - Domain value objects (Difficulty, PuzzleLength)
//! - Domain services (masking, comparison, hash derivations)

pub mod entities;
pub mod services;
pub mod value_objects;
