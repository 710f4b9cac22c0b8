//! Domain Value Objects
//!
//! Immutable, validated parameters of the two puzzle schemes.

use platform::crypto::DIGEST_LEN;

use crate::error::{PuzzleError, PuzzleResult};

/// Byte width of the subpuzzle index in the optimized scheme
pub const OPT_INDEX_LEN: usize = size_of::<u16>();

/// Difficulty of a baseline subpuzzle: the number of erased leading bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty(u16);

impl Difficulty {
    pub const MAX: u16 = 16; // widest mask the brute-force helpers build

    pub fn new(bits: u16) -> PuzzleResult<Self> {
        if bits <= Self::MAX {
            Ok(Self(bits))
        } else {
            Err(PuzzleError::InvalidDifficulty {
                bits,
                max: Self::MAX,
            })
        }
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Size of the search space, `2^m`
    pub fn search_space(&self) -> u32 {
        1u32 << self.0
    }
}

impl From<Difficulty> for u16 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

/// Length `l` of `x ∥ z_i` in bits, for the optimized scheme.
///
/// `x` and every `z_i` carry `l/2` bits each, so `l` must be a multiple of 16,
/// and `x` is cut from a single digest so `l/2` cannot exceed 256.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleLength(u16);

impl PuzzleLength {
    pub const MIN: u32 = 16;
    pub const MAX: u32 = 2 * 8 * DIGEST_LEN as u32;

    pub fn new(bits: u32) -> PuzzleResult<Self> {
        if bits % 16 != 0 {
            return Err(PuzzleError::invalid_length(format!(
                "l = {bits} bits is not a multiple of 16, so l/2 is not byte-aligned"
            )));
        }
        if !(Self::MIN..=Self::MAX).contains(&bits) {
            return Err(PuzzleError::invalid_length(format!(
                "l = {bits} bits is outside {}..={}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(bits as u16))
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Byte length of `x`, and of every `z_i`
    pub fn half_bytes(&self) -> usize {
        usize::from(self.0) / 16
    }

    /// Byte length of the candidate buffer `x ∥ i ∥ z_i`
    pub fn candidate_bytes(&self) -> usize {
        2 * self.half_bytes() + OPT_INDEX_LEN
    }

    /// Largest difficulty the self-consistency check can compare.
    ///
    /// The leading bits are taken from both the digest and the candidate
    /// buffer, so the shorter of the two bounds it.
    pub fn max_difficulty(&self) -> u16 {
        (8 * self.candidate_bytes().min(DIGEST_LEN)) as u16
    }

    /// Validate an optimized-scheme difficulty against this length
    pub fn difficulty(&self, bits: u16) -> PuzzleResult<u16> {
        let max = self.max_difficulty();
        if bits <= max {
            Ok(bits)
        } else {
            Err(PuzzleError::InvalidDifficulty { bits, max })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_validation() {
        assert!(Difficulty::new(0).is_ok());
        assert!(Difficulty::new(8).is_ok());
        assert!(Difficulty::new(16).is_ok());
        assert_eq!(
            Difficulty::new(17),
            Err(PuzzleError::InvalidDifficulty { bits: 17, max: 16 })
        );
    }

    #[test]
    fn test_difficulty_search_space() {
        assert_eq!(Difficulty::new(0).unwrap().search_space(), 1);
        assert_eq!(Difficulty::new(4).unwrap().search_space(), 16);
        assert_eq!(Difficulty::new(16).unwrap().search_space(), 65536);
    }

    #[test]
    fn test_length_must_be_multiple_of_16() {
        assert!(PuzzleLength::new(64).is_ok());
        assert!(matches!(
            PuzzleLength::new(72),
            Err(PuzzleError::InvalidLength(_))
        ));
        assert!(matches!(
            PuzzleLength::new(8),
            Err(PuzzleError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_length_bounds() {
        assert!(PuzzleLength::new(16).is_ok());
        assert!(PuzzleLength::new(512).is_ok());
        assert!(PuzzleLength::new(0).is_err());
        assert!(PuzzleLength::new(528).is_err());
    }

    #[test]
    fn test_length_derived_sizes() {
        let length = PuzzleLength::new(64).unwrap();
        assert_eq!(length.bits(), 64);
        assert_eq!(length.half_bytes(), 4);
        assert_eq!(length.candidate_bytes(), 10);
        assert_eq!(length.max_difficulty(), 80);

        let widest = PuzzleLength::new(512).unwrap();
        assert_eq!(widest.half_bytes(), 32);
        assert_eq!(widest.max_difficulty(), 256);
    }

    #[test]
    fn test_length_difficulty_validation() {
        let length = PuzzleLength::new(16).unwrap();
        assert_eq!(length.difficulty(32), Ok(32));
        assert_eq!(
            length.difficulty(33),
            Err(PuzzleError::InvalidDifficulty { bits: 33, max: 32 })
        );
    }
}
