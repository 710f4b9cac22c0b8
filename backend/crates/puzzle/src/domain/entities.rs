//! Domain Entities
//!
//! Challenges and solutions of both schemes. Subpuzzles and subsolutions
//! live in ordered vectors: position `i` is the subpuzzle index, and
//! appending is the only mutation once an entity exists. Dropping an
//! entity releases every buffer it owns.

use platform::crypto::Digest256;
use platform::encoding::base64_bytes;
use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, PuzzleResult};

/// One baseline subpuzzle: `image = H(x)`, `preimage` is `x` with its
/// leading `m` bits erased
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubPuzzle {
    #[serde(with = "base64_bytes")]
    pub preimage: Digest256,
    #[serde(with = "base64_bytes")]
    pub image: Digest256,
}

impl SubPuzzle {
    pub fn new(preimage: Digest256, image: Digest256) -> Self {
        Self { preimage, image }
    }
}

/// Baseline challenge issued by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub timestamp: u32,
    pub num_subpuzzles: u8,
    pub difficulty_bits: u16,
    subpuzzles: Vec<SubPuzzle>,
}

impl Challenge {
    /// Create an empty challenge that will hold `num_subpuzzles` entries
    pub fn new(timestamp: u32, num_subpuzzles: u8, difficulty_bits: u16) -> Self {
        Self {
            timestamp,
            num_subpuzzles,
            difficulty_bits,
            subpuzzles: Vec::with_capacity(usize::from(num_subpuzzles)),
        }
    }

    /// Append the next subpuzzle, keeping insertion order
    pub fn push(&mut self, subpuzzle: SubPuzzle) -> PuzzleResult<()> {
        if self.is_complete() {
            return Err(PuzzleError::invalid_input(format!(
                "challenge already holds its {} subpuzzles",
                self.num_subpuzzles
            )));
        }
        self.subpuzzles.push(subpuzzle);
        Ok(())
    }

    pub fn subpuzzles(&self) -> &[SubPuzzle] {
        &self.subpuzzles
    }

    /// Whether the sequence length matches `num_subpuzzles`
    pub fn is_complete(&self) -> bool {
        self.subpuzzles.len() == usize::from(self.num_subpuzzles)
    }
}

/// Recovered original preimage of one baseline subpuzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSolution {
    #[serde(with = "base64_bytes")]
    pub solution: Digest256,
}

impl SubSolution {
    pub fn new(solution: Digest256) -> Self {
        Self { solution }
    }
}

/// Baseline solution returned by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub timestamp: u32,
    subsolutions: Vec<SubSolution>,
}

impl Solution {
    pub fn new(timestamp: u32) -> Self {
        Self {
            timestamp,
            subsolutions: Vec::new(),
        }
    }

    /// Build a solution from subsolutions already in subpuzzle order
    pub fn from_subsolutions(
        timestamp: u32,
        subsolutions: impl IntoIterator<Item = SubSolution>,
    ) -> Self {
        Self {
            timestamp,
            subsolutions: subsolutions.into_iter().collect(),
        }
    }

    /// Append the next subsolution, keeping insertion order
    pub fn push(&mut self, subsolution: SubSolution) {
        self.subsolutions.push(subsolution);
    }

    pub fn subsolutions(&self) -> &[SubSolution] {
        &self.subsolutions
    }

    pub fn len(&self) -> usize {
        self.subsolutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsolutions.is_empty()
    }
}

/// Optimized challenge: one shared `x` for every subpuzzle index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptChallenge {
    #[serde(with = "base64_bytes")]
    pub preimage: Vec<u8>,
    pub timestamp: u32,
    /// `l`, the bit length of `x ∥ z_i`
    pub len: u16,
    pub num_subpuzzles: u16,
    pub difficulty_bits: u16,
}

impl OptChallenge {
    pub fn new(
        preimage: Vec<u8>,
        timestamp: u32,
        len: u16,
        num_subpuzzles: u16,
        difficulty_bits: u16,
    ) -> Self {
        Self {
            preimage,
            timestamp,
            len,
            num_subpuzzles,
            difficulty_bits,
        }
    }
}

/// `z_i` for one optimized subpuzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptSubSolution {
    #[serde(with = "base64_bytes")]
    pub zi: Vec<u8>,
}

impl OptSubSolution {
    pub fn new(zi: Vec<u8>) -> Self {
        Self { zi }
    }
}

/// Optimized solution returned by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptSolution {
    pub timestamp: u32,
    subsolutions: Vec<OptSubSolution>,
}

impl OptSolution {
    pub fn new(timestamp: u32) -> Self {
        Self {
            timestamp,
            subsolutions: Vec::new(),
        }
    }

    /// Build a solution from subsolutions already in index order
    pub fn from_subsolutions(
        timestamp: u32,
        subsolutions: impl IntoIterator<Item = OptSubSolution>,
    ) -> Self {
        Self {
            timestamp,
            subsolutions: subsolutions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, subsolution: OptSubSolution) {
        self.subsolutions.push(subsolution);
    }

    pub fn subsolutions(&self) -> &[OptSubSolution] {
        &self.subsolutions
    }

    pub fn len(&self) -> usize {
        self.subsolutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsolutions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subpuzzle(tag: u8) -> SubPuzzle {
        SubPuzzle::new([tag; 32], [tag.wrapping_add(1); 32])
    }

    #[test]
    fn test_challenge_push_preserves_order() {
        let mut challenge = Challenge::new(7, 3, 4);
        for tag in [10, 20, 30] {
            challenge.push(subpuzzle(tag)).unwrap();
        }

        let tags: Vec<u8> = challenge
            .subpuzzles()
            .iter()
            .map(|s| s.preimage[0])
            .collect();
        assert_eq!(tags, vec![10, 20, 30]);
        assert!(challenge.is_complete());
    }

    #[test]
    fn test_challenge_rejects_extra_subpuzzle() {
        let mut challenge = Challenge::new(7, 1, 4);
        challenge.push(subpuzzle(1)).unwrap();
        assert!(matches!(
            challenge.push(subpuzzle(2)),
            Err(PuzzleError::InvalidInput(_))
        ));
        assert_eq!(challenge.subpuzzles().len(), 1);
    }

    #[test]
    fn test_partial_challenge_is_incomplete() {
        let mut challenge = Challenge::new(7, 2, 4);
        assert!(!challenge.is_complete());
        challenge.push(subpuzzle(1)).unwrap();
        assert!(!challenge.is_complete());
    }

    #[test]
    fn test_solution_push_preserves_order() {
        let mut solution = Solution::new(9);
        assert!(solution.is_empty());
        solution.push(SubSolution::new([1; 32]));
        solution.push(SubSolution::new([2; 32]));

        assert_eq!(solution.len(), 2);
        assert_eq!(solution.subsolutions()[0].solution, [1; 32]);
        assert_eq!(solution.subsolutions()[1].solution, [2; 32]);
    }

    #[test]
    fn test_opt_solution_from_subsolutions() {
        let solution = OptSolution::from_subsolutions(
            3,
            vec![OptSubSolution::new(vec![0, 1]), OptSubSolution::new(vec![0, 2])],
        );
        assert_eq!(solution.timestamp, 3);
        assert_eq!(solution.len(), 2);
        assert_eq!(solution.subsolutions()[1].zi, vec![0, 2]);
    }

    #[test]
    fn test_challenge_serialization() {
        let mut challenge = Challenge::new(1, 1, 4);
        challenge.push(subpuzzle(0)).unwrap();

        let json = serde_json::to_string(&challenge).unwrap();
        assert!(json.contains("numSubpuzzles"));
        assert!(json.contains("difficultyBits"));
        assert!(json.contains("preimage"));

        let decoded: Challenge = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, challenge);
    }

    #[test]
    fn test_opt_challenge_serialization() {
        let challenge = OptChallenge::new(vec![0xAB; 4], 1, 64, 2, 8);
        let json = serde_json::to_string(&challenge).unwrap();
        assert!(json.contains(r#""preimage":"q6urqw==""#));
        assert!(json.contains(r#""len":64"#));
    }
}
