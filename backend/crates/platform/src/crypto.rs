//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Length in bytes of every digest produced by a [`HashService`]
pub const DIGEST_LEN: usize = 32;

/// A 256-bit digest
pub type Digest256 = [u8; DIGEST_LEN];

/// Incremental state of a running hash computation
pub trait HashState: Clone + Send {
    /// Feed the next segment of input
    fn absorb(&mut self, bytes: &[u8]);

    /// Consume the state and produce the digest
    fn finish(self) -> Digest256;
}

/// The hash primitive used by puzzle generation, solving and verification.
///
/// Any 256-bit cryptographic hash satisfies it. Implementations are
/// stateless; all per-computation state lives in [`HashService::State`].
pub trait HashService: Send + Sync {
    type State: HashState;

    /// Start a fresh computation
    fn start(&self) -> Self::State;

    /// Start a computation that accepts ordered byte segments
    fn builder(&self) -> HashBuilder<Self::State> {
        HashBuilder::new(self.start())
    }

    /// Hash a single buffer
    fn digest(&self, bytes: &[u8]) -> Digest256 {
        self.builder().segment(bytes).finish()
    }
}

/// SHA-256 backed [`HashService`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl HashService for Sha256Hasher {
    type State = Sha256;

    fn start(&self) -> Sha256 {
        Sha256::new()
    }
}

impl HashState for Sha256 {
    fn absorb(&mut self, bytes: &[u8]) {
        Digest::update(self, bytes);
    }

    fn finish(self) -> Digest256 {
        Digest::finalize(self).into()
    }
}

/// Hashes the concatenation `a ∥ b ∥ ...` of the segments it is given.
///
/// Cloning a builder forks the computation, so a shared prefix only has to
/// be absorbed once:
///
/// ```rust
/// use platform::crypto::{HashService, Sha256Hasher, sha256};
///
/// let prefix = Sha256Hasher.builder().segment(b"key").segment(b"data");
/// let first = prefix.clone().segment([0u8]).finish();
/// assert_eq!(first, sha256(b"keydata\0"));
/// ```
#[derive(Debug, Clone)]
pub struct HashBuilder<S> {
    state: S,
}

impl<S: HashState> HashBuilder<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    /// Append the next segment
    pub fn segment(mut self, bytes: impl AsRef<[u8]>) -> Self {
        self.state.absorb(bytes.as_ref());
        self
    }

    pub fn finish(self) -> Digest256 {
        self.state.finish()
    }
}

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Fixed-size variant of [`random_bytes`]
pub fn random_array<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> Digest256 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_values() {
        // SHA-256 of empty string
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);

        // SHA-256 of "hello"
        let hash = sha256(b"hello");
        let expected =
            hex::decode("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824")
                .unwrap();
        assert_eq!(hash.to_vec(), expected);
    }

    #[test]
    fn test_service_digest_matches_sha256() {
        assert_eq!(Sha256Hasher.digest(b"hello"), sha256(b"hello"));
        assert_eq!(Sha256Hasher.digest(b""), sha256(b""));
    }

    #[test]
    fn test_builder_hashes_concatenation() {
        let key = [7u8; 16];
        let data = b"some request data";
        let timestamp = 1u32.to_le_bytes();

        let built = Sha256Hasher
            .builder()
            .segment(key)
            .segment(data)
            .segment(timestamp)
            .finish();

        let mut concatenated = key.to_vec();
        concatenated.extend_from_slice(data);
        concatenated.extend_from_slice(&timestamp);
        assert_eq!(built, sha256(&concatenated));
    }

    #[test]
    fn test_builder_clone_forks_computation() {
        let prefix = Sha256Hasher.builder().segment(b"prefix-");
        let a = prefix.clone().segment(b"a").finish();
        let b = prefix.segment(b"b").finish();

        assert_eq!(a, sha256(b"prefix-a"));
        assert_eq!(b, sha256(b"prefix-b"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_segments_are_neutral() {
        let built = Sha256Hasher
            .builder()
            .segment(b"")
            .segment(b"hello")
            .segment(b"")
            .finish();
        assert_eq!(built, sha256(b"hello"));
    }

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
        assert!(random_bytes(0).is_empty());

        let a: [u8; 32] = random_array();
        let b: [u8; 32] = random_array();
        assert_ne!(a, b);
    }

    #[test]
    fn test_base64_roundtrip() {
        let data = b"hello world";
        let encoded = to_base64(data);
        let decoded = from_base64(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_constant_time_eq() {
        let a = [1u8, 2, 3, 4];
        let b = [1u8, 2, 3, 4];
        let c = [1u8, 2, 3, 5];
        assert!(constant_time_eq(&a, &b));
        assert!(!constant_time_eq(&a, &c));
        assert!(!constant_time_eq(&a, &a[..3]));
    }
}
