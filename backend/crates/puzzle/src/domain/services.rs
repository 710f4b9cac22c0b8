//! Domain Services
//!
//! Bit-level helpers that encode puzzle difficulty, and the hash
//! derivations shared by the servers and clients. Bit order is big-endian:
//! bit 0 of byte 0 is the most significant bit.

use std::cmp::Ordering;

use platform::crypto::{Digest256, HashBuilder, HashService, HashState};

use crate::domain::value_objects::Difficulty;
use crate::error::{PuzzleError, PuzzleResult};

/// Candidate bits for the leading `diff` bits of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleMask {
    bytes: [u8; 2],
    len: usize,
}

impl PuzzleMask {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Build the mask for iteration `itr`: its low `diff` bits moved to the top
/// of a 1-byte (`diff <= 8`) or 2-byte mask.
pub fn mask_for_iteration(itr: u32, diff: u16) -> PuzzleResult<PuzzleMask> {
    let diff = Difficulty::new(diff)?.bits();

    if diff <= 8 {
        let aligned = itr << (8 - diff);
        Ok(PuzzleMask {
            bytes: [(aligned & 0xFF) as u8, 0],
            len: 1,
        })
    } else {
        let aligned = itr << (16 - diff);
        Ok(PuzzleMask {
            bytes: [((aligned >> 8) & 0xFF) as u8, (aligned & 0xFF) as u8],
            len: 2,
        })
    }
}

/// Zero the leading `diff` bits of `buf` in place
pub fn clear_leading_bits(buf: &mut [u8], diff: u16) -> PuzzleResult<()> {
    let diff = Difficulty::new(diff)?.bits();
    let needed = usize::from(diff).div_ceil(8);
    if buf.len() < needed {
        return Err(PuzzleError::invalid_length(format!(
            "cannot clear {diff} bits of a {}-byte buffer",
            buf.len()
        )));
    }

    if diff == 0 {
        return Ok(());
    }
    if diff <= 8 {
        buf[0] &= low_bits(8 - diff);
    } else {
        buf[0] = 0;
        buf[1] &= low_bits(16 - diff);
    }
    Ok(())
}

/// OR the mask into the start of `buf`
pub fn overlay_mask(buf: &mut [u8], mask: &PuzzleMask) {
    for (byte, bits) in buf.iter_mut().zip(mask.as_bytes()) {
        *byte |= bits;
    }
}

/// Lexicographic comparison of the first `n` bytes of two digests
pub fn compare_digests(a: &[u8], b: &[u8], n: usize) -> Ordering {
    a.iter().take(n).cmp(b.iter().take(n))
}

/// Whether the first `nbits` bits of `x` and `y` are identical.
///
/// Requests for more bits than either buffer holds are never equal.
pub fn compare_leading_bits(x: &[u8], y: &[u8], nbits: usize) -> bool {
    if nbits == 0 {
        return true;
    }
    if nbits > 8 * x.len() || nbits > 8 * y.len() {
        return false;
    }

    let whole = nbits / 8;
    if x[..whole] != y[..whole] {
        return false;
    }

    let rem = nbits % 8;
    if rem == 0 {
        return true;
    }
    let shift = 8 - rem;
    (x[whole] >> shift) == (y[whole] >> shift)
}

/// A byte with only its low `count` bits set
fn low_bits(count: u16) -> u8 {
    0xFFu8.checked_shr(8 - u32::from(count)).unwrap_or(0)
}

// ============================================================================
// Hash derivations
// ============================================================================

/// `key ∥ data ∥ timestamp`, absorbed once and forked per subpuzzle
pub fn keyed_prefix<H: HashService + ?Sized>(
    hasher: &H,
    key: &[u8],
    data: &[u8],
    timestamp: u32,
) -> HashBuilder<H::State> {
    hasher
        .builder()
        .segment(key)
        .segment(data)
        .segment(timestamp.to_le_bytes())
}

/// Original preimage of baseline subpuzzle `index`:
/// `H(key ∥ data ∥ timestamp ∥ index)`, index as a little-endian `u32`
pub fn baseline_preimage<S: HashState>(prefix: &HashBuilder<S>, index: u8) -> Digest256 {
    prefix
        .clone()
        .segment(u32::from(index).to_le_bytes())
        .finish()
}

/// Self-consistency condition of the optimized scheme: the leading `m` bits
/// of `H(x ∥ i ∥ z_i)` equal the leading `m` bits of `x ∥ i ∥ z_i`
pub fn is_self_consistent(digest: &Digest256, candidate: &[u8], m: u16) -> bool {
    compare_leading_bits(digest, candidate, usize::from(m))
}
