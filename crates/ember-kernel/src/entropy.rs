//! Per-block stake entropy.

use ember_chain::{sha256d, Uint256};

/// The stake entropy bit of a block: the low bit of the double-SHA-256 of
/// its block hash. Identical formula for proof-of-work and proof-of-stake
/// blocks; one such bit per selected block contributes to a stake modifier.
pub fn entropy_bit(block_hash: &Uint256) -> u8 {
    Uint256::from_le_bytes(sha256d(block_hash.as_bytes())).low_bit()
}
