//! Block headers and proof-of-stake metadata.

use crate::Uint256;

/// Header flag bits.
///
/// These mirror what the node persists per indexed block. `STAKE_MODIFIER`
/// marks a block that generated (rather than inherited) its stake modifier.
pub mod flags {
    /// Block is proof of stake.
    pub const PROOF_OF_STAKE: u32 = 1 << 0;
    /// Stake entropy bit is set.
    pub const STAKE_ENTROPY: u32 = 1 << 1;
    /// This block generated a fresh stake modifier.
    pub const STAKE_MODIFIER: u32 = 1 << 2;
}

/// An indexed block header.
///
/// Immutable once connected to the chain; the stake-modifier fields are
/// written exactly once, when the block becomes the tip.
///
/// Both modifier representations are carried: `stake_modifier` (64-bit, v1)
/// and `stake_modifier_v2` (256-bit hash chain). Exactly one is meaningful
/// at a given height; `ChainParams::is_modifier_v2` is the sole selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    /// Hash of this block.
    pub hash: Uint256,
    /// Height in the active chain.
    pub height: u32,
    /// Hash of the previous block; zero for genesis.
    pub prev_hash: Uint256,
    /// Block timestamp in seconds.
    pub time: u32,
    /// Compact difficulty target.
    pub bits: u32,
    /// Flag bits (`flags` module).
    pub flags: u32,
    /// 64-bit stake modifier (v1 era).
    pub stake_modifier: u64,
    /// 256-bit chained stake modifier (v2 era).
    pub stake_modifier_v2: Uint256,
    /// Kernel proof hash of the coinstake, zero for proof-of-work blocks.
    pub proof_of_stake_hash: Uint256,
    /// Running 32-bit stake modifier checksum.
    pub modifier_checksum: u32,
}

impl BlockHeader {
    pub fn is_proof_of_stake(&self) -> bool {
        self.flags & flags::PROOF_OF_STAKE != 0
    }

    /// Whether this block generated a fresh stake modifier.
    pub fn generated_stake_modifier(&self) -> bool {
        self.flags & flags::STAKE_MODIFIER != 0
    }

    /// The recorded stake entropy bit, as 0 or 1.
    pub fn stake_entropy_bit(&self) -> u8 {
        u8::from(self.flags & flags::STAKE_ENTROPY != 0)
    }

    /// Record the v1 modifier and whether this block generated it.
    pub fn set_stake_modifier(&mut self, modifier: u64, generated: bool) {
        self.stake_modifier = modifier;
        if generated {
            self.flags |= flags::STAKE_MODIFIER;
        }
    }

    pub fn set_stake_modifier_v2(&mut self, modifier: Uint256) {
        self.stake_modifier_v2 = modifier;
    }

    pub fn set_stake_entropy_bit(&mut self, bit: u8) {
        if bit != 0 {
            self.flags |= flags::STAKE_ENTROPY;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> BlockHeader {
        BlockHeader {
            hash: Uint256::ZERO,
            height: 0,
            prev_hash: Uint256::ZERO,
            time: 0,
            bits: 0x1d00ffff,
            flags: 0,
            stake_modifier: 0,
            stake_modifier_v2: Uint256::ZERO,
            proof_of_stake_hash: Uint256::ZERO,
            modifier_checksum: 0,
        }
    }

    #[test]
    fn flag_accessors() {
        let mut h = header();
        assert!(!h.is_proof_of_stake());
        assert!(!h.generated_stake_modifier());
        assert_eq!(h.stake_entropy_bit(), 0);

        h.flags |= flags::PROOF_OF_STAKE;
        assert!(h.is_proof_of_stake());

        h.set_stake_entropy_bit(1);
        assert_eq!(h.stake_entropy_bit(), 1);
    }

    #[test]
    fn set_stake_modifier_marks_generation() {
        let mut h = header();
        h.set_stake_modifier(42, false);
        assert_eq!(h.stake_modifier, 42);
        assert!(!h.generated_stake_modifier());

        h.set_stake_modifier(43, true);
        assert!(h.generated_stake_modifier());
    }
}
