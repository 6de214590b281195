//! Property-based tests for the consensus rules.
//!
//! These verify invariants over randomly generated inputs with shrinking
//! support: determinism of modifier generation, monotonicity of the
//! weighted target and stability of the compact encoding.

use crate::generators::*;
use ember_chain::{ChainView, Uint256};
use ember_kernel::{
    compact_to_target, compute_next_modifier, entropy_bit, meets_target, modifier_checksum,
    target_to_compact, weighted_target,
};
use proptest::prelude::*;

/// Arbitrary 32-byte values (hashes, kernel proofs).
fn arb_hash() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

/// Compact bits with a plausible size byte and non-zero mantissa.
fn arb_bits() -> impl Strategy<Value = u32> {
    (4u32..=32, 1u32..=0x007f_ffff).prop_map(|(size, mantissa)| (size << 24) | mantissa)
}

/// Stake values from dust to whole-supply scale.
fn arb_value() -> impl Strategy<Value = i64> {
    1i64..=21_000_000 * 100_000_000
}

/// Chain shapes for modifier determinism: block count, spacing, stake
/// threshold.
fn arb_chain_shape() -> impl Strategy<Value = (u32, u32, u32)> {
    (2u32..=40, 10u32..=120, 0u32..=40)
}

proptest! {
    /// Rebuilding a chain from the same shape reproduces every modifier,
    /// generation flag and checksum byte for byte.
    #[test]
    fn modifier_generation_is_deterministic((blocks, spacing, pos_from) in arb_chain_shape()) {
        let params = v1_fixture_params();
        let times = spaced_times(blocks, spacing);
        let first = build_chain(&params, &times, 7_000, pos_from);
        let second = build_chain(&params, &times, 7_000, pos_from);

        for height in 0..blocks {
            let a = first.header_at(height).unwrap();
            let b = second.header_at(height).unwrap();
            prop_assert_eq!(a.stake_modifier, b.stake_modifier);
            prop_assert_eq!(a.flags, b.flags);
            prop_assert_eq!(a.modifier_checksum, b.modifier_checksum);
        }
    }

    /// A block that does not generate inherits its parent's modifier
    /// unchanged, and recomputation against a stored prev matches what the
    /// chain recorded.
    #[test]
    fn interval_stability((blocks, spacing, pos_from) in arb_chain_shape()) {
        let params = v1_fixture_params();
        let chain = build_chain(&params, &spaced_times(blocks, spacing), 8_000, pos_from);

        for height in 1..blocks {
            let header = chain.header_at(height).unwrap();
            let parent = chain.header_at(height - 1).unwrap();
            if !header.generated_stake_modifier() {
                prop_assert_eq!(header.stake_modifier, parent.stake_modifier);
            }
            let (modifier, generated) =
                compute_next_modifier(&chain, Some(&parent), &params).unwrap();
            prop_assert_eq!(modifier, header.stake_modifier);
            prop_assert_eq!(generated, header.generated_stake_modifier());
        }
    }

    /// The recorded entropy flag always equals the recomputed bit.
    #[test]
    fn entropy_flag_matches_recomputation((blocks, spacing, pos_from) in arb_chain_shape()) {
        let params = v1_fixture_params();
        let chain = build_chain(&params, &spaced_times(blocks, spacing), 9_000, pos_from);
        for height in 0..blocks {
            let header = chain.header_at(height).unwrap();
            prop_assert_eq!(header.stake_entropy_bit(), entropy_bit(&header.hash));
        }
    }

    /// Weighted targets never decrease with stake value.
    #[test]
    fn weighted_target_is_monotone(bits in arb_bits(), a in arb_value(), b in arb_value()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(weighted_target(bits, lo) <= weighted_target(bits, hi));
    }

    /// Doubling the stake can only grow the set of passing hashes.
    #[test]
    fn target_check_is_monotone_in_value(
        bits in arb_bits(),
        value in arb_value(),
        hash in arb_hash(),
    ) {
        let hash = Uint256::from_le_bytes(hash);
        if meets_target(&hash, bits, value) {
            let doubled = value.saturating_mul(2);
            prop_assert!(meets_target(&hash, bits, doubled));
        }
    }

    /// One compact round trip normalizes; after that the encoding is a
    /// fixed point.
    #[test]
    fn compact_encoding_reaches_a_fixed_point(bits in arb_bits()) {
        let target = compact_to_target(bits);
        let normalized = target_to_compact(&target);
        prop_assert_eq!(compact_to_target(normalized), target);
        prop_assert_eq!(target_to_compact(&compact_to_target(normalized)), normalized);
    }

    /// The checksum is a pure function of its four inputs.
    #[test]
    fn checksum_is_deterministic(
        prev in prop::option::of(any::<u32>()),
        flag_bits in 0u32..8,
        proof in arb_hash(),
        modifier in any::<u64>(),
    ) {
        let mut header = ember_chain::BlockHeader {
            hash: Uint256::ZERO,
            height: 0,
            prev_hash: Uint256::ZERO,
            time: 0,
            bits: 0,
            flags: flag_bits,
            stake_modifier: modifier,
            stake_modifier_v2: Uint256::ZERO,
            proof_of_stake_hash: Uint256::from_le_bytes(proof),
            modifier_checksum: 0,
        };
        let first = modifier_checksum(&header, prev);
        prop_assert_eq!(modifier_checksum(&header, prev), first);

        // Fields outside the checksum preimage do not matter.
        header.time = 123;
        header.bits = 0x1d00ffff;
        header.stake_modifier_v2 = Uint256::from_le_bytes([9u8; 32]);
        prop_assert_eq!(modifier_checksum(&header, prev), first);
    }
}
