//! Deterministic chain fixtures.
//!
//! Chains are built through the real modifier pipeline: each block's
//! modifier comes from `compute_next_modifier` against the chain so far,
//! exactly as a node would write it on tip advance. Block hashes derive
//! from a seed so fixtures are reproducible across runs and platforms.

use ember_chain::{flags, sha256d, BlockHeader, ChainIndex, ChainParams, Uint256};
use ember_kernel::{compute_next_modifier, entropy_bit, modifier_checksum};

/// Base timestamp of every fixture chain; divisible by the modifier
/// interval so bucket arithmetic starts clean.
pub const T0: u32 = 1_500_000_000;

/// Deterministic block hash for a seed.
pub fn seeded_hash(seed: u32) -> Uint256 {
    let mut data = b"blk".to_vec();
    data.extend_from_slice(&seed.to_le_bytes());
    Uint256::from_le_bytes(sha256d(&data))
}

/// Parameters whose modifier rules stay on v1 for every fixture height.
pub fn v1_fixture_params() -> ChainParams {
    let mut params = ChainParams::regtest();
    params.modifier_upgrade_height = 100_000;
    params
}

/// Parameters with v2 modifier rules from genesis.
pub fn v2_fixture_params() -> ChainParams {
    ChainParams::regtest()
}

/// Block times spaced evenly from `T0`.
pub fn spaced_times(blocks: u32, spacing: u32) -> Vec<u32> {
    (0..blocks).map(|h| T0 + spacing * h).collect()
}

/// Block times with a dense early cluster and a late gap: heights 0..20
/// sit 10 seconds apart, the rest resume 2100 seconds in. Positions the
/// whole cluster inside one selection window so rounds genuinely compete
/// on selection hashes.
pub fn gap_times(blocks: u32) -> Vec<u32> {
    (0..blocks)
        .map(|h| {
            if h < 20 {
                T0 + 10 * h
            } else {
                T0 + 2_100 + 60 * (h - 20)
            }
        })
        .collect()
}

/// Build a chain with the given block times.
///
/// Hash of height `h` is `seeded_hash(seed_base + h)`; heights at or above
/// `pos_from` are marked proof of stake. Modifiers, entropy bits and the
/// running checksum are computed through the real kernel operations.
pub fn build_chain(
    params: &ChainParams,
    times: &[u32],
    seed_base: u32,
    pos_from: u32,
) -> ChainIndex {
    let mut chain = ChainIndex::new();
    let mut prev: Option<BlockHeader> = None;
    for (height, &time) in times.iter().enumerate() {
        let height = height as u32;
        let hash = seeded_hash(seed_base + height);
        let (modifier, generated) =
            compute_next_modifier(&chain, prev.as_ref(), params).expect("fixture modifier");

        let mut header = BlockHeader {
            hash,
            height,
            prev_hash: prev.as_ref().map(|p| p.hash).unwrap_or(Uint256::ZERO),
            time,
            bits: 0x1d00ffff,
            flags: 0,
            stake_modifier: 0,
            stake_modifier_v2: Uint256::ZERO,
            proof_of_stake_hash: Uint256::ZERO,
            modifier_checksum: 0,
        };
        if height >= pos_from {
            header.flags |= flags::PROOF_OF_STAKE;
        }
        header.set_stake_entropy_bit(entropy_bit(&hash));
        header.set_stake_modifier(modifier, generated);
        header.modifier_checksum =
            modifier_checksum(&header, prev.as_ref().map(|p| p.modifier_checksum));

        prev = Some(header.clone());
        chain.connect(header);
    }
    chain
}

/// The standard 46-block fixture: 60-second spacing, proof of stake from
/// height 5, v1 modifier rules.
pub fn standard_chain() -> ChainIndex {
    build_chain(&v1_fixture_params(), &spaced_times(46, 60), 0, 5)
}
