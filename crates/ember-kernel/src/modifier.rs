//! Stake modifier generation.
//!
//! The stake modifier prevents a coin owner from precomputing future
//! proofs of stake at the time its output confirms: a kernel must hash
//! with a modifier generated *after* the coin, so the proof depends on
//! chain entropy the owner could not have known.
//!
//! The modifier is 64 bits, each contributed by one block chosen from a
//! bounded past window. Selection of each block hashes the block's proof
//! hash with the previous modifier, so control over one round's outcome
//! does not give control over the next. The modifier is recomputed at a
//! fixed time interval rather than every block, which keeps an attacker
//! from accumulating influence over modifier bits by extending the chain.

use crate::entropy::entropy_bit;
use crate::{KernelError, KernelResult};
use ember_chain::{BlockHeader, ChainParams, ChainView, HashWriter, Uint256};
use num_bigint::BigUint;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Modifier carried by the block at height 1: the first eight bytes of the
/// ASCII string "stakemodifier", read little-endian.
pub const HEIGHT_ONE_MODIFIER: u64 = u64::from_le_bytes(*b"stakemod");

/// Width in seconds of one selection round.
///
/// Later rounds get wider sections; the 64 sections together span roughly
/// the legacy modifier interval.
pub fn selection_interval_section(params: &ChainParams, section: usize) -> i64 {
    assert!(section < 64);
    params.modifier_interval_secs * 63
        / (63 + (63 - section as i64) * (params.modifier_interval_ratio - 1))
}

/// Parent of `header`, or `None` at genesis.
fn parent(
    chain: &dyn ChainView,
    header: &BlockHeader,
) -> KernelResult<Option<BlockHeader>> {
    if header.height == 0 {
        return Ok(None);
    }
    chain
        .header_by_hash(&header.prev_hash)
        .map(Some)
        .ok_or(KernelError::BlockNotIndexed(header.prev_hash))
}

/// Walk back from `from` to the nearest block that generated a modifier;
/// returns its modifier and block time.
fn last_generated_modifier(
    chain: &dyn ChainView,
    from: &BlockHeader,
) -> KernelResult<(u64, i64)> {
    let mut cursor = from.clone();
    loop {
        if cursor.generated_stake_modifier() {
            return Ok((cursor.stake_modifier, i64::from(cursor.time)));
        }
        match parent(chain, &cursor)? {
            Some(prev) => cursor = prev,
            None => return Err(KernelError::NoGeneratedModifier),
        }
    }
}

/// Select one block from the sorted candidates, excluding already selected
/// blocks and stopping once a choice exists and candidates pass
/// `selection_stop`.
///
/// The selection hash binds the candidate's proof hash to the previous
/// modifier. Under the v1 rule a proof-of-stake candidate hashes a zero
/// proof; under v2 every candidate hashes its block hash. A proof-of-stake
/// candidate's selection hash is shifted right by 32 bits so stake blocks
/// are always favored over work blocks.
fn select_candidate(
    chain: &dyn ChainView,
    candidates: &[(i64, Uint256)],
    selected: &HashSet<Uint256>,
    selection_stop: i64,
    prev_modifier: u64,
    v2_rule: bool,
) -> KernelResult<Option<BlockHeader>> {
    let mut best: Option<(BigUint, BlockHeader)> = None;
    for (time, hash) in candidates {
        let header = chain
            .header_by_hash(hash)
            .ok_or(KernelError::BlockNotIndexed(*hash))?;
        if best.is_some() && *time > selection_stop {
            break;
        }
        if selected.contains(hash) {
            continue;
        }

        let proof_hash = if v2_rule || !header.is_proof_of_stake() {
            header.hash
        } else {
            Uint256::ZERO
        };
        let mut writer = HashWriter::new();
        writer.put_hash(&proof_hash).put_u64(prev_modifier);
        let mut selection_value = writer.finalize().to_biguint();
        if header.is_proof_of_stake() {
            selection_value >>= 32;
        }

        // Strictly smaller wins; ties keep the earlier candidate.
        let better = match &best {
            Some((best_value, _)) => selection_value < *best_value,
            None => true,
        };
        if better {
            best = Some((selection_value, header));
        }
    }
    Ok(best.map(|(_, header)| header))
}

/// Compute the stake modifier for the block following `prev`.
///
/// Returns the modifier and whether it was freshly generated. The genesis
/// modifier is 0; the block at height 1 carries a fixed sentinel. After
/// that a new modifier is generated only when the tip crosses into a new
/// modifier interval, by folding the entropy bits of 64 selected ancestor
/// blocks; otherwise the previous modifier is inherited.
pub fn compute_next_modifier(
    chain: &dyn ChainView,
    prev: Option<&BlockHeader>,
    params: &ChainParams,
) -> KernelResult<(u64, bool)> {
    let prev = match prev {
        None => return Ok((0, true)), // genesis
        Some(header) => header,
    };
    if prev.height == 0 {
        return Ok((HEIGHT_ONE_MODIFIER, true));
    }

    let interval = params.modifier_interval_secs;
    let (prev_modifier, prev_modifier_time) = last_generated_modifier(chain, prev)?;
    if prev_modifier_time / interval >= i64::from(prev.time) / interval {
        trace!(
            "modifier interval not crossed yet at height {}: keeping {:#018x}",
            prev.height,
            prev_modifier
        );
        return Ok((prev_modifier, false));
    }

    // Gather every ancestor inside the selection window, oldest first.
    let selection_start =
        (i64::from(prev.time) / interval) * interval - params.old_modifier_interval_secs;
    let mut candidates: Vec<(i64, Uint256)> = Vec::with_capacity(
        (64 * interval / params.target_spacing_secs).max(1) as usize,
    );
    let mut first_candidate_height = 0u32;
    let mut cursor = Some(prev.clone());
    while let Some(header) = cursor {
        if i64::from(header.time) < selection_start {
            first_candidate_height = header.height + 1;
            break;
        }
        candidates.push((i64::from(header.time), header.hash));
        cursor = parent(chain, &header)?;
    }
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    debug!(
        window_start = selection_start,
        first_height = first_candidate_height,
        candidates = candidates.len(),
        "starting modifier selection"
    );

    // The v1/v2 selection rule is fixed once per selection, from the oldest
    // candidate's height.
    let oldest = chain
        .header_by_hash(&candidates[0].1)
        .ok_or(KernelError::BlockNotIndexed(candidates[0].1))?;
    let v2_rule = params.is_modifier_v2(oldest.height);

    let mut new_modifier = 0u64;
    let mut selection_stop = selection_start;
    let mut selected: HashSet<Uint256> = HashSet::new();
    for round in 0..candidates.len().min(64) {
        selection_stop += selection_interval_section(params, round);
        let chosen = select_candidate(
            chain,
            &candidates,
            &selected,
            selection_stop,
            prev_modifier,
            v2_rule,
        )?
        .ok_or(KernelError::NoSelectionCandidate { round })?;

        let bit = entropy_bit(&chosen.hash);
        new_modifier |= u64::from(bit) << round;
        trace!(
            round,
            stop = selection_stop,
            height = chosen.height,
            bit,
            stake = chosen.is_proof_of_stake(),
            "selected modifier block"
        );
        selected.insert(chosen.hash);
    }

    debug!(
        "generated stake modifier {:#018x} on top of height {}",
        new_modifier, prev.height
    );
    Ok((new_modifier, true))
}

/// The v1 stake modifier used to hash a kernel: chosen a full legacy
/// interval *after* the coin's origin block, so the coin owner cannot know
/// it at confirmation time.
///
/// Walks the active chain forward from the origin until a generated
/// modifier is found whose carrier block time is at least
/// `origin time + old_modifier_interval_secs`.
pub fn kernel_stake_modifier(
    chain: &dyn ChainView,
    origin_hash: &Uint256,
    params: &ChainParams,
) -> KernelResult<u64> {
    let origin = chain
        .header_by_hash(origin_hash)
        .ok_or(KernelError::StakeOriginUnknown)?;
    let required_time = i64::from(origin.time) + params.old_modifier_interval_secs;

    let mut modifier_time = i64::from(origin.time);
    let mut cursor = origin;
    while modifier_time < required_time {
        let next = chain
            .header_at(cursor.height + 1)
            .ok_or(KernelError::ModifierUnavailable {
                origin: *origin_hash,
            })?;
        cursor = next;
        if cursor.generated_stake_modifier() {
            modifier_time = i64::from(cursor.time);
        }
    }
    trace!(
        origin = %origin_hash,
        carrier_height = cursor.height,
        "resolved kernel stake modifier"
    );
    Ok(cursor.stake_modifier)
}

/// The v2 chained stake modifier for the block following `prev`:
/// `SHA256d(kernel ‖ previous modifier)`, where the previous modifier is
/// the v1 or v2 field of `prev` depending on the era of the new block.
/// Genesis has modifier 0.
///
/// Unlike the v1 kernel hash this reads only the kernel and the previous
/// modifier; v2 decouples modifier chaining from the per-attempt kernel.
pub fn compute_stake_modifier_v2(
    prev: Option<&BlockHeader>,
    kernel: &Uint256,
    params: &ChainParams,
) -> Uint256 {
    let prev = match prev {
        None => return Uint256::ZERO,
        Some(header) => header,
    };
    let mut writer = HashWriter::new();
    writer.put_hash(kernel);
    if params.is_modifier_v2(prev.height + 1) {
        writer.put_hash(&prev.stake_modifier_v2);
    } else {
        writer.put_u64(prev.stake_modifier);
    }
    writer.finalize()
}
