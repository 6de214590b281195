//! Kernel proof hashing.
//!
//! The kernel hash commits a stake attempt to four things, serialized in a
//! fixed order: the stake modifier (64-bit v1 or 256-bit v2, chosen by the
//! era of the block under construction), the origin block's timestamp, the
//! stake's uniqueness bytes and the attempt timestamp. Reordering or
//! resizing any field is a hard fork.

use crate::stake::StakeInput;
use crate::target::meets_target;
use crate::{KernelError, KernelResult};
use ember_chain::{BlockHeader, ChainParams, ChainView, HashWriter, Uint256};
use tracing::{debug, trace};

/// The kernel proof hash for one stake attempt on top of `prev`.
pub fn hash_proof_of_stake(
    chain: &dyn ChainView,
    prev: &BlockHeader,
    stake: &dyn StakeInput,
    attempt_time: u32,
    params: &ChainParams,
) -> KernelResult<Uint256> {
    let origin = stake.origin_block(chain)?;

    let mut writer = HashWriter::new();
    if params.is_modifier_v2(prev.height + 1) {
        writer.put_hash(&prev.stake_modifier_v2);
    } else {
        writer.put_u64(stake.kernel_modifier(chain, params)?);
    }
    writer
        .put_u32(origin.time)
        .put_bytes(&stake.uniqueness())
        .put_u32(attempt_time);
    Ok(writer.finalize())
}

/// Compute the kernel hash and check it against the weighted target.
///
/// Returns the hash when it clears the target; `KernelTargetMissed`
/// otherwise.
pub fn check_stake_kernel_hash(
    chain: &dyn ChainView,
    prev: &BlockHeader,
    bits: u32,
    stake: &dyn StakeInput,
    attempt_time: u32,
    params: &ChainParams,
) -> KernelResult<Uint256> {
    let hash = hash_proof_of_stake(chain, prev, stake, attempt_time, params)?;
    if !meets_target(&hash, bits, stake.value()) {
        trace!(
            attempt_time,
            hash = %hash,
            bits,
            value = stake.value(),
            "kernel hash misses weighted target"
        );
        return Err(KernelError::KernelTargetMissed { hash });
    }
    debug!(attempt_time, hash = %hash, "kernel hash meets weighted target");
    Ok(hash)
}
