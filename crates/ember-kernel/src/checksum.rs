//! Stake modifier checksums and hard checkpoints.
//!
//! Each connected block gets a running 32-bit checksum over its
//! proof-of-stake metadata, chained through its parent's checksum. On
//! mainnet the checksum at fixed heights must match a compiled-in table,
//! pinning the whole modifier history.

use crate::{KernelError, KernelResult};
use ember_chain::{BlockHeader, HashWriter, Network};

/// Hard checkpoints of stake modifier checksums, by height. Compiled-in
/// data, mainnet only.
pub const MAINNET_MODIFIER_CHECKPOINTS: &[(u32, u32)] = &[(0, 0xfd11_f4e7)];

/// The running modifier checksum of `header`.
///
/// The top 32 bits of `SHA256d(prev_checksum ‖ flags ‖ proof_of_stake_hash
/// ‖ stake_modifier)`; genesis omits the previous checksum.
pub fn modifier_checksum(header: &BlockHeader, prev_checksum: Option<u32>) -> u32 {
    let mut writer = HashWriter::new();
    if let Some(prev) = prev_checksum {
        writer.put_u32(prev);
    }
    writer
        .put_u32(header.flags)
        .put_hash(&header.proof_of_stake_hash)
        .put_u64(header.stake_modifier);
    let digest = writer.finalize().to_le_bytes();
    u32::from_le_bytes([digest[28], digest[29], digest[30], digest[31]])
}

/// Whether `checksum` is consistent with the hard checkpoints. Heights
/// without an entry pass; networks other than mainnet have no checkpoints.
pub fn check_modifier_checkpoint(network: Network, height: u32, checksum: u32) -> bool {
    if network != Network::Mainnet {
        return true;
    }
    match MAINNET_MODIFIER_CHECKPOINTS.binary_search_by_key(&height, |entry| entry.0) {
        Ok(i) => MAINNET_MODIFIER_CHECKPOINTS[i].1 == checksum,
        Err(_) => true,
    }
}

/// Checkpoint check as a hard error, for block connection paths.
pub fn enforce_modifier_checkpoint(
    network: Network,
    height: u32,
    checksum: u32,
) -> KernelResult<()> {
    if check_modifier_checkpoint(network, height, checksum) {
        return Ok(());
    }
    let expected = MAINNET_MODIFIER_CHECKPOINTS
        .iter()
        .find(|entry| entry.0 == height)
        .map(|entry| entry.1)
        .unwrap_or_default();
    Err(KernelError::CheckpointMismatch {
        height,
        got: checksum,
        expected,
    })
}
