//! Coinstake validation.
//!
//! `check_proof_of_stake` is the top-level check an arriving proof-of-stake
//! block must pass: the coinstake shape, the spent output's script, stake
//! maturity, the kernel hash against the weighted target, and the
//! coinstake timestamp rule. Script interpretation is not part of the
//! kernel; it enters through the `ScriptVerifier` collaborator.

use crate::kernel::check_stake_kernel_hash;
use crate::stake::{StakeInput, UtxoStake};
use crate::{KernelError, KernelResult};
use ember_chain::{
    Block, BlockHeader, ChainParams, ChainView, Transaction, TransactionLookup, Uint256,
};
use tracing::debug;

/// External script interpreter.
///
/// Verifies the signature script of `spending.vin[input_index]` against the
/// funding output's pubkey script.
pub trait ScriptVerifier {
    fn verify(
        &self,
        script_sig: &[u8],
        script_pubkey: &[u8],
        spending: &Transaction,
        input_index: usize,
        amount: i64,
    ) -> bool;
}

/// The coinstake timestamp rule: it must equal the block timestamp.
pub fn check_coinstake_timestamp(block_time: u32, tx_time: u32) -> bool {
    block_time == tx_time
}

/// Validate the coinstake kernel of `block` on top of `prev`.
///
/// Returns the kernel proof hash on success. Fails without mutating
/// anything; every error rejects the block.
pub fn check_proof_of_stake(
    block: &Block,
    prev: &BlockHeader,
    chain: &dyn ChainView,
    transactions: &dyn TransactionLookup,
    scripts: &dyn ScriptVerifier,
    params: &ChainParams,
) -> KernelResult<Uint256> {
    let coinstake = block.coinstake().ok_or(KernelError::NotCoinstake)?;

    // The kernel is input 0 of the coinstake.
    let txin = &coinstake.vin[0];
    let (prev_tx, origin_block_hash) = transactions
        .transaction(&txin.prev_out.hash)
        .ok_or(KernelError::StakeOriginUnknown)?;
    let prev_out = prev_tx
        .vout
        .get(txin.prev_out.n as usize)
        .ok_or(KernelError::StakeOriginUnknown)?;

    if !scripts.verify(
        &txin.script_sig,
        &prev_out.script_pubkey,
        coinstake,
        0,
        prev_out.value,
    ) {
        return Err(KernelError::BadScriptSig);
    }

    let stake = UtxoStake::new(&prev_tx, txin.prev_out.n, origin_block_hash)?;
    let origin = stake.origin_block(chain)?;

    let next_height = prev.height + 1;
    if !params.has_min_age_or_depth(next_height, block.time, origin.height, origin.time) {
        return Err(KernelError::ImmatureStake {
            next_height,
            origin_height: origin.height,
        });
    }

    let proof_hash =
        check_stake_kernel_hash(chain, prev, block.bits, &stake, block.time, params)?;

    if !check_coinstake_timestamp(block.time, coinstake.time) {
        return Err(KernelError::TimestampMismatch {
            block_time: block.time,
            tx_time: coinstake.time,
        });
    }

    debug!(
        next_height,
        proof = %proof_hash,
        "proof of stake verified"
    );
    Ok(proof_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coinstake_timestamp_rule() {
        assert!(check_coinstake_timestamp(1_500_000_000, 1_500_000_000));
        assert!(!check_coinstake_timestamp(1_500_000_000, 1_500_000_001));
        assert!(!check_coinstake_timestamp(1_500_000_001, 1_500_000_000));
    }
}
