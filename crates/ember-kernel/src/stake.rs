//! Stake input capability.
//!
//! The kernel never constructs stake inputs; callers supply anything that
//! satisfies `StakeInput`. The capability is deliberately narrow so
//! alternative stake sources can plug in without the kernel changing —
//! `UtxoStake` is the standard one, built from the funding transaction's
//! output.

use crate::modifier::kernel_stake_modifier;
use crate::{KernelError, KernelResult};
use ember_chain::{BlockHeader, ChainParams, ChainView, HashWriter, Transaction, Uint256};

/// A spendable output used as the origin of a stake.
///
/// Implementations must not outlive the chain snapshot they were derived
/// from; a stake input is built per validation attempt and discarded.
pub trait StakeInput {
    /// Header of the block containing the funding transaction.
    fn origin_block(&self, chain: &dyn ChainView) -> KernelResult<BlockHeader>;

    /// Bytes that make this stake unique: the serialized outpoint.
    fn uniqueness(&self) -> Vec<u8>;

    /// Staked value in satoshis.
    fn value(&self) -> i64;

    /// The v1 kernel stake modifier for this input (forward walk from the
    /// origin block). Only consulted before the v2 switch.
    fn kernel_modifier(&self, chain: &dyn ChainView, params: &ChainParams) -> KernelResult<u64>;
}

/// Standard stake input: one UTXO.
#[derive(Debug, Clone)]
pub struct UtxoStake {
    prev_txid: Uint256,
    vout: u32,
    value: i64,
    origin_block_hash: Uint256,
}

impl UtxoStake {
    /// Build from the funding transaction, the spent output index and the
    /// hash of the block containing the transaction.
    pub fn new(prev_tx: &Transaction, vout: u32, origin_block_hash: Uint256) -> KernelResult<Self> {
        let output = prev_tx
            .vout
            .get(vout as usize)
            .ok_or(KernelError::StakeOriginUnknown)?;
        Ok(Self {
            prev_txid: prev_tx.txid(),
            vout,
            value: output.value,
            origin_block_hash,
        })
    }

    pub fn outpoint_txid(&self) -> &Uint256 {
        &self.prev_txid
    }
}

impl StakeInput for UtxoStake {
    fn origin_block(&self, chain: &dyn ChainView) -> KernelResult<BlockHeader> {
        chain
            .header_by_hash(&self.origin_block_hash)
            .ok_or(KernelError::StakeOriginUnknown)
    }

    fn uniqueness(&self) -> Vec<u8> {
        let mut writer = HashWriter::new();
        writer.put_hash(&self.prev_txid).put_u32(self.vout);
        writer.into_bytes()
    }

    fn value(&self) -> i64 {
        self.value
    }

    fn kernel_modifier(&self, chain: &dyn ChainView, params: &ChainParams) -> KernelResult<u64> {
        kernel_stake_modifier(chain, &self.origin_block_hash, params)
    }
}
