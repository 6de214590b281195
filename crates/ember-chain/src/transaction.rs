//! Transactions and blocks.
//!
//! Only the parts of the transaction model the consensus kernel touches:
//! outpoints, value-carrying outputs, the coinstake shape test and the
//! deterministic txid.

use crate::{HashWriter, Uint256};

/// Reference to an output of a prior transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutPoint {
    /// Transaction id of the funding transaction.
    pub hash: Uint256,
    /// Output index within it.
    pub n: u32,
}

/// Transaction input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    pub prev_out: OutPoint,
    /// Signature script; interpreted by an external script engine.
    pub script_sig: Vec<u8>,
}

/// Transaction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    /// Value in satoshis.
    pub value: i64,
    pub script_pubkey: Vec<u8>,
}

impl TxOut {
    /// The empty marker output that leads a coinstake.
    pub fn empty() -> Self {
        Self {
            value: 0,
            script_pubkey: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

/// Transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction timestamp in seconds. A coinstake's timestamp must equal
    /// its block's.
    pub time: u32,
    pub vin: Vec<TxIn>,
    pub vout: Vec<TxOut>,
}

impl Transaction {
    /// Coinbase: single input spending the null outpoint.
    pub fn is_coinbase(&self) -> bool {
        self.vin.len() == 1
            && self.vin[0].prev_out.hash.is_zero()
            && self.vin[0].prev_out.n == u32::MAX
    }

    /// Coinstake: spends real outputs and leads its outputs with the empty
    /// marker.
    pub fn is_coinstake(&self) -> bool {
        !self.vin.is_empty()
            && !self.is_coinbase()
            && self.vout.len() >= 2
            && self.vout[0].is_empty()
    }

    /// Deterministic transaction id over the fixed serialization.
    pub fn txid(&self) -> Uint256 {
        let mut w = HashWriter::new();
        w.put_u32(self.time);
        w.put_u32(self.vin.len() as u32);
        for input in &self.vin {
            w.put_hash(&input.prev_out.hash);
            w.put_u32(input.prev_out.n);
            w.put_var_bytes(&input.script_sig);
        }
        w.put_u32(self.vout.len() as u32);
        for output in &self.vout {
            w.put_u64(output.value as u64);
            w.put_var_bytes(&output.script_pubkey);
        }
        w.finalize()
    }
}

/// A block as seen by stake validation: its header fields plus transactions.
#[derive(Debug, Clone)]
pub struct Block {
    pub prev_hash: Uint256,
    /// Block timestamp in seconds.
    pub time: u32,
    /// Compact difficulty target claimed by the header.
    pub bits: u32,
    pub vtx: Vec<Transaction>,
}

impl Block {
    /// The coinstake transaction, if the block has proof-of-stake shape.
    pub fn coinstake(&self) -> Option<&Transaction> {
        self.vtx.get(1).filter(|tx| tx.is_coinstake())
    }
}
