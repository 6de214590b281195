//! Read-only chain views.
//!
//! The consensus kernel is a pure function of a chain snapshot. These traits
//! are that snapshot: header lookup by hash, the active chain by height, and
//! transaction lookup for resolving stake origins. Callers must not mutate
//! the entries a validation reads while the call is in flight; the kernel
//! itself takes no locks.

use crate::{BlockHeader, Transaction, Uint256};
use std::collections::HashMap;
use tracing::trace;

/// Read-only access to indexed headers and the active chain.
pub trait ChainView {
    /// Header by block hash, from any branch.
    fn header_by_hash(&self, hash: &Uint256) -> Option<BlockHeader>;

    /// Header at a height of the active chain.
    fn header_at(&self, height: u32) -> Option<BlockHeader>;

    /// Height of the active chain tip.
    fn best_height(&self) -> u32;
}

/// Transaction lookup by id, returning the containing block's hash.
pub trait TransactionLookup {
    fn transaction(&self, txid: &Uint256) -> Option<(Transaction, Uint256)>;
}

/// In-memory block index over the active chain.
///
/// Backs validation in tests and the staking searcher. Blocks are connected
/// in height order; synchronization is the caller's responsibility.
#[derive(Debug, Default)]
pub struct ChainIndex {
    headers: HashMap<Uint256, BlockHeader>,
    active: Vec<Uint256>,
    transactions: HashMap<Uint256, (Transaction, Uint256)>,
}

impl ChainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect `header` as the new tip. Its height must be the next height
    /// of the active chain and its `prev_hash` must match the current tip.
    pub fn connect(&mut self, header: BlockHeader) {
        assert_eq!(
            header.height as usize,
            self.active.len(),
            "blocks connect in height order"
        );
        if let Some(tip) = self.active.last() {
            assert_eq!(&header.prev_hash, tip, "header must extend the tip");
        }
        trace!(height = header.height, hash = %header.hash, "connecting block");
        self.active.push(header.hash);
        self.headers.insert(header.hash, header);
    }

    /// Index a transaction under the block that contains it.
    pub fn index_transaction(&mut self, tx: Transaction, block_hash: Uint256) {
        self.transactions.insert(tx.txid(), (tx, block_hash));
    }

    /// The current tip header, if any block is connected.
    pub fn tip(&self) -> Option<BlockHeader> {
        self.active.last().and_then(|h| self.headers.get(h)).cloned()
    }
}

impl ChainView for ChainIndex {
    fn header_by_hash(&self, hash: &Uint256) -> Option<BlockHeader> {
        self.headers.get(hash).cloned()
    }

    fn header_at(&self, height: u32) -> Option<BlockHeader> {
        self.active
            .get(height as usize)
            .and_then(|h| self.headers.get(h))
            .cloned()
    }

    fn best_height(&self) -> u32 {
        self.active.len().saturating_sub(1) as u32
    }
}

impl TransactionLookup for ChainIndex {
    fn transaction(&self, txid: &Uint256) -> Option<(Transaction, Uint256)> {
        self.transactions.get(txid).cloned()
    }
}
