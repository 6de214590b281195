//! # ember-chain
//!
//! Chain substrate for the Ember node.
//!
//! This crate provides:
//! - `Uint256` and the double-SHA-256 consensus hasher
//! - Block headers with proof-of-stake metadata (flags, stake modifiers)
//! - Transactions, blocks and the coinstake shape test
//! - Read-only chain views (`ChainView`, `TransactionLookup`) and an
//!   in-memory `ChainIndex` implementation
//! - Network parameters (`ChainParams`) for mainnet, testnet and regtest
//!
//! Everything here is deterministic and performs no I/O; persistence and
//! networking live in other crates.

mod hashing;
mod header;
mod params;
mod transaction;
mod uint256;
mod view;

pub use hashing::{sha256d, HashWriter};
pub use header::{flags, BlockHeader};
pub use params::{ChainParams, ChainParamsConfig, ChainParamsError, Network};
pub use transaction::{Block, OutPoint, Transaction, TxIn, TxOut};
pub use uint256::Uint256;
pub use view::{ChainIndex, ChainView, TransactionLookup};
