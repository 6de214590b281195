//! # ember-kernel
//!
//! The proof-of-stake consensus kernel.
//!
//! This crate provides:
//! - Stake modifier generation: 64 entropy bits folded from 64
//!   deterministically selected ancestor blocks (`compute_next_modifier`)
//! - The v2 chained 256-bit modifier (`compute_stake_modifier_v2`)
//! - Kernel proof hashing and the value-weighted target comparison
//! - Coinstake validation (`check_proof_of_stake`)
//! - The per-block modifier checksum and its mainnet hard checkpoints
//!
//! ## Determinism
//!
//! Every operation is a pure function of the chain snapshot it is handed:
//! no clocks, no randomness, no I/O. Identical inputs produce identical
//! bytes on every platform. Any deviation here is a permanent chain fork,
//! so the byte layout of each hashed preimage is fixed by
//! `ember_chain::HashWriter` and must never change.
//!
//! ## Modifier eras
//!
//! Two eras of the rules are switched at a configured height: v1 keeps a
//! 64-bit modifier regenerated at fixed time intervals and fetched through
//! a forward walk; v2 chains a 256-bit modifier block by block. Headers
//! carry both fields; `ChainParams::is_modifier_v2` is the sole selector.

mod checksum;
mod entropy;
mod error;
mod kernel;
mod modifier;
mod stake;
mod target;
mod validation;

pub use checksum::{
    check_modifier_checkpoint, enforce_modifier_checkpoint, modifier_checksum,
    MAINNET_MODIFIER_CHECKPOINTS,
};
pub use entropy::entropy_bit;
pub use error::{KernelError, KernelResult};
pub use kernel::{check_stake_kernel_hash, hash_proof_of_stake};
pub use modifier::{
    compute_next_modifier, compute_stake_modifier_v2, kernel_stake_modifier,
    selection_interval_section, HEIGHT_ONE_MODIFIER,
};
pub use stake::{StakeInput, UtxoStake};
pub use target::{compact_to_target, max_target, meets_target, target_to_compact, weighted_target};
pub use validation::{check_coinstake_timestamp, check_proof_of_stake, ScriptVerifier};
