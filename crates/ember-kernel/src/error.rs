//! Error types for stake validation.

use ember_chain::Uint256;
use thiserror::Error;

/// Stake validation errors.
///
/// All variants are fatal to the block being validated; none leave partial
/// state behind. `NoSelectionCandidate` additionally aborts modifier
/// generation, which retries at the next interval.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// The stake origin block or funding transaction is not indexed.
    #[error("stake origin not found in the block index")]
    StakeOriginUnknown,

    /// The stake satisfies neither the minimum age nor the minimum depth.
    #[error("immature stake: next height {next_height}, origin height {origin_height}")]
    ImmatureStake {
        next_height: u32,
        origin_height: u32,
    },

    /// The coinstake input's signature script failed verification.
    #[error("coinstake script signature verification failed")]
    BadScriptSig,

    /// The block's second transaction is not a coinstake.
    #[error("second transaction is not a coinstake")]
    NotCoinstake,

    /// The coinstake timestamp does not equal the block timestamp.
    #[error("coinstake time {tx_time} does not match block time {block_time}")]
    TimestampMismatch { block_time: u32, tx_time: u32 },

    /// The kernel hash does not clear the weighted target.
    #[error("kernel hash {hash} misses the weighted target")]
    KernelTargetMissed { hash: Uint256 },

    /// The v1 forward walk ran past the chain tip before finding a
    /// generated modifier at the required depth.
    #[error("no stake modifier available yet for origin {origin}")]
    ModifierUnavailable { origin: Uint256 },

    /// A selection round found no selectable candidate.
    #[error("no selectable candidate in selection round {round}")]
    NoSelectionCandidate { round: usize },

    /// The ancestor walk found no block that generated a modifier.
    #[error("no generated stake modifier on the ancestor chain")]
    NoGeneratedModifier,

    /// The modifier checksum disagrees with a hard checkpoint.
    #[error("modifier checksum mismatch at height {height}: got {got:#010x}, expected {expected:#010x}")]
    CheckpointMismatch { height: u32, got: u32, expected: u32 },

    /// A block referenced during selection vanished from the index.
    #[error("block {0} not found in the index")]
    BlockNotIndexed(Uint256),
}

/// Result type for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;
