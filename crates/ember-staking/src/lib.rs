//! # ember-staking
//!
//! Kernel search for block production.
//!
//! Validation answers "is this attempt valid"; staking needs the converse:
//! find an attempt time inside the consensus drift window whose kernel
//! hash clears the weighted target. `StakeSearcher` does exactly that and
//! nothing else — it reports success or exhaustion and never touches
//! wallet or chain state.

mod searcher;

pub use searcher::{FoundKernel, SearcherConfig, StakeSearcher};
