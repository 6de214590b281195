//! Attempt-time iteration against the weighted target.

use ember_chain::{BlockHeader, ChainParams, ChainView, Uint256};
use ember_kernel::{check_stake_kernel_hash, KernelError, KernelResult, StakeInput};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, trace};

/// Attempts between cancellation checks.
const CANCEL_CHECK_INTERVAL: usize = 1_024;

/// Searcher configuration.
#[derive(Debug, Clone)]
pub struct SearcherConfig {
    /// Width of the searched attempt-time window in seconds.
    pub drift_window_secs: u32,
}

impl Default for SearcherConfig {
    fn default() -> Self {
        Self {
            // Two weeks, the outer bound peers will still accept.
            drift_window_secs: 1_209_600,
        }
    }
}

/// A successful kernel search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundKernel {
    /// The attempt time whose kernel hash cleared the target.
    pub attempt_time: u32,
    /// The kernel proof hash.
    pub proof_hash: Uint256,
}

/// Iterates attempt times for one stake input.
#[derive(Debug, Clone, Default)]
pub struct StakeSearcher {
    config: SearcherConfig,
}

impl StakeSearcher {
    pub fn new(config: SearcherConfig) -> Self {
        Self { config }
    }

    /// Search `[start_time, start_time + drift_window]` newest-first for an
    /// attempt time whose kernel hash clears the weighted target; the first
    /// hit is the newest qualifying time.
    ///
    /// Returns `Ok(None)` when the window is exhausted or `cancel` is
    /// raised. Maturity is checked up front; an immature stake fails
    /// immediately rather than burning a window of hashing.
    ///
    /// `attempt_counter` is incremented per hash for rate tracking.
    #[allow(clippy::too_many_arguments)]
    pub fn search(
        &self,
        chain: &dyn ChainView,
        prev: &BlockHeader,
        bits: u32,
        stake: &dyn StakeInput,
        start_time: u32,
        params: &ChainParams,
        cancel: &AtomicBool,
        attempt_counter: &AtomicU64,
    ) -> KernelResult<Option<FoundKernel>> {
        let origin = stake.origin_block(chain)?;
        if origin.height < 1 {
            // Genesis outputs cannot stake.
            return Err(KernelError::StakeOriginUnknown);
        }

        let next_height = prev.height + 1;
        if !params.has_min_age_or_depth(next_height, start_time, origin.height, origin.time) {
            return Err(KernelError::ImmatureStake {
                next_height,
                origin_height: origin.height,
            });
        }

        debug!(
            next_height,
            start_time,
            window = self.config.drift_window_secs,
            "starting kernel search"
        );
        for (attempt, offset) in (0..=self.config.drift_window_secs).rev().enumerate() {
            if attempt % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
                trace!(offset, "kernel search cancelled");
                return Ok(None);
            }

            let attempt_time = start_time.wrapping_add(offset);
            attempt_counter.fetch_add(1, Ordering::Relaxed);
            match check_stake_kernel_hash(chain, prev, bits, stake, attempt_time, params) {
                Ok(proof_hash) => {
                    debug!(attempt_time, proof = %proof_hash, "kernel search hit");
                    return Ok(Some(FoundKernel {
                        attempt_time,
                        proof_hash,
                    }));
                }
                Err(KernelError::KernelTargetMissed { .. }) => continue,
                Err(err) => return Err(err),
            }
        }

        debug!("kernel search exhausted the drift window");
        Ok(None)
    }
}
