//! Searcher-to-validator round trip.

use crate::generators::*;
use crate::harness::*;
use ember_chain::{ChainView, OutPoint};
use ember_kernel::{check_proof_of_stake, UtxoStake};
use ember_staking::{SearcherConfig, StakeSearcher};
use std::sync::atomic::{AtomicBool, AtomicU64};

#[test]
fn search_result_validates_as_a_block() {
    let mut chain = standard_chain();
    let origin = chain.header_at(3).unwrap();
    let funding = funding_transaction(origin.time, i64::MAX);
    let outpoint = OutPoint {
        hash: funding.txid(),
        n: 0,
    };
    chain.index_transaction(funding.clone(), origin.hash);

    let params = v1_fixture_params();
    let prev = chain.tip().unwrap();
    let stake = UtxoStake::new(&funding, 0, origin.hash).unwrap();

    let searcher = StakeSearcher::new(SearcherConfig {
        drift_window_secs: 64,
    });
    let found = searcher
        .search(
            &chain,
            &prev,
            0x207fffff,
            &stake,
            prev.time + 60,
            &params,
            &AtomicBool::new(false),
            &AtomicU64::new(0),
        )
        .unwrap()
        .expect("saturating stake must find a kernel");
    // The search runs newest-first, so the hit sits at the far edge of the
    // drift window.
    assert_eq!(found.attempt_time, prev.time + 60 + 64);

    // A block built at the found attempt time passes full validation and
    // reproduces the same proof hash.
    let block = coinstake_block(prev.hash, found.attempt_time, 0x207fffff, outpoint);
    let proof = check_proof_of_stake(
        &block,
        &prev,
        &chain,
        &chain,
        &AcceptAllScripts,
        &params,
    )
    .unwrap();
    assert_eq!(proof, found.proof_hash);
}
