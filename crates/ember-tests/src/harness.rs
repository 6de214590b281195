//! Script-verifier stubs and coinstake builders.

use ember_chain::{Block, OutPoint, Transaction, TxIn, TxOut, Uint256};
use ember_kernel::ScriptVerifier;

/// Script verifier that accepts everything. Stake validation treats the
/// interpreter as an external collaborator; most tests only need it to say
/// yes.
pub struct AcceptAllScripts;

impl ScriptVerifier for AcceptAllScripts {
    fn verify(
        &self,
        _script_sig: &[u8],
        _script_pubkey: &[u8],
        _spending: &Transaction,
        _input_index: usize,
        _amount: i64,
    ) -> bool {
        true
    }
}

/// Script verifier that rejects everything.
pub struct RejectAllScripts;

impl ScriptVerifier for RejectAllScripts {
    fn verify(
        &self,
        _script_sig: &[u8],
        _script_pubkey: &[u8],
        _spending: &Transaction,
        _input_index: usize,
        _amount: i64,
    ) -> bool {
        false
    }
}

/// A funding transaction holding one stakeable output.
pub fn funding_transaction(time: u32, value: i64) -> Transaction {
    Transaction {
        time,
        vin: vec![],
        vout: vec![TxOut {
            value,
            script_pubkey: vec![0x51],
        }],
    }
}

/// A proof-of-stake block spending `outpoint` in its coinstake.
pub fn coinstake_block(prev_hash: Uint256, time: u32, bits: u32, outpoint: OutPoint) -> Block {
    let coinbase = Transaction {
        time,
        vin: vec![TxIn {
            prev_out: OutPoint {
                hash: Uint256::ZERO,
                n: u32::MAX,
            },
            script_sig: vec![0x00],
        }],
        vout: vec![TxOut {
            value: 0,
            script_pubkey: vec![0x51],
        }],
    };
    let coinstake = Transaction {
        time,
        vin: vec![TxIn {
            prev_out: outpoint,
            script_sig: vec![0x01],
        }],
        vout: vec![
            TxOut::empty(),
            TxOut {
                value: 1,
                script_pubkey: vec![0x51],
            },
        ],
    };
    Block {
        prev_hash,
        time,
        bits,
        vtx: vec![coinbase, coinstake],
    }
}
