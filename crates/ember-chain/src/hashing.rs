//! Consensus hashing.
//!
//! Every consensus-critical digest in Ember is SHA-256 applied twice over a
//! fixed little-endian serialization. `HashWriter` is that serializer:
//! integers little-endian, 256-bit values as their raw 32 bytes, no framing
//! and no padding. Components build their preimages through it so the byte
//! layout cannot drift between call sites.

use crate::Uint256;
use sha2::{Digest, Sha256};

/// SHA-256 applied twice.
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    second.into()
}

/// Incremental builder for double-SHA-256 preimages.
///
/// All integers are written little-endian; `Uint256` as its raw 32
/// little-endian bytes.
#[derive(Debug, Default)]
pub struct HashWriter {
    buf: Vec<u8>,
}

impl HashWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn put_u64(&mut self, value: u64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn put_i64(&mut self, value: i64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn put_hash(&mut self, value: &Uint256) -> &mut Self {
        self.buf.extend_from_slice(value.as_bytes());
        self
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Length-prefixed byte string (u32 length, then the bytes).
    pub fn put_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.put_u32(bytes.len() as u32);
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Double-SHA-256 of everything written so far.
    pub fn finalize(&self) -> Uint256 {
        Uint256::from_le_bytes(sha256d(&self.buf))
    }

    /// The accumulated serialization without hashing it.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
