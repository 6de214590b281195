//! Fixed-width 256-bit values.

use num_bigint::BigUint;
use std::cmp::Ordering;
use std::fmt;

/// Unsigned 256-bit value stored as 32 little-endian bytes.
///
/// Used for block hashes, transaction ids, kernel proof hashes and the v2
/// stake modifier. Ordering is numeric: byte 31 is the most significant.
/// `Display` renders big-endian hex, the orientation explorers use.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uint256([u8; 32]);

impl Uint256 {
    /// The zero value.
    pub const ZERO: Uint256 = Uint256([0u8; 32]);

    /// Construct from 32 little-endian bytes.
    pub const fn from_le_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from big-endian (display-orientation) hex.
    pub fn from_be_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        bytes.reverse();
        Ok(Self(bytes))
    }

    /// The little-endian byte representation.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Consume into the little-endian byte representation.
    pub fn to_le_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// The least significant bit, as 0 or 1.
    pub fn low_bit(&self) -> u8 {
        self.0[0] & 1
    }

    /// Numeric value as an arbitrary-precision integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.0)
    }

    /// Truncating conversion: keeps the low 256 bits of `value`.
    pub fn from_biguint(value: &BigUint) -> Self {
        let bytes = value.to_bytes_le();
        let mut out = [0u8; 32];
        let n = bytes.len().min(32);
        out[..n].copy_from_slice(&bytes[..n]);
        Self(out)
    }
}

impl Ord for Uint256 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Most significant byte last in storage.
        for i in (0..32).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Uint256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut be = self.0;
        be.reverse();
        write!(f, "{}", hex::encode(be))
    }
}

impl fmt::Debug for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_numeric() {
        let mut small = [0u8; 32];
        small[0] = 0xff; // 255
        let mut big = [0u8; 32];
        big[31] = 1; // 1 << 248
        assert!(Uint256::from_le_bytes(small) < Uint256::from_le_bytes(big));
        assert_eq!(Uint256::ZERO.cmp(&Uint256::ZERO), Ordering::Equal);
    }

    #[test]
    fn display_is_big_endian() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xab;
        let v = Uint256::from_le_bytes(bytes);
        let s = v.to_string();
        assert!(s.starts_with("00"));
        assert!(s.ends_with("ab"));
    }

    #[test]
    fn be_hex_roundtrip() {
        let s = "00000049a84eecce1c3c7115dc7c8e1b485bd289d500c00bee6196d2a5f90c8c";
        let v = Uint256::from_be_hex(s).unwrap();
        assert_eq!(v.to_string(), s);
    }

    #[test]
    fn biguint_roundtrip() {
        let mut bytes = [0u8; 32];
        bytes[3] = 7;
        bytes[30] = 9;
        let v = Uint256::from_le_bytes(bytes);
        assert_eq!(Uint256::from_biguint(&v.to_biguint()), v);
    }

    #[test]
    fn low_bit() {
        let mut bytes = [0u8; 32];
        assert_eq!(Uint256::from_le_bytes(bytes).low_bit(), 0);
        bytes[0] = 3;
        assert_eq!(Uint256::from_le_bytes(bytes).low_bit(), 1);
    }
}
