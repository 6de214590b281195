//! Compact targets and the stake-weighted target comparison.
//!
//! The difficulty target travels in headers in Bitcoin's compact form:
//! one size byte and a 23-bit mantissa. For proof of stake the decoded
//! target is additionally weighted by the staked value, so holders of more
//! coin clear the bar more often per coin-second.

use ember_chain::Uint256;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::trace;

/// Maximum 256-bit value.
pub fn max_target() -> BigUint {
    (BigUint::one() << 256u32) - BigUint::one()
}

/// Decode a compact target.
///
/// Format: `0x[size][mantissa]` where `size` is the byte length of the
/// target and the low 23 bits are its most significant bytes.
pub fn compact_to_target(bits: u32) -> BigUint {
    let size = (bits >> 24) as usize;
    let mantissa = bits & 0x007f_ffff;
    if size <= 3 {
        BigUint::from(mantissa >> (8 * (3 - size)))
    } else {
        BigUint::from(mantissa) << (8 * (size - 3))
    }
}

/// Encode a target in compact form. Lossy: only the top three bytes
/// survive. The mantissa is kept below 0x800000 so it cannot read as a
/// sign bit.
pub fn target_to_compact(target: &BigUint) -> u32 {
    if target.is_zero() {
        return 0;
    }

    let bytes = target.to_bytes_be();
    let len = bytes.len();
    let (size, mantissa) = if len <= 3 {
        let mut value = 0u32;
        for &b in &bytes {
            value = (value << 8) | u32::from(b);
        }
        (len as u32, value << (8 * (3 - len)))
    } else {
        let mantissa =
            (u32::from(bytes[0]) << 16) | (u32::from(bytes[1]) << 8) | u32::from(bytes[2]);
        (len as u32, mantissa)
    };

    if mantissa & 0x0080_0000 != 0 {
        ((size + 1) << 24) | (mantissa >> 8)
    } else {
        (size << 24) | mantissa
    }
}

/// The stake-weighted target: the decoded compact target multiplied by
/// `value / 100` (integer division), saturating at 2^256 − 1.
pub fn weighted_target(bits: u32, value_satoshis: i64) -> BigUint {
    let value = u64::try_from(value_satoshis).unwrap_or(0);
    let weight = BigUint::from(value) / 100u32;
    let target = compact_to_target(bits) * weight;
    let cap = max_target();
    if target > cap {
        trace!(bits, value_satoshis, "weighted target saturated");
        return cap;
    }
    target
}

/// Whether `kernel_hash` clears the weighted target.
pub fn meets_target(kernel_hash: &Uint256, bits: u32, value_satoshis: i64) -> bool {
    kernel_hash.to_biguint() < weighted_target(bits, value_satoshis)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COIN: i64 = 100_000_000;

    #[test]
    fn compact_decode_known_value() {
        // The classic Bitcoin genesis target.
        let target = compact_to_target(0x1d00ffff);
        let expected = BigUint::parse_bytes(
            b"ffff0000000000000000000000000000000000000000000000000000",
            16,
        )
        .unwrap();
        assert_eq!(target, expected);

        assert_eq!(compact_to_target(0), BigUint::zero());
    }

    #[test]
    fn compact_roundtrip_fixed_point() {
        // Re-encoding a decoded compact value is stable.
        for bits in [0x1d00ffffu32, 0x1b0404cb, 0x17034d4b, 0x207fffff] {
            let target = compact_to_target(bits);
            assert_eq!(target_to_compact(&target), bits);
            let twice = compact_to_target(target_to_compact(&target));
            assert_eq!(twice, target);
        }
    }

    #[test]
    fn compact_small_targets_keep_their_size() {
        let target = BigUint::from(0x100u32);
        let bits = target_to_compact(&target);
        assert_eq!(bits, 0x02010000);
        assert_eq!(compact_to_target(bits), target);

        let target = BigUint::from(0x80u32);
        let bits = target_to_compact(&target);
        assert_eq!(bits, 0x02008000);
        assert_eq!(compact_to_target(bits), target);
    }

    #[test]
    fn compact_encode_normalizes_sign_bit() {
        // 0x800000 mantissa would read as negative; the size bumps instead.
        let target = BigUint::from(0x0080_0000u32);
        let bits = target_to_compact(&target);
        assert_eq!(bits, 0x04008000);
        assert_eq!(compact_to_target(bits), target);
    }

    #[test]
    fn weighting_divides_value_by_hundred() {
        // 100 coins of stake weight the base target by 10^8.
        let base = compact_to_target(0x1d00ffff);
        let weighted = weighted_target(0x1d00ffff, 100 * COIN);
        assert_eq!(weighted, &base * 100_000_000u64);
    }

    #[test]
    fn comparison_is_strict() {
        let weighted = weighted_target(0x1d00ffff, 100 * COIN);
        let passing = Uint256::from_biguint(&(&weighted - 1u32));
        let failing = Uint256::from_biguint(&weighted);
        assert!(meets_target(&passing, 0x1d00ffff, 100 * COIN));
        assert!(!meets_target(&failing, 0x1d00ffff, 100 * COIN));
    }

    #[test]
    fn weighting_saturates() {
        // An enormous stake saturates the multiplication instead of
        // wrapping; every hash except all-ones then passes.
        let weighted = weighted_target(0x207fffff, i64::MAX);
        assert_eq!(weighted, max_target());
        let nearly_all_ones = Uint256::from_biguint(&(max_target() - 1u32));
        assert!(meets_target(&nearly_all_ones, 0x207fffff, i64::MAX));
    }

    #[test]
    fn zero_and_negative_values_cannot_stake() {
        assert_eq!(weighted_target(0x1d00ffff, 0), BigUint::zero());
        assert_eq!(weighted_target(0x1d00ffff, -1), BigUint::zero());
        assert_eq!(weighted_target(0x1d00ffff, 99), BigUint::zero());
        assert!(!meets_target(&Uint256::ZERO, 0x1d00ffff, 99));
    }

    #[test]
    fn monotone_in_stake_value() {
        let hash = Uint256::from_biguint(&(compact_to_target(0x1d00ffff) * 3u32));
        assert!(!meets_target(&hash, 0x1d00ffff, 300));
        assert!(meets_target(&hash, 0x1d00ffff, 600));
        assert!(meets_target(&hash, 0x1d00ffff, 1200));
    }
}
