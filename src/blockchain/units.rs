//! Conversion between raw integer amounts and decimal strings.
//!
//! Both directions work on strings so arbitrarily large wei or token amounts
//! never pass through fixed-width arithmetic.

use crate::blockchain::types::{BlockchainError, BlockchainResult};

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Render a raw integer string as a decimal with `decimals` fractional digits.
///
/// Trailing zeros of the fraction are dropped, and so is the decimal point
/// when nothing is left after it.
///
/// Anything but ASCII digits is rejected with `InvalidDecimal`.
///
/// ```
/// use web3_helpers::blockchain::units::to_decimal;
///
/// assert_eq!(to_decimal("1", 2).unwrap(), "0.01");
/// assert_eq!(to_decimal("100000", 4).unwrap(), "10");
/// assert!(to_decimal("1e5", 2).is_err());
/// ```
pub fn to_decimal(raw: &str, decimals: usize) -> BlockchainResult<String> {
    if !all_digits(raw) {
        return Err(BlockchainError::InvalidDecimal(raw.to_string()));
    }

    let padded = format!("{:0>width$}", raw, width = decimals);
    let split = padded.len() - decimals;
    let (integer, fraction) = padded.split_at(split);

    let integer = if integer.is_empty() { "0" } else { integer };
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        Ok(integer.to_string())
    } else {
        Ok(format!("{}.{}", integer, fraction))
    }
}

/// Parse a decimal string into a raw integer string scaled by `decimals`.
///
/// Fails when the fraction has more digits than `decimals` rather than
/// silently rounding.
pub fn from_decimal(value: &str, decimals: usize) -> BlockchainResult<String> {
    let mut parts = value.split('.');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();

    if parts.next().is_some() {
        return Err(BlockchainError::InvalidDecimal(value.to_string()));
    }
    if !all_digits(integer) || !all_digits(fraction) {
        return Err(BlockchainError::InvalidDecimal(value.to_string()));
    }
    if fraction.len() > decimals {
        return Err(BlockchainError::FractionTooLong {
            value: value.to_string(),
            decimals,
        });
    }

    Ok(format!("{}{:0<width$}", integer, fraction, width = decimals))
}
