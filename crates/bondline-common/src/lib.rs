//! Common value conversions for bondline projectors
//!
//! Contract events carry unsigned 256-bit words while entities keep signed,
//! arbitrary-precision running totals. These helpers are the single place where
//! one is turned into the other, and where chain values are rendered as the
//! lowercase hex fragments used in entity keys.

use num_bigint::BigInt;
use primitive_types::{H160, H256, U256};
use std::str::FromStr;

pub use num_bigint;
pub use primitive_types;

/// 20-byte contract or account address.
pub type Address = H160;

/// 32-byte word (transaction hashes, role identifiers).
pub type Bytes32 = H256;

/// Signed running total. Signed so that out-of-order events can drive a
/// balance below zero without wrapping.
pub type Amount = BigInt;

// ===== Amount conversions =====

/// Convert an unsigned event word into a signed amount (lossless)
pub fn u256_to_amount(value: U256) -> Amount {
    value
        .0
        .iter()
        .rev()
        .fold(BigInt::from(0u8), |acc, word| (acc << 64u32) + BigInt::from(*word))
}

// ===== Hex parsing and rendering =====

/// Parse a hex address, with or without `0x` prefix, in either case
pub fn parse_address(value: &str) -> Result<Address, <Address as FromStr>::Err> {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
        .parse()
}

/// Full-width lowercase hex of an address, `0x`-prefixed
pub fn address_hex(address: &Address) -> String {
    format!("{address:#x}")
}

/// Full-width lowercase hex of a 32-byte word, `0x`-prefixed
pub fn bytes32_hex(value: &Bytes32) -> String {
    format!("{value:#x}")
}

/// Minimal lowercase hex of an unsigned word, `0x`-prefixed (`0x0` for zero)
pub fn u256_hex(value: U256) -> String {
    if value.is_zero() {
        "0x0".to_string()
    } else {
        format!("{value:#x}")
    }
}

/// Minimal lowercase hex of a log index, `0x`-prefixed
pub fn index_hex(value: u64) -> String {
    format!("{value:#x}")
}
