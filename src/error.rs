//! Error types for coinlib

use core::fmt;

/// Main error type for coinlib operations
///
/// Every variant is terminal for the `parse`/`derive` call that raised it:
/// inputs are deterministic, so retrying with the same bytes yields the same
/// failure. Ambiguity never degrades to a partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoinError {
    /// Coin code not present in the registry
    UnknownCoin(String),
    /// Extended public key failed to decode
    InvalidExtendedKey(String),
    /// Address checksum did not match its payload
    ChecksumMismatch,
    /// Address contains characters outside its base alphabet
    InvalidCharset,
    /// Call index not present in the pallet registry
    UnsupportedCall(u16),
    /// Malformed or semantically inconsistent transaction metadata
    InvalidTransaction(String),
    /// Batch-call recursion exceeded the fixed depth limit
    NestingLimitExceeded,
}

impl fmt::Display for CoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinError::UnknownCoin(code) => write!(f, "Unknown coin: {}", code),
            CoinError::InvalidExtendedKey(s) => write!(f, "Invalid extended key: {}", s),
            CoinError::ChecksumMismatch => write!(f, "Address checksum mismatch"),
            CoinError::InvalidCharset => write!(f, "Invalid character in address"),
            CoinError::UnsupportedCall(index) => {
                write!(f, "Unsupported call index: 0x{:04x}", index)
            }
            CoinError::InvalidTransaction(s) => write!(f, "Invalid transaction: {}", s),
            CoinError::NestingLimitExceeded => write!(f, "Batch call nesting limit exceeded"),
        }
    }
}

impl std::error::Error for CoinError {}

impl From<bip32::Error> for CoinError {
    fn from(err: bip32::Error) -> Self {
        CoinError::InvalidExtendedKey(err.to_string())
    }
}
