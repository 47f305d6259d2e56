//! Parsed transaction model shared by all chain families
//!
//! A `ParsedTransaction` that exists has already passed the HD-path check and
//! the required-field checks for its coin. Construction is the validation
//! gate; there is no partially valid state.

use crate::error::CoinError;
use crate::registry::CoinDescriptor;
use serde::Serialize;

/// One `(label, value)` pair for on-screen review
///
/// The UI renders fields in the given order without reordering or filtering,
/// so the order decoders emit them in is part of the security contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayField {
    pub label: String,
    pub value: String,
}

impl DisplayField {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        DisplayField {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A decoded, validated transaction intent
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    /// Coin code the metadata was parsed under
    pub coin_code: String,
    /// Normalized destination
    pub to: String,
    /// Decimal-adjusted amount in chain-native units
    pub amount: f64,
    /// Decimal-adjusted fee (tip for Substrate chains)
    pub fee: f64,
    /// Declared HD path, already checked against the coin's account roots
    pub hd_path: String,
    /// Ordered display fields for the review screen
    pub fields: Vec<DisplayField>,
}

impl ParsedTransaction {
    /// Ordered `(label, value)` pairs for the UI collaborator
    pub fn display_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|f| (f.label.as_str(), f.value.as_str()))
    }

    /// Look up a display field by label
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// Per-coin metadata parsing strategy
///
/// Implementations borrow the raw payload for the duration of one `parse`
/// call and produce an owned `ParsedTransaction`.
pub trait MetadataParser: Send + Sync {
    fn parse(
        &self,
        coin: &CoinDescriptor,
        metadata: &serde_json::Value,
        hd_path: &str,
    ) -> Result<ParsedTransaction, CoinError>;
}

/// Convert an integer minor-unit amount to a chain-native display amount
///
/// Single division by `10^decimals`; never accumulated across operations.
pub fn to_display_amount(minor_units: u128, decimals: u8) -> f64 {
    minor_units as f64 / 10f64.powi(decimals as i32)
}

/// Read a required u128 metadata field given as a JSON integer or a string of
/// decimal digits
pub fn metadata_u128(metadata: &serde_json::Value, key: &str) -> Result<u128, CoinError> {
    let value = metadata
        .get(key)
        .ok_or_else(|| CoinError::InvalidTransaction(format!("missing field \"{}\"", key)))?;
    json_u128(value, key)
}

/// Read an optional u128 metadata field, applying `default` when absent
pub fn metadata_u128_or(
    metadata: &serde_json::Value,
    key: &str,
    default: u128,
) -> Result<u128, CoinError> {
    match metadata.get(key) {
        Some(value) => json_u128(value, key),
        None => Ok(default),
    }
}

/// Read a required string metadata field
pub fn metadata_str<'a>(
    metadata: &'a serde_json::Value,
    key: &str,
) -> Result<&'a str, CoinError> {
    metadata
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| CoinError::InvalidTransaction(format!("missing field \"{}\"", key)))
}

fn json_u128(value: &serde_json::Value, key: &str) -> Result<u128, CoinError> {
    if let Some(n) = value.as_u64() {
        return Ok(n as u128);
    }
    if let Some(s) = value.as_str() {
        if let Ok(n) = s.parse::<u128>() {
            return Ok(n);
        }
    }
    Err(CoinError::InvalidTransaction(format!(
        "malformed numeric field \"{}\"",
        key
    )))
}
