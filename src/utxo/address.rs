//! Base58Check address encoding and decoding for Bitcoin-derived chains
//!
//! Payload layout: version byte ++ 20-byte hash, followed by a 4-byte
//! checksum (first 4 bytes of double-SHA256 of the payload). Decoding
//! recomputes the checksum and fails closed on mismatch; the checksum is the
//! primary defense against transcription errors in a visually verified
//! address.

use crate::error::CoinError;
use sha2::{Digest, Sha256};

/// Length of the Base58Check checksum suffix
pub const CHECKSUM_LEN: usize = 4;

/// Encode a payload to a Base58Check address
///
/// # Arguments
/// * `payload` - hash bytes (20 bytes for P2PKH/P2SH addresses)
/// * `version` - network version byte (0x00 BTC P2PKH, 0x30 LTC P2PKH, ...)
pub fn encode_base58check(payload: &[u8], version: u8) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);
    let checksum = sha256d(&data);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(&data).into_string()
}

/// Decode a Base58Check address to its payload and network version byte
pub fn decode_base58check(address: &str) -> Result<(Vec<u8>, u8), CoinError> {
    let decoded = decode_base58(address)?;

    if decoded.len() < 1 + CHECKSUM_LEN {
        return Err(CoinError::ChecksumMismatch);
    }

    let checksum_start = decoded.len() - CHECKSUM_LEN;
    let expected = sha256d(&decoded[..checksum_start]);
    if decoded[checksum_start..] != expected[..CHECKSUM_LEN] {
        return Err(CoinError::ChecksumMismatch);
    }

    let version = decoded[0];
    Ok((decoded[1..checksum_start].to_vec(), version))
}

/// Decode raw base58, mapping alphabet violations to `InvalidCharset`
pub fn decode_base58(input: &str) -> Result<Vec<u8>, CoinError> {
    bs58::decode(input)
        .into_vec()
        .map_err(|_| CoinError::InvalidCharset)
}

fn sha256d(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}
