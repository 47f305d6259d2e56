//! SS58 address encoding and decoding for Substrate-derived chains
//!
//! Payload: network prefix (one or two bytes) ++ 32-byte public key, followed
//! by the first 2 bytes of Blake2b-512 over `b"SS58PRE" ++ payload`. Decoding
//! recomputes the checksum and fails closed.

use crate::error::CoinError;
use blake2::{Blake2b512, Digest};
use crate::utxo::address::decode_base58;

/// Fixed salt prepended to the checksum preimage
const CHECKSUM_SALT: &[u8] = b"SS58PRE";

/// Checksum length for account addresses
const CHECKSUM_LEN: usize = 2;

/// Network prefix for Polkadot mainnet (addresses start with '1')
pub const POLKADOT_PREFIX: u16 = 0;
/// Network prefix for Kusama
pub const KUSAMA_PREFIX: u16 = 2;

/// Encode a 32-byte public key to an SS58 address
pub fn encode_ss58(public_key: &[u8], prefix: u16) -> Result<String, CoinError> {
    if public_key.len() != 32 {
        return Err(CoinError::InvalidTransaction(format!(
            "account id must be 32 bytes, got {}",
            public_key.len()
        )));
    }

    let mut payload = encode_prefix(prefix)?;
    payload.extend_from_slice(public_key);

    let checksum = ss58_checksum(&payload);
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);

    Ok(bs58::encode(&payload).into_string())
}

/// Decode an SS58 address to its public key and network prefix
pub fn decode_ss58(address: &str) -> Result<(Vec<u8>, u16), CoinError> {
    let decoded = decode_base58(address)?;

    // Shortest valid form: 1-byte prefix + 32-byte key + checksum
    if decoded.len() < 1 + 32 + CHECKSUM_LEN {
        return Err(CoinError::ChecksumMismatch);
    }

    let (prefix, prefix_len) = decode_prefix(&decoded)?;

    let checksum_start = decoded.len() - CHECKSUM_LEN;
    let expected = ss58_checksum(&decoded[..checksum_start]);
    if decoded[checksum_start..] != expected[..CHECKSUM_LEN] {
        return Err(CoinError::ChecksumMismatch);
    }

    let public_key = &decoded[prefix_len..checksum_start];
    if public_key.len() != 32 {
        return Err(CoinError::ChecksumMismatch);
    }

    Ok((public_key.to_vec(), prefix))
}

/// Check that an address is well formed, optionally pinning the prefix
pub fn validate_ss58(address: &str, expected_prefix: Option<u16>) -> bool {
    match decode_ss58(address) {
        Ok((_, prefix)) => expected_prefix.map_or(true, |expected| prefix == expected),
        Err(_) => false,
    }
}

/// Encode a network prefix (single byte below 64, two bytes up to 16383)
fn encode_prefix(prefix: u16) -> Result<Vec<u8>, CoinError> {
    if prefix < 64 {
        Ok(vec![prefix as u8])
    } else if prefix < 16384 {
        let first = ((prefix & 0b0000_0000_1111_1100) as u8) >> 2 | 0b0100_0000;
        let second = ((prefix >> 8) as u8) | ((prefix & 0b0000_0000_0000_0011) as u8) << 6;
        Ok(vec![first, second])
    } else {
        Err(CoinError::InvalidTransaction(format!(
            "network prefix out of range: {}",
            prefix
        )))
    }
}

fn decode_prefix(data: &[u8]) -> Result<(u16, usize), CoinError> {
    if data[0] < 64 {
        Ok((data[0] as u16, 1))
    } else if data[0] < 128 {
        let lower = (data[0] & 0b0011_1111) << 2 | (data[1] >> 6);
        let upper = data[1] & 0b0011_1111;
        Ok((((upper as u16) << 8) | (lower as u16), 2))
    } else {
        Err(CoinError::ChecksumMismatch)
    }
}

fn ss58_checksum(payload: &[u8]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    hasher.update(CHECKSUM_SALT);
    hasher.update(payload);
    hasher.finalize().into()
}
