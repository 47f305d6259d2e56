//! BIP32 address derivation for Bitcoin-derived chains

use crate::deriver::{AddressVariant, DerivedAddress, Deriver};
use crate::error::CoinError;
use crate::utxo::address::encode_base58check;
use bip32::{ChildNumber, XPub};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::str::FromStr;

/// Derives Base58Check addresses from an account-level xpub
///
/// The address variant is fixed at construction: legacy pay-to-pubkey-hash,
/// or script-hash wrapped segwit. Which one a coin uses is a deploy-time
/// policy, never runtime input.
pub struct UtxoDeriver {
    pubkey_version: u8,
    script_version: u8,
    variant: AddressVariant,
}

impl UtxoDeriver {
    pub fn new(pubkey_version: u8, script_version: u8, variant: AddressVariant) -> Self {
        UtxoDeriver {
            pubkey_version,
            script_version,
            variant,
        }
    }

    fn address_for_key(&self, pubkey: &[u8]) -> String {
        let pubkey_hash = hash160(pubkey);
        match self.variant {
            AddressVariant::ScriptHash => {
                // P2SH-wrapped segwit: redeem script is OP_0 PUSH20 <hash160(pk)>
                let mut redeem = Vec::with_capacity(22);
                redeem.extend_from_slice(&[0x00, 0x14]);
                redeem.extend_from_slice(&pubkey_hash);
                encode_base58check(&hash160(&redeem), self.script_version)
            }
            _ => encode_base58check(&pubkey_hash, self.pubkey_version),
        }
    }

    fn parse_xpub(xpub: &str) -> Result<XPub, CoinError> {
        XPub::from_str(xpub)
            .map_err(|e| CoinError::InvalidExtendedKey(format!("not a valid xpub: {}", e)))
    }
}

impl Deriver for UtxoDeriver {
    fn derive(&self, xpub: &str, change: u32, index: u32) -> Result<DerivedAddress, CoinError> {
        let account = Self::parse_xpub(xpub)?;
        let change_number = ChildNumber::new(change, false)?;
        let index_number = ChildNumber::new(index, false)?;
        let child = account
            .derive_child(change_number)?
            .derive_child(index_number)?;
        let public_key = child.public_key().to_sec1_bytes().to_vec();
        Ok(DerivedAddress {
            path: format!("{}/{}", change, index),
            address: self.address_for_key(&public_key),
            public_key,
            variant: self.variant,
        })
    }

    fn derive_master(&self, xpub: &str) -> Result<DerivedAddress, CoinError> {
        let account = Self::parse_xpub(xpub)?;
        let public_key = account.public_key().to_sec1_bytes().to_vec();
        Ok(DerivedAddress {
            path: String::new(),
            address: self.address_for_key(&public_key),
            public_key,
            variant: self.variant,
        })
    }
}

/// RIPEMD160(SHA256(data)), the UTXO-family public key hash
fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}
