//! Address derivation for Substrate-derived chains
//!
//! The extended key serialization for this family embeds the ed25519 account
//! public key as the last 32 payload bytes of a Base58Check string. There is
//! no soft child derivation: every `(change, index)` maps to the account
//! address itself.

use crate::deriver::{AddressVariant, DerivedAddress, Deriver};
use crate::error::CoinError;
use crate::polkadot::address::encode_ss58;
use crate::utxo::address::decode_base58check;

pub struct SubstrateDeriver {
    prefix: u16,
}

impl SubstrateDeriver {
    pub fn new(prefix: u16) -> Self {
        SubstrateDeriver { prefix }
    }

    fn account_address(&self, xpub: &str) -> Result<DerivedAddress, CoinError> {
        let (payload, _version) = decode_base58check(xpub)
            .map_err(|e| CoinError::InvalidExtendedKey(e.to_string()))?;
        if payload.len() < 32 {
            return Err(CoinError::InvalidExtendedKey(format!(
                "payload too short for an account key: {} bytes",
                payload.len()
            )));
        }

        let public_key = payload[payload.len() - 32..].to_vec();
        let address = encode_ss58(&public_key, self.prefix)?;
        Ok(DerivedAddress {
            path: String::new(),
            public_key,
            address,
            variant: AddressVariant::Ss58,
        })
    }
}

impl Deriver for SubstrateDeriver {
    fn derive(&self, xpub: &str, _change: u32, _index: u32) -> Result<DerivedAddress, CoinError> {
        self.account_address(xpub)
    }

    fn derive_master(&self, xpub: &str) -> Result<DerivedAddress, CoinError> {
        self.account_address(xpub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polkadot::address::{decode_ss58, POLKADOT_PREFIX};
    use crate::utxo::address::encode_base58check;

    /// Base58Check string whose payload ends with the given account key
    fn fake_xpub(account: &[u8; 32]) -> String {
        let mut payload = vec![0xde, 0xad, 0xbe, 0xef]; // serialization header
        payload.extend_from_slice(account);
        encode_base58check(&payload, 0x01)
    }

    #[test]
    fn test_derive_ignores_change_and_index() {
        let deriver = SubstrateDeriver::new(POLKADOT_PREFIX);
        let xpub = fake_xpub(&[0x42u8; 32]);
        let a = deriver.derive(&xpub, 0, 0).unwrap();
        let b = deriver.derive(&xpub, 1, 7).unwrap();
        let c = deriver.derive_master(&xpub).unwrap();
        assert_eq!(a.address, b.address);
        assert_eq!(a.address, c.address);
        assert_eq!(a.variant, AddressVariant::Ss58);
    }

    #[test]
    fn test_derived_address_encodes_account_key() {
        let account = [0x42u8; 32];
        let deriver = SubstrateDeriver::new(POLKADOT_PREFIX);
        let derived = deriver.derive(&fake_xpub(&account), 0, 0).unwrap();
        assert_eq!(derived.public_key, account);

        let (decoded, prefix) = decode_ss58(&derived.address).unwrap();
        assert_eq!(decoded, account);
        assert_eq!(prefix, POLKADOT_PREFIX);
    }

    #[test]
    fn test_corrupted_xpub_rejected() {
        let deriver = SubstrateDeriver::new(POLKADOT_PREFIX);
        let mut xpub = fake_xpub(&[0x42u8; 32]);
        let last = xpub.pop().unwrap();
        xpub.push(if last == '2' { '3' } else { '2' });
        assert!(matches!(
            deriver.derive(&xpub, 0, 0),
            Err(CoinError::InvalidExtendedKey(_))
        ));
        assert!(matches!(
            deriver.derive("0OIl", 0, 0),
            Err(CoinError::InvalidExtendedKey(_))
        ));
    }

    #[test]
    fn test_short_payload_rejected() {
        let deriver = SubstrateDeriver::new(POLKADOT_PREFIX);
        let xpub = encode_base58check(&[0u8; 16], 0x01);
        assert!(matches!(
            deriver.derive(&xpub, 0, 0),
            Err(CoinError::InvalidExtendedKey(_))
        ));
    }
}
