//! Session pallet: `session.set_keys(keys, proof)`
//!
//! The Polkadot-family runtimes bundle six 32-byte session keys, in this
//! fixed order: grandpa, babe, im_online, para_validator, para_assignment,
//! authority_discovery. The proof is an opaque length-prefixed byte string.

use super::{read_vec_len, PalletDecoder, PalletRegistry};
use crate::error::CoinError;
use crate::polkadot::scale::ByteCursor;
use crate::transaction::DisplayField;

const SESSION_KEY_NAMES: [&str; 6] = [
    "grandpa",
    "babe",
    "imOnline",
    "paraValidator",
    "paraAssignment",
    "authorityDiscovery",
];

pub struct SetKeys;

impl PalletDecoder for SetKeys {
    fn name(&self) -> &'static str {
        "Session.SetKeys"
    }

    fn decode(
        &self,
        cursor: &mut ByteCursor,
        _registry: &PalletRegistry,
        _depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError> {
        let mut fields = Vec::with_capacity(SESSION_KEY_NAMES.len() + 1);
        for name in SESSION_KEY_NAMES {
            let key = cursor.read_array::<32>()?;
            fields.push(DisplayField::new(name, format!("0x{}", hex::encode(key))));
        }

        let proof_len = read_vec_len(cursor, 1)?;
        let proof = cursor.read_bytes(proof_len)?;
        fields.push(DisplayField::new("proof", format!("0x{}", hex::encode(proof))));
        Ok(fields)
    }
}
