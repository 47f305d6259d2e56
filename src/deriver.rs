//! Address derivation contract shared by all chain families

use crate::error::CoinError;
use serde::Serialize;

/// Address format variant for a coin
///
/// Selected per coin at registry construction time, never from runtime input:
/// changing the variant retroactively would change every previously shown
/// address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressVariant {
    /// Pay-to-pubkey-hash, Base58Check encoded
    Legacy,
    /// Script-hash wrapped segwit, Base58Check encoded
    ScriptHash,
    /// SS58 account address (Substrate family)
    Ss58,
}

/// A derived receiving address
///
/// Stateless and recomputed on demand; the extended key is never retained by
/// the derivation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedAddress {
    /// Relative derivation path below the account root (e.g. "0/5")
    pub path: String,
    /// Public key the address commits to (compressed SEC1 or raw ed25519)
    pub public_key: Vec<u8>,
    /// Text address for on-screen verification
    pub address: String,
    /// Address format variant in effect
    pub variant: AddressVariant,
}

/// Deterministic address derivation from an extended public key
pub trait Deriver: Send + Sync {
    /// Derive the address for a `(change, index)` child of the account key
    fn derive(&self, xpub: &str, change: u32, index: u32) -> Result<DerivedAddress, CoinError>;

    /// Derive the address of the account key itself, without child derivation
    fn derive_master(&self, xpub: &str) -> Result<DerivedAddress, CoinError>;
}
