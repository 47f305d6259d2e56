//! Bitcoin family: Base58Check addresses, BIP32 derivation, UTXO metadata

pub mod address;
mod deriver;
mod transaction;

pub use address::{decode_base58check, encode_base58check};
pub use deriver::UtxoDeriver;
pub use transaction::UtxoParser;
