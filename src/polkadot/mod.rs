//! Substrate family: SS58 addresses, SCALE call decoding, pallet registry

pub mod address;
mod deriver;
pub mod pallets;
pub mod scale;
mod transaction;

pub use address::{decode_ss58, encode_ss58, validate_ss58, KUSAMA_PREFIX, POLKADOT_PREFIX};
pub use deriver::SubstrateDeriver;
pub use pallets::{PalletDecoder, PalletRegistry, MAX_CALL_DEPTH};
pub use transaction::SubstrateParser;
