//! coinlib: offline coin abstraction layer for a signing device
//!
//! This crate provides:
//! - Transaction metadata parsing (untrusted companion payloads into
//!   verified, human-readable intents)
//! - Receiving-address derivation from extended public keys
//! - Chain-specific address codecs (Base58Check, SS58)
//!
//! # Architecture
//!
//! The crate is organized around an immutable [`CoinRegistry`] built once at
//! startup: each coin descriptor composes a [`Deriver`] and a
//! [`MetadataParser`] strategy plus its decimals and account roots. Chain
//! families live in their own modules (`utxo`, `polkadot`); the Substrate
//! side dispatches call bodies through a [`polkadot::PalletRegistry`] keyed
//! by 2-byte call index.
//!
//! Everything is synchronous and side-effect free: no I/O, no logging, no
//! retained key material. Malformed or semantically inconsistent input fails
//! closed with a [`CoinError`]; there is no partial decoding.

pub mod deriver;
pub mod error;
pub mod polkadot;
pub mod registry;
pub mod transaction;
pub mod utxo;

// Re-export main types for convenience
pub use deriver::{AddressVariant, DerivedAddress, Deriver};
pub use error::CoinError;
pub use registry::{CoinDescriptor, CoinRegistry};
pub use transaction::{DisplayField, MetadataParser, ParsedTransaction};
