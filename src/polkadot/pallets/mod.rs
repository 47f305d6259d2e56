//! Pallet call decoding for Substrate-derived chains
//!
//! A call body starts with a 2-byte call index (pallet index, then the call's
//! index within that pallet). The registry maps each supported index to a
//! decoder that knows the call's fixed field schema. An index without an
//! entry is a hard failure: guessing a generic layout would silently
//! misrender fields on the review screen, the single most dangerous failure
//! mode for a signing device.

mod balances;
mod elections;
mod session;
mod staking;
mod utility;

use crate::error::CoinError;
use crate::polkadot::address::{encode_ss58, KUSAMA_PREFIX, POLKADOT_PREFIX};
use crate::polkadot::scale::ByteCursor;
use crate::transaction::DisplayField;
use std::collections::HashMap;

pub use balances::{Transfer, TransferKeepAlive};
pub use elections::Vote;
pub use session::SetKeys;
pub use staking::{Bond, Nominate, SetController, Validate};
pub use utility::Batch;

/// Maximum depth of nested batch calls
pub const MAX_CALL_DEPTH: u8 = 4;

/// Decoder for one on-chain call's argument layout
///
/// Fields are decoded in schema order from the cursor and emitted in that
/// same order; call encodings are positional, so there is no reordering or
/// optional-field skipping.
pub trait PalletDecoder: Send + Sync {
    /// Display name in `Pallet.Call` form
    fn name(&self) -> &'static str;

    /// Decode the call's arguments into ordered display fields
    fn decode(
        &self,
        cursor: &mut ByteCursor,
        registry: &PalletRegistry,
        depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError>;
}

/// Immutable dispatch table from call index to decoder
///
/// Built once per network at registry construction; call indices differ
/// between runtimes, so Polkadot and Kusama each get their own table.
pub struct PalletRegistry {
    address_prefix: u16,
    calls: HashMap<u16, Box<dyn PalletDecoder>>,
}

impl PalletRegistry {
    pub fn new(address_prefix: u16, calls: Vec<(u16, Box<dyn PalletDecoder>)>) -> Self {
        PalletRegistry {
            address_prefix,
            calls: calls.into_iter().collect(),
        }
    }

    /// Call index table for the Polkadot runtime
    pub fn polkadot() -> Self {
        PalletRegistry::new(
            POLKADOT_PREFIX,
            vec![
                (0x0500, Box::new(Transfer) as Box<dyn PalletDecoder>),
                (0x0503, Box::new(TransferKeepAlive)),
                (0x0700, Box::new(Bond)),
                (0x0704, Box::new(Validate)),
                (0x0705, Box::new(Nominate)),
                (0x0708, Box::new(SetController)),
                (0x0900, Box::new(SetKeys)),
                (0x1100, Box::new(Vote)),
                (0x1a00, Box::new(Batch::batch())),
                (0x1a02, Box::new(Batch::batch_all())),
            ],
        )
    }

    /// Call index table for the Kusama runtime
    pub fn kusama() -> Self {
        PalletRegistry::new(
            KUSAMA_PREFIX,
            vec![
                (0x0400, Box::new(Transfer) as Box<dyn PalletDecoder>),
                (0x0403, Box::new(TransferKeepAlive)),
                (0x0600, Box::new(Bond)),
                (0x0604, Box::new(Validate)),
                (0x0605, Box::new(Nominate)),
                (0x0608, Box::new(SetController)),
                (0x0800, Box::new(SetKeys)),
                (0x1000, Box::new(Vote)),
                (0x1800, Box::new(Batch::batch())),
                (0x1802, Box::new(Batch::batch_all())),
            ],
        )
    }

    pub fn address_prefix(&self) -> u16 {
        self.address_prefix
    }

    /// Decode one call (index plus arguments) from the cursor
    ///
    /// `depth` is 0 for a top-level call and increments through nested batch
    /// calls; adversarial nesting is cut off at `MAX_CALL_DEPTH`.
    pub fn decode_call(
        &self,
        cursor: &mut ByteCursor,
        depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError> {
        if depth > MAX_CALL_DEPTH {
            return Err(CoinError::NestingLimitExceeded);
        }

        let index = cursor.read_call_index()?;
        let decoder = self
            .calls
            .get(&index)
            .ok_or(CoinError::UnsupportedCall(index))?;

        let mut fields = vec![DisplayField::new("method", decoder.name())];
        fields.extend(decoder.decode(cursor, self, depth)?);
        Ok(fields)
    }
}

/// Read a MultiAddress and render it as an SS58 address
///
/// Only the `Id` variant (a raw 32-byte account id) is accepted; the index,
/// raw and address-N variants never appear in payloads this device signs.
fn read_account(cursor: &mut ByteCursor, registry: &PalletRegistry) -> Result<String, CoinError> {
    let variant = cursor.read_byte()?;
    if variant != 0x00 {
        return Err(CoinError::InvalidTransaction(format!(
            "unsupported address variant: {}",
            variant
        )));
    }
    read_account_id(cursor, registry)
}

/// Read a vector length and bound it by the bytes actually present
///
/// Each element consumes at least `min_element_size` bytes, so a declared
/// length larger than the remaining input is a lie; rejecting it up front
/// keeps a hostile payload from forcing a huge allocation.
fn read_vec_len(cursor: &mut ByteCursor, min_element_size: usize) -> Result<usize, CoinError> {
    let declared = cursor.read_compact()?;
    let max = (cursor.remaining() / min_element_size.max(1)) as u128;
    if declared > max {
        return Err(CoinError::InvalidTransaction(format!(
            "declared length {} exceeds remaining input",
            declared
        )));
    }
    Ok(declared as usize)
}

/// Read a raw 32-byte account id and render it as an SS58 address
fn read_account_id(
    cursor: &mut ByteCursor,
    registry: &PalletRegistry,
) -> Result<String, CoinError> {
    let account = cursor.read_array::<32>()?;
    encode_ss58(&account, registry.address_prefix)
}
