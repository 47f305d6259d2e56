//! Balances pallet: transfer calls
//!
//! Schema for both calls: destination (MultiAddress), then a compact-encoded
//! balance in planck. Destination renders before amount, matching the order a
//! reviewer expects.

use super::{read_account, PalletDecoder, PalletRegistry};
use crate::error::CoinError;
use crate::polkadot::scale::ByteCursor;
use crate::transaction::DisplayField;

pub struct Transfer;

impl PalletDecoder for Transfer {
    fn name(&self) -> &'static str {
        "Balances.Transfer"
    }

    fn decode(
        &self,
        cursor: &mut ByteCursor,
        registry: &PalletRegistry,
        _depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError> {
        transfer_fields(cursor, registry)
    }
}

pub struct TransferKeepAlive;

impl PalletDecoder for TransferKeepAlive {
    fn name(&self) -> &'static str {
        "Balances.TransferKeepAlive"
    }

    fn decode(
        &self,
        cursor: &mut ByteCursor,
        registry: &PalletRegistry,
        _depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError> {
        transfer_fields(cursor, registry)
    }
}

fn transfer_fields(
    cursor: &mut ByteCursor,
    registry: &PalletRegistry,
) -> Result<Vec<DisplayField>, CoinError> {
    let dest = read_account(cursor, registry)?;
    let value = cursor.read_compact()?;
    Ok(vec![
        DisplayField::new("dest", dest),
        DisplayField::new("value", value.to_string()),
    ])
}
