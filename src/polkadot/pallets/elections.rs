//! Elections-phragmen pallet: `elections.vote(votes, value)`
//!
//! Votes are raw 32-byte account ids (not MultiAddress), followed by the
//! compact-encoded stake backing them.

use super::{read_account_id, read_vec_len, PalletDecoder, PalletRegistry};
use crate::error::CoinError;
use crate::polkadot::scale::ByteCursor;
use crate::transaction::DisplayField;

pub struct Vote;

impl PalletDecoder for Vote {
    fn name(&self) -> &'static str {
        "Elections.Vote"
    }

    fn decode(
        &self,
        cursor: &mut ByteCursor,
        registry: &PalletRegistry,
        _depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError> {
        let count = read_vec_len(cursor, 32)?;
        let mut fields = Vec::with_capacity(count + 1);
        for _ in 0..count {
            fields.push(DisplayField::new("vote", read_account_id(cursor, registry)?));
        }
        let value = cursor.read_compact()?;
        fields.push(DisplayField::new("value", value.to_string()));
        Ok(fields)
    }
}
