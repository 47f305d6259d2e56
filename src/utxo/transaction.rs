//! Transaction metadata parsing for Bitcoin-derived chains
//!
//! Metadata schema: `outputs` (non-empty array of `{address, value,
//! isChange?}`) and `fee`, all values in satoshi-scale minor units. Change
//! outputs are hidden from the review screen; the spend amount is the sum of
//! the non-change outputs.

use crate::error::CoinError;
use crate::registry::CoinDescriptor;
use crate::transaction::{
    metadata_str, metadata_u128, to_display_amount, DisplayField, MetadataParser,
    ParsedTransaction,
};

pub struct UtxoParser;

struct Output {
    address: String,
    value: u128,
    is_change: bool,
}

impl MetadataParser for UtxoParser {
    fn parse(
        &self,
        coin: &CoinDescriptor,
        metadata: &serde_json::Value,
        hd_path: &str,
    ) -> Result<ParsedTransaction, CoinError> {
        let outputs = parse_outputs(metadata)?;
        let fee = metadata_u128(metadata, "fee")?;

        let spend: Vec<&Output> = outputs.iter().filter(|o| !o.is_change).collect();
        let to = spend
            .first()
            .map(|o| o.address.clone())
            .ok_or_else(|| {
                CoinError::InvalidTransaction("all outputs are change outputs".to_string())
            })?;
        let amount_units: u128 = spend.iter().map(|o| o.value).sum();

        let decimals = coin.decimals();
        let amount = to_display_amount(amount_units, decimals);
        let fee = to_display_amount(fee, decimals);

        let mut fields = Vec::with_capacity(spend.len() + 1);
        for output in &spend {
            fields.push(DisplayField::new(
                "to",
                format!(
                    "{}  {}",
                    output.address,
                    to_display_amount(output.value, decimals)
                ),
            ));
        }
        fields.push(DisplayField::new("fee", fee.to_string()));

        Ok(ParsedTransaction {
            coin_code: coin.coin_code().to_string(),
            to,
            amount,
            fee,
            hd_path: hd_path.to_string(),
            fields,
        })
    }
}

fn parse_outputs(metadata: &serde_json::Value) -> Result<Vec<Output>, CoinError> {
    let entries = metadata
        .get("outputs")
        .and_then(|v| v.as_array())
        .ok_or_else(|| CoinError::InvalidTransaction("missing field \"outputs\"".to_string()))?;

    if entries.is_empty() {
        return Err(CoinError::InvalidTransaction(
            "empty outputs".to_string(),
        ));
    }

    entries
        .iter()
        .map(|entry| {
            Ok(Output {
                address: metadata_str(entry, "address")?.to_string(),
                value: metadata_u128(entry, "value")?,
                is_change: entry
                    .get("isChange")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false),
            })
        })
        .collect()
}
