//! Transaction metadata parsing for Substrate-derived chains
//!
//! Metadata schema: required `dest` and `value`, optional `tip`, optional
//! `callData` (hex-encoded call body decoded through the pallet registry).
//! Protocol fields the device must still commit to when the companion omits
//! them are filled from the named defaults below, identically on every parse.

use crate::error::CoinError;
use crate::polkadot::pallets::PalletRegistry;
use crate::polkadot::scale::ByteCursor;
use crate::registry::CoinDescriptor;
use crate::transaction::{
    metadata_str, metadata_u128, metadata_u128_or, to_display_amount, DisplayField,
    MetadataParser, ParsedTransaction,
};

// Values committed to when the companion payload omits them. These mirror the
// runtime defaults the signing payload is built with; revisit on runtime
// upgrades that change transaction mortality.
const DEFAULT_NONCE: u128 = 0;
const DEFAULT_IMPL_VERSION: u128 = 0;
const DEFAULT_AUTHORING_VERSION: u128 = 0;
const DEFAULT_ERA_PERIOD: u32 = 4096;

pub struct SubstrateParser {
    pallets: PalletRegistry,
}

impl SubstrateParser {
    pub fn new(pallets: PalletRegistry) -> Self {
        SubstrateParser { pallets }
    }

    pub fn polkadot() -> Self {
        SubstrateParser::new(PalletRegistry::polkadot())
    }

    pub fn kusama() -> Self {
        SubstrateParser::new(PalletRegistry::kusama())
    }

    /// Decode a hex call body through the pallet registry
    fn decode_call_data(&self, call_data: &str) -> Result<Vec<DisplayField>, CoinError> {
        let hex_str = call_data.strip_prefix("0x").unwrap_or(call_data);
        let bytes = hex::decode(hex_str)
            .map_err(|e| CoinError::InvalidTransaction(format!("malformed callData: {}", e)))?;

        let mut cursor = ByteCursor::new(&bytes);
        let fields = self.pallets.decode_call(&mut cursor, 0)?;
        if !cursor.is_empty() {
            return Err(CoinError::InvalidTransaction(format!(
                "{} trailing bytes after call",
                cursor.remaining()
            )));
        }
        Ok(fields)
    }
}

impl MetadataParser for SubstrateParser {
    fn parse(
        &self,
        coin: &CoinDescriptor,
        metadata: &serde_json::Value,
        hd_path: &str,
    ) -> Result<ParsedTransaction, CoinError> {
        let dest = metadata_str(metadata, "dest")?;
        let value = metadata_u128(metadata, "value")?;
        let tip = metadata_u128_or(metadata, "tip", 0)?;
        let nonce = metadata_u128_or(metadata, "nonce", DEFAULT_NONCE)?;
        let impl_version = metadata_u128_or(metadata, "implVersion", DEFAULT_IMPL_VERSION)?;
        let authoring_version =
            metadata_u128_or(metadata, "authoringVersion", DEFAULT_AUTHORING_VERSION)?;

        let decimals = coin.decimals();
        let amount = to_display_amount(value, decimals);
        let fee = to_display_amount(tip, decimals);

        let mut fields = vec![
            DisplayField::new("dest", dest),
            DisplayField::new("value", value.to_string()),
            DisplayField::new("tip", tip.to_string()),
            DisplayField::new("nonce", nonce.to_string()),
            DisplayField::new("implVersion", impl_version.to_string()),
            DisplayField::new("authoringVersion", authoring_version.to_string()),
            DisplayField::new("eraPeriod", DEFAULT_ERA_PERIOD.to_string()),
        ];

        if let Some(call_data) = metadata.get("callData") {
            let call_data = call_data.as_str().ok_or_else(|| {
                CoinError::InvalidTransaction("callData must be a hex string".to_string())
            })?;
            fields.extend(self.decode_call_data(call_data)?);
        }

        Ok(ParsedTransaction {
            coin_code: coin.coin_code().to_string(),
            to: dest.to_string(),
            amount,
            fee,
            hd_path: hd_path.to_string(),
            fields,
        })
    }
}
