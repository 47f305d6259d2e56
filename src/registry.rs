//! Coin registry: the immutable table of supported coins
//!
//! Built eagerly once at startup and passed by reference to all consumers.
//! Nothing registers after construction, so unsynchronized concurrent reads
//! are safe.

use crate::deriver::{DerivedAddress, Deriver};
use crate::error::CoinError;
use crate::polkadot::{self, SubstrateDeriver, SubstrateParser};
use crate::transaction::{MetadataParser, ParsedTransaction};
use crate::utxo::{UtxoDeriver, UtxoParser};
use crate::AddressVariant;
use std::collections::HashMap;

/// Immutable per-coin descriptor composed from strategy objects
pub struct CoinDescriptor {
    coin_code: &'static str,
    decimals: u8,
    supported_account_paths: Vec<&'static str>,
    deriver: Box<dyn Deriver>,
    parser: Box<dyn MetadataParser>,
}

impl std::fmt::Debug for CoinDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinDescriptor")
            .field("coin_code", &self.coin_code)
            .field("decimals", &self.decimals)
            .field("supported_account_paths", &self.supported_account_paths)
            .finish_non_exhaustive()
    }
}

impl CoinDescriptor {
    pub fn new(
        coin_code: &'static str,
        decimals: u8,
        supported_account_paths: Vec<&'static str>,
        deriver: Box<dyn Deriver>,
        parser: Box<dyn MetadataParser>,
    ) -> Self {
        CoinDescriptor {
            coin_code,
            decimals,
            supported_account_paths,
            deriver,
            parser,
        }
    }

    pub fn coin_code(&self) -> &'static str {
        self.coin_code
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn supported_account_paths(&self) -> &[&'static str] {
        &self.supported_account_paths
    }

    /// Check a declared HD path against the coin's account roots
    ///
    /// Exact match only. A mismatch is a hard failure: it is how a malicious
    /// companion app would ask the device to sign with a path belonging to a
    /// different account or coin than the one displayed.
    pub fn check_hd_path(&self, hd_path: &str) -> Result<(), CoinError> {
        if self.supported_account_paths.iter().any(|p| *p == hd_path) {
            Ok(())
        } else {
            Err(CoinError::InvalidTransaction(format!(
                "invalid hdPath \"{}\" for {}",
                hd_path, self.coin_code
            )))
        }
    }

    pub fn deriver(&self) -> &dyn Deriver {
        self.deriver.as_ref()
    }

    pub fn parser(&self) -> &dyn MetadataParser {
        self.parser.as_ref()
    }
}

/// Static lookup table from coin code to descriptor
pub struct CoinRegistry {
    coins: HashMap<&'static str, CoinDescriptor>,
}

impl CoinRegistry {
    /// Build a registry from an explicit descriptor list
    pub fn new(descriptors: Vec<CoinDescriptor>) -> Self {
        let coins = descriptors
            .into_iter()
            .map(|d| (d.coin_code, d))
            .collect();
        CoinRegistry { coins }
    }

    /// Build the registry with the coins the device ships with
    pub fn with_default_coins() -> Self {
        CoinRegistry::new(vec![
            CoinDescriptor::new(
                "BTC",
                8,
                vec!["M/49'/0'/0'"],
                Box::new(UtxoDeriver::new(0x00, 0x05, AddressVariant::ScriptHash)),
                Box::new(UtxoParser),
            ),
            CoinDescriptor::new(
                "LTC",
                8,
                vec!["M/49'/2'/0'"],
                // Legacy addresses only: the script-hash variant would change
                // every previously shown LTC address.
                Box::new(UtxoDeriver::new(0x30, 0x32, AddressVariant::Legacy)),
                Box::new(UtxoParser),
            ),
            CoinDescriptor::new(
                "DOT",
                10,
                vec!["M/44'/354'/0'/0'/0'"],
                Box::new(SubstrateDeriver::new(polkadot::POLKADOT_PREFIX)),
                Box::new(SubstrateParser::polkadot()),
            ),
            CoinDescriptor::new(
                "KSM",
                12,
                vec!["M/44'/434'/0'/0'/0'"],
                Box::new(SubstrateDeriver::new(polkadot::KUSAMA_PREFIX)),
                Box::new(SubstrateParser::kusama()),
            ),
        ])
    }

    /// Look up a coin descriptor by code
    pub fn lookup(&self, coin_code: &str) -> Result<&CoinDescriptor, CoinError> {
        self.coins
            .get(coin_code)
            .ok_or_else(|| CoinError::UnknownCoin(coin_code.to_string()))
    }

    /// Parse untrusted transaction metadata for a coin
    ///
    /// Inbound interface for the device-transport collaborator. The HD-path
    /// check runs before any chain-specific parsing.
    pub fn parse_transaction(
        &self,
        coin_code: &str,
        metadata: &serde_json::Value,
        hd_path: &str,
    ) -> Result<ParsedTransaction, CoinError> {
        let coin = self.lookup(coin_code)?;
        coin.check_hd_path(hd_path)?;
        coin.parser().parse(coin, metadata, hd_path)
    }

    /// Derive a receiving address for display
    ///
    /// Inbound interface for the UI collaborator.
    pub fn derive_address(
        &self,
        coin_code: &str,
        xpub: &str,
        change: u32,
        index: u32,
    ) -> Result<DerivedAddress, CoinError> {
        self.lookup(coin_code)?.deriver().derive(xpub, change, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_coins() {
        let registry = CoinRegistry::with_default_coins();
        for code in ["BTC", "LTC", "DOT", "KSM"] {
            let coin = registry.lookup(code).unwrap();
            assert_eq!(coin.coin_code(), code);
        }
        assert_eq!(registry.lookup("DOT").unwrap().decimals(), 10);
        assert_eq!(registry.lookup("KSM").unwrap().decimals(), 12);
    }

    #[test]
    fn test_lookup_unknown_coin() {
        let registry = CoinRegistry::with_default_coins();
        assert_eq!(
            registry.lookup("DOGE").unwrap_err(),
            CoinError::UnknownCoin("DOGE".to_string())
        );
    }

    #[test]
    fn test_hd_path_exact_match_only() {
        let registry = CoinRegistry::with_default_coins();
        let ltc = registry.lookup("LTC").unwrap();
        assert!(ltc.check_hd_path("M/49'/2'/0'").is_ok());
        // BTC's root, a sub-path, and a case variant are all rejected
        for path in ["M/49'/0'/0'", "M/49'/2'/0'/0", "m/49'/2'/0'"] {
            assert!(matches!(
                ltc.check_hd_path(path),
                Err(CoinError::InvalidTransaction(_))
            ));
        }
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<CoinRegistry>();
    }
}
