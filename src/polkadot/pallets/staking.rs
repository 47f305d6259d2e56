//! Staking pallet calls

use super::{read_account, PalletDecoder, PalletRegistry};
use crate::error::CoinError;
use crate::polkadot::scale::ByteCursor;
use crate::transaction::DisplayField;

/// `staking.bond(controller, value, payee)`
pub struct Bond;

impl PalletDecoder for Bond {
    fn name(&self) -> &'static str {
        "Staking.Bond"
    }

    fn decode(
        &self,
        cursor: &mut ByteCursor,
        registry: &PalletRegistry,
        _depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError> {
        let controller = read_account(cursor, registry)?;
        let value = cursor.read_compact()?;
        let payee = decode_payee(cursor, registry)?;
        Ok(vec![
            DisplayField::new("controller", controller),
            DisplayField::new("value", value.to_string()),
            DisplayField::new("payee", payee),
        ])
    }
}

/// `staking.validate(prefs)` where prefs is a compact commission in perbill
pub struct Validate;

impl PalletDecoder for Validate {
    fn name(&self) -> &'static str {
        "Staking.Validate"
    }

    fn decode(
        &self,
        cursor: &mut ByteCursor,
        _registry: &PalletRegistry,
        _depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError> {
        let commission = cursor.read_compact()?;
        Ok(vec![DisplayField::new(
            "commission",
            commission.to_string(),
        )])
    }
}

/// `staking.nominate(targets)`
pub struct Nominate;

impl PalletDecoder for Nominate {
    fn name(&self) -> &'static str {
        "Staking.Nominate"
    }

    fn decode(
        &self,
        cursor: &mut ByteCursor,
        registry: &PalletRegistry,
        _depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError> {
        let count = super::read_vec_len(cursor, 33)?;
        let mut fields = Vec::with_capacity(count);
        for _ in 0..count {
            fields.push(DisplayField::new("target", read_account(cursor, registry)?));
        }
        Ok(fields)
    }
}

/// `staking.set_controller(controller)`
pub struct SetController;

impl PalletDecoder for SetController {
    fn name(&self) -> &'static str {
        "Staking.SetController"
    }

    fn decode(
        &self,
        cursor: &mut ByteCursor,
        registry: &PalletRegistry,
        _depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError> {
        let controller = read_account(cursor, registry)?;
        Ok(vec![DisplayField::new("controller", controller)])
    }
}

/// Reward destination for bonded funds
fn decode_payee(cursor: &mut ByteCursor, registry: &PalletRegistry) -> Result<String, CoinError> {
    match cursor.read_byte()? {
        0 => Ok("Staked".to_string()),
        1 => Ok("Stash".to_string()),
        2 => Ok("Controller".to_string()),
        3 => super::read_account_id(cursor, registry),
        other => Err(CoinError::InvalidTransaction(format!(
            "unknown reward destination: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polkadot::address::encode_ss58;

    #[test]
    fn test_bond_schema_order() {
        let registry = PalletRegistry::polkadot();
        let controller = [0x22u8; 32];
        let mut bytes = hex::decode("070000").unwrap();
        bytes.extend_from_slice(&controller);
        bytes.extend_from_slice(&hex::decode("0b00407a10f35a").unwrap()); // 100_000_000_000_000
        bytes.push(0x00); // payee = Staked

        let mut cursor = ByteCursor::new(&bytes);
        let fields = registry.decode_call(&mut cursor, 0).unwrap();
        assert!(cursor.is_empty());

        let labels: Vec<&str> = fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["method", "controller", "value", "payee"]);
        assert_eq!(fields[2].value, "100000000000000");
        assert_eq!(fields[3].value, "Staked");
    }

    #[test]
    fn test_bond_account_payee() {
        let registry = PalletRegistry::polkadot();
        let controller = [0x22u8; 32];
        let payee = [0x33u8; 32];
        let mut bytes = hex::decode("070000").unwrap();
        bytes.extend_from_slice(&controller);
        bytes.push(0x04); // compact 1
        bytes.push(0x03); // payee = Account
        bytes.extend_from_slice(&payee);

        let mut cursor = ByteCursor::new(&bytes);
        let fields = registry.decode_call(&mut cursor, 0).unwrap();
        assert_eq!(
            fields[3].value,
            encode_ss58(&payee, registry.address_prefix()).unwrap()
        );
    }

    #[test]
    fn test_bond_unknown_payee_rejected() {
        let registry = PalletRegistry::polkadot();
        let mut bytes = hex::decode("070000").unwrap();
        bytes.extend_from_slice(&[0u8; 32]);
        bytes.push(0x04);
        bytes.push(0x07); // not a reward destination
        let mut cursor = ByteCursor::new(&bytes);
        assert!(matches!(
            registry.decode_call(&mut cursor, 0),
            Err(CoinError::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_nominate_targets() {
        let registry = PalletRegistry::polkadot();
        let mut bytes = hex::decode("0705").unwrap();
        bytes.push(0x08); // compact 2
        for fill in [0x44u8, 0x55] {
            bytes.push(0x00);
            bytes.extend_from_slice(&[fill; 32]);
        }

        let mut cursor = ByteCursor::new(&bytes);
        let fields = registry.decode_call(&mut cursor, 0).unwrap();
        assert!(cursor.is_empty());
        assert_eq!(fields.len(), 3); // method + 2 targets
        assert_eq!(fields[1].label, "target");
        assert_eq!(fields[2].label, "target");
        assert_ne!(fields[1].value, fields[2].value);
    }

    #[test]
    fn test_validate_commission() {
        let registry = PalletRegistry::polkadot();
        // compact 50_000_000 (5% in perbill): mode 0b10 word
        let mut bytes = hex::decode("0704").unwrap();
        bytes.extend_from_slice(&((50_000_000u32 << 2) | 0b10).to_le_bytes());
        let mut cursor = ByteCursor::new(&bytes);
        let fields = registry.decode_call(&mut cursor, 0).unwrap();
        assert_eq!(fields[1], DisplayField::new("commission", "50000000"));
    }

    #[test]
    fn test_set_controller() {
        let registry = PalletRegistry::polkadot();
        let controller = [0x66u8; 32];
        let mut bytes = hex::decode("070800").unwrap();
        bytes.extend_from_slice(&controller);
        let mut cursor = ByteCursor::new(&bytes);
        let fields = registry.decode_call(&mut cursor, 0).unwrap();
        assert_eq!(
            fields[1].value,
            encode_ss58(&controller, registry.address_prefix()).unwrap()
        );
    }
}
