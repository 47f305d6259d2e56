//! Utility pallet: batch calls
//!
//! `utility.batch` and `utility.batch_all` wrap a vector of nested calls,
//! each decoded recursively through the same registry. Nesting depth is
//! bounded so adversarial input cannot recurse unboundedly.

use super::{read_vec_len, PalletDecoder, PalletRegistry};
use crate::error::CoinError;
use crate::polkadot::scale::ByteCursor;
use crate::transaction::DisplayField;

pub struct Batch {
    name: &'static str,
}

impl Batch {
    pub fn batch() -> Self {
        Batch {
            name: "Utility.Batch",
        }
    }

    pub fn batch_all() -> Self {
        Batch {
            name: "Utility.BatchAll",
        }
    }
}

impl PalletDecoder for Batch {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decode(
        &self,
        cursor: &mut ByteCursor,
        registry: &PalletRegistry,
        depth: u8,
    ) -> Result<Vec<DisplayField>, CoinError> {
        // Every nested call carries at least its 2-byte index
        let count = read_vec_len(cursor, 2)?;
        let mut fields = Vec::new();
        for position in 0..count {
            fields.push(DisplayField::new(
                "call",
                format!("{}/{}", position + 1, count),
            ));
            fields.extend(registry.decode_call(cursor, depth + 1)?);
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polkadot::pallets::MAX_CALL_DEPTH;

    fn transfer_call_body() -> Vec<u8> {
        let mut bytes = hex::decode("050000").unwrap();
        bytes.extend_from_slice(&[0x11u8; 32]);
        bytes.push(0x04); // compact 1
        bytes
    }

    /// Wrap `inner` in `levels` nested batch calls of one element each
    fn nested_batch(inner: Vec<u8>, levels: usize) -> Vec<u8> {
        let mut call = inner;
        for _ in 0..levels {
            let mut outer = hex::decode("1a00").unwrap();
            outer.push(0x04); // compact 1
            outer.extend_from_slice(&call);
            call = outer;
        }
        call
    }

    #[test]
    fn test_batch_decodes_nested_calls_in_order() {
        let registry = PalletRegistry::polkadot();
        let mut bytes = hex::decode("1a00").unwrap();
        bytes.push(0x08); // compact 2
        bytes.extend_from_slice(&transfer_call_body());
        bytes.extend_from_slice(&transfer_call_body());

        let mut cursor = ByteCursor::new(&bytes);
        let fields = registry.decode_call(&mut cursor, 0).unwrap();
        assert!(cursor.is_empty());

        let labels: Vec<&str> = fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "method", "call", "method", "dest", "value", "call", "method", "dest", "value"
            ]
        );
        assert_eq!(fields[0].value, "Utility.Batch");
        assert_eq!(fields[1].value, "1/2");
        assert_eq!(fields[5].value, "2/2");
    }

    #[test]
    fn test_batch_all_within_depth_limit() {
        let registry = PalletRegistry::polkadot();
        let bytes = nested_batch(transfer_call_body(), MAX_CALL_DEPTH as usize);
        let mut cursor = ByteCursor::new(&bytes);
        assert!(registry.decode_call(&mut cursor, 0).is_ok());
    }

    #[test]
    fn test_nesting_limit_exceeded() {
        let registry = PalletRegistry::polkadot();
        let bytes = nested_batch(transfer_call_body(), MAX_CALL_DEPTH as usize + 1);
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(
            registry.decode_call(&mut cursor, 0).unwrap_err(),
            CoinError::NestingLimitExceeded
        );
    }

    #[test]
    fn test_batch_with_unsupported_inner_call() {
        let registry = PalletRegistry::polkadot();
        let mut bytes = hex::decode("1a00").unwrap();
        bytes.push(0x04);
        bytes.extend_from_slice(&hex::decode("99990000").unwrap());
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(
            registry.decode_call(&mut cursor, 0).unwrap_err(),
            CoinError::UnsupportedCall(0x9999)
        );
    }

    #[test]
    fn test_batch_lying_count() {
        let registry = PalletRegistry::polkadot();
        let mut bytes = hex::decode("1a00").unwrap();
        bytes.push(0xfc); // declares 63 calls, none follow
        let mut cursor = ByteCursor::new(&bytes);
        assert!(matches!(
            registry.decode_call(&mut cursor, 0),
            Err(CoinError::InvalidTransaction(_))
        ));
    }
}
