//! SCALE decoding primitives for Substrate call bodies
//!
//! Call encodings are positional: fields are read in schema order from a
//! forward-only cursor, with every read bounds-checked. Truncation is a hard
//! failure.

use crate::error::CoinError;

/// Forward-only cursor over an untrusted SCALE-encoded byte slice
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteCursor { bytes, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_byte(&mut self) -> Result<u8, CoinError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CoinError> {
        if self.remaining() < len {
            return Err(truncated(len, self.remaining()));
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CoinError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Read a 2-byte call index (pallet index, then call index within it)
    pub fn read_call_index(&mut self) -> Result<u16, CoinError> {
        let bytes = self.read_array::<2>()?;
        Ok(u16::from_be_bytes(bytes))
    }

    /// Decode a SCALE compact-encoded unsigned integer
    ///
    /// The two low bits of the first byte select the mode: single byte,
    /// two-byte, four-byte, or big-integer with an explicit length.
    pub fn read_compact(&mut self) -> Result<u128, CoinError> {
        let first = self.read_byte()?;
        match first & 0b11 {
            0b00 => Ok((first >> 2) as u128),
            0b01 => {
                let second = self.read_byte()?;
                Ok((u16::from_le_bytes([first, second]) >> 2) as u128)
            }
            0b10 => {
                let rest = self.read_array::<3>()?;
                let word = u32::from_le_bytes([first, rest[0], rest[1], rest[2]]);
                Ok((word >> 2) as u128)
            }
            _ => {
                let len = ((first >> 2) + 4) as usize;
                if len > 16 {
                    return Err(CoinError::InvalidTransaction(format!(
                        "compact integer wider than 128 bits ({} bytes)",
                        len
                    )));
                }
                let bytes = self.read_bytes(len)?;
                let mut value = 0u128;
                for (i, b) in bytes.iter().enumerate() {
                    value |= (*b as u128) << (8 * i);
                }
                Ok(value)
            }
        }
    }
}

fn truncated(wanted: usize, available: usize) -> CoinError {
    CoinError::InvalidTransaction(format!(
        "truncated call data: wanted {} bytes, {} remaining",
        wanted, available
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("00", 0)]
    #[case("04", 1)]
    #[case("fc", 63)]
    #[case("0101", 64)]
    #[case("fdff", 16383)]
    #[case("02000100", 16384)]
    #[case("feffffff", 1073741823)]
    #[case("0300000040", 1073741824)]
    #[case("070010a5d4e8", 1_000_000_000_000)]
    fn test_compact_decoding(#[case] encoded: &str, #[case] expected: u128) {
        let bytes = hex::decode(encoded).unwrap();
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_compact().unwrap(), expected);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_compact_truncated() {
        for encoded in ["", "01", "02ff", "0700"] {
            let bytes = hex::decode(encoded).unwrap();
            let mut cursor = ByteCursor::new(&bytes);
            assert!(matches!(
                cursor.read_compact(),
                Err(CoinError::InvalidTransaction(_))
            ));
        }
    }

    #[test]
    fn test_compact_too_wide() {
        // Mode 0b11 with a declared width above 16 bytes
        let mut bytes = vec![0x47u8];
        bytes.extend_from_slice(&[0xff; 17]);
        let mut cursor = ByteCursor::new(&bytes);
        assert!(matches!(
            cursor.read_compact(),
            Err(CoinError::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_call_index_big_endian() {
        let bytes = [0x05u8, 0x00, 0xaa];
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_call_index().unwrap(), 0x0500);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn test_read_past_end() {
        let mut cursor = ByteCursor::new(&[1, 2]);
        assert!(cursor.read_bytes(3).is_err());
        // A failed read consumes nothing
        assert_eq!(cursor.read_bytes(2).unwrap(), &[1, 2]);
        assert!(cursor.read_byte().is_err());
    }
}
