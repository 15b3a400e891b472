//! The small fixed-shape primitives: `BOOLEAN`, `NULL`, and `ENUMERATED`.

use alloc::vec::Vec;

use super::integer::{decode_bigint, encode_bigint};
use crate::error::DecodeError;
use num_bigint::BigInt;

/// Encodes BOOLEAN content: `0x00` for false, `0xFF` for true (the DER
/// canonical true encoding; BER permits any nonzero octet but this codec
/// only ever produces `0xFF`).
pub fn encode_boolean(value: bool) -> Vec<u8> {
    alloc::vec![if value { 0xff } else { 0x00 }]
}

/// Decodes BOOLEAN content. Per DER, any nonzero octet is accepted as true
/// on decode even though only `0xFF` is ever produced on encode.
pub fn decode_boolean(content: &[u8]) -> Result<bool, DecodeError> {
    match content {
        [single] => Ok(*single != 0x00),
        _ => Err(DecodeError::invalid_content("BOOLEAN: content must be exactly one octet")),
    }
}

/// Encodes NULL content: always empty.
pub fn encode_null() -> Vec<u8> {
    Vec::new()
}

/// Decodes NULL content, which must be empty.
pub fn decode_null(content: &[u8]) -> Result<(), DecodeError> {
    if content.is_empty() {
        Ok(())
    } else {
        Err(DecodeError::invalid_content("NULL: content must be empty"))
    }
}

/// Encodes ENUMERATED content using the same minimal two's-complement rule
/// as INTEGER.
pub fn encode_enumerated(value: &BigInt) -> Vec<u8> {
    encode_bigint(value)
}

/// Decodes ENUMERATED content using the same minimality rule as INTEGER.
pub fn decode_enumerated(content: &[u8]) -> Result<BigInt, DecodeError> {
    decode_bigint(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_false_is_zero_octet() {
        assert_eq!(encode_boolean(false), alloc::vec![0x00]);
        assert_eq!(decode_boolean(&[0x00]).unwrap(), false);
    }

    #[test]
    fn boolean_true_is_ff() {
        assert_eq!(encode_boolean(true), alloc::vec![0xff]);
        assert_eq!(decode_boolean(&[0xff]).unwrap(), true);
    }

    #[test]
    fn boolean_accepts_any_nonzero_octet_on_decode() {
        assert_eq!(decode_boolean(&[0x01]).unwrap(), true);
    }

    #[test]
    fn boolean_rejects_wrong_length() {
        assert!(decode_boolean(&[]).is_err());
        assert!(decode_boolean(&[0x00, 0x00]).is_err());
    }

    #[test]
    fn null_round_trips() {
        assert_eq!(encode_null(), Vec::<u8>::new());
        assert!(decode_null(&[]).is_ok());
        assert!(decode_null(&[0x00]).is_err());
    }

    #[test]
    fn enumerated_round_trips() {
        let value = BigInt::from(113549);
        assert_eq!(decode_enumerated(&encode_enumerated(&value)).unwrap(), value);
    }
}
