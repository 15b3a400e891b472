//! DER `INTEGER` (and `ENUMERATED`) encoding: minimum-length two's-complement.

use alloc::vec::Vec;
use num_bigint::{BigInt, Sign};

use crate::error::{DecodeError, EncodeError};

/// Canonicalizes an already two's-complement big-endian byte sequence by
/// stripping a redundant leading `0x00` (when the next byte's MSB is clear)
/// or a redundant leading `0xFF` (when the next byte's MSB is set).
///
/// Fails with [`EncodeError::InvalidContent`] if `value` is empty.
pub fn encode_integer_bytes(value: &[u8]) -> Result<Vec<u8>, EncodeError> {
    if value.is_empty() {
        return Err(EncodeError::invalid_content("INTEGER: empty content"));
    }

    let mut start = 0;
    while start + 1 < value.len() {
        let (byte, next) = (value[start], value[start + 1]);
        let redundant = (byte == 0x00 && next & 0x80 == 0) || (byte == 0xff && next & 0x80 != 0);
        if redundant {
            start += 1;
        } else {
            break;
        }
    }

    Ok(value[start..].to_vec())
}

/// Encodes a [`BigInt`] as minimum-length DER INTEGER content.
pub fn encode_bigint(value: &BigInt) -> Vec<u8> {
    if value.sign() == Sign::NoSign {
        return alloc::vec![0u8];
    }
    value.to_signed_bytes_be()
}

/// Decodes DER INTEGER content, rejecting non-minimal encodings.
pub fn decode_bigint(content: &[u8]) -> Result<BigInt, DecodeError> {
    if content.is_empty() {
        return Err(DecodeError::invalid_content("INTEGER: empty content"));
    }
    if content.len() > 1 {
        let (byte, next) = (content[0], content[1]);
        let redundant = (byte == 0x00 && next & 0x80 == 0) || (byte == 0xff && next & 0x80 != 0);
        if redundant {
            return Err(DecodeError::invalid_content(
                "INTEGER: non-minimal leading octet",
            ));
        }
    }
    Ok(BigInt::from_signed_bytes_be(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_as_single_zero_octet() {
        assert_eq!(encode_bigint(&BigInt::from(0)), alloc::vec![0x00]);
    }

    #[test]
    fn boundary_values_round_trip() {
        for v in [0i64, 1, -1, 127, -128, 32767, -32768, i64::MAX, i64::MIN] {
            let big = BigInt::from(v);
            let bytes = encode_bigint(&big);
            assert_eq!(decode_bigint(&bytes).unwrap(), big);
        }
    }

    #[test]
    fn non_minimal_leading_zero_is_rejected() {
        assert!(decode_bigint(&[0x00, 0x00, 0x01]).is_err());
    }

    #[test]
    fn non_minimal_leading_ff_is_rejected() {
        assert!(decode_bigint(&[0xff, 0xff, 0x80]).is_err());
    }

    #[test]
    fn empty_is_rejected() {
        assert!(decode_bigint(&[]).is_err());
        assert!(encode_integer_bytes(&[]).is_err());
    }
}
