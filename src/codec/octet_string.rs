//! DER `OCTET STRING`: raw bytes, no further structure or validation.

use alloc::vec::Vec;

/// Encodes OCTET STRING content, which is simply the value's own bytes.
pub fn encode_octet_string(value: &[u8]) -> Vec<u8> {
    value.to_vec()
}

/// Decodes OCTET STRING content. Cannot fail: any byte sequence is valid.
pub fn decode_octet_string(content: &[u8]) -> Vec<u8> {
    content.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_arbitrary_bytes() {
        let value = [0x00, 0xff, 0x10, 0x20];
        let content = encode_octet_string(&value);
        assert_eq!(decode_octet_string(&content), value);
    }

    #[test]
    fn empty_is_valid() {
        assert_eq!(decode_octet_string(&encode_octet_string(&[])), Vec::<u8>::new());
    }
}
