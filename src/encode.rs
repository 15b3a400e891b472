//! The encoder back-path: serializes typed values to canonical DER.
//!
//! Every type implements [`Encode`], returning its own full TLV (header
//! plus content). Composite types build theirs by calling `encode()` on
//! each field in declared order, skipping absent `Option` fields and
//! values equal to their type's default, then prepending their own header
//! over the concatenated child bytes — exactly the eight-step protocol:
//! per-field encode, optional-absence skip, default suppression, IMPLICIT
//! tag rewrite, EXPLICIT tag wrap, concatenation, own header, return.

use alloc::vec::Vec;

use crate::builder::value::PrimitiveValue;
use crate::codec;
use crate::error::EncodeError;
use crate::tag::{Class, Tag};

/// Produces a complete TLV: header (computed from `content`'s length) plus
/// the content itself.
pub fn encode_tlv(class: Class, constructed: bool, tag: u32, content: &[u8]) -> Vec<u8> {
    let mut out = codec::encode_header(class, constructed, tag, content.len());
    out.extend_from_slice(content);
    out
}

/// A type that can serialize itself to its own canonical DER TLV.
pub trait Encode {
    fn encode(&self) -> Result<Vec<u8>, EncodeError>;
}

impl<T: PrimitiveValue> Encode for T {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let content = self.encode_content()?;
        Ok(encode_tlv(T::TAG.class, false, T::TAG.value, &content))
    }
}

/// `OPTIONAL` field absence: `None` contributes nothing to the parent's
/// concatenated content.
impl<T: Encode> Encode for Option<T> {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Some(value) => value.encode(),
            None => Ok(Vec::new()),
        }
    }
}

/// Concatenates each field's own encoding (already-computed TLV bytes,
/// with absent `Option`s already contributing nothing) under a fresh
/// SEQUENCE header.
pub fn encode_sequence(fields: &[Vec<u8>]) -> Vec<u8> {
    let content: Vec<u8> = fields.concat();
    encode_tlv(Class::Universal, true, Tag::SEQUENCE.value, &content)
}

/// Encodes `items` as a `SEQUENCE OF`, preserving their given order.
pub fn encode_sequence_of<T: Encode>(items: &[T]) -> Result<Vec<u8>, EncodeError> {
    let mut content = Vec::new();
    for item in items {
        content.extend(item.encode()?);
    }
    Ok(encode_tlv(Class::Universal, true, Tag::SEQUENCE.value, &content))
}

/// Encodes `items` as a `SET OF`, sorted lexicographically by each item's
/// own full DER encoding — the canonicalization DER requires regardless of
/// parse order.
pub fn encode_set_of<T: Encode>(items: &[T]) -> Result<Vec<u8>, EncodeError> {
    let mut encoded: Vec<Vec<u8>> = items.iter().map(Encode::encode).collect::<Result<_, _>>()?;
    encoded.sort();
    let content: Vec<u8> = encoded.concat();
    Ok(encode_tlv(Class::Universal, true, Tag::SET.value, &content))
}

/// Encodes `fields` (already-computed per-member TLVs of a SET, e.g. a
/// `RelativeDistinguishedName`'s `AttributeTypeAndValue`s) sorted into
/// canonical order under a SET header.
pub fn encode_set(mut fields: Vec<Vec<u8>>) -> Vec<u8> {
    fields.sort();
    let content: Vec<u8> = fields.concat();
    encode_tlv(Class::Universal, true, Tag::SET.value, &content)
}

/// Wraps an already-encoded child TLV (`child_der`, as returned by its own
/// `encode()`) in an EXPLICIT context tag: a fresh constructed header with
/// the unmodified child bytes as content.
pub fn encode_explicit(tag: u32, child_der: &[u8]) -> Vec<u8> {
    encode_tlv(Class::ContextSpecific, true, tag, child_der)
}

/// Rewrites an already-encoded child TLV's identifier to an IMPLICIT
/// context tag, keeping its content and constructed bit unchanged.
pub fn encode_implicit(tag: u32, child_der: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let (identifier, content, _remainder) = codec::decode_header(child_der)
        .map_err(|_| EncodeError::invalid_content("IMPLICIT: malformed child encoding"))?;
    Ok(encode_tlv(Class::ContextSpecific, identifier.constructed, tag, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::value::Integer;
    use num_bigint::BigInt;

    #[test]
    fn primitive_encode_round_trips_through_decode_header() {
        let value = Integer(BigInt::from(42));
        let der = value.encode().unwrap();
        let (identifier, content, remainder) = codec::decode_header(&der).unwrap();
        assert_eq!(identifier.tag, Tag::INTEGER);
        assert!(remainder.is_empty());
        assert_eq!(codec::decode_bigint(content).unwrap(), BigInt::from(42));
    }

    #[test]
    fn option_none_encodes_to_nothing() {
        let absent: Option<Integer> = None;
        assert_eq!(absent.encode().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn explicit_wraps_child_bytes_unchanged() {
        let value = Integer(BigInt::from(0));
        let child = value.encode().unwrap();
        let wrapped = encode_explicit(0, &child);
        let (identifier, content, _) = codec::decode_header(&wrapped).unwrap();
        assert_eq!(identifier.tag, Tag::context(0));
        assert!(identifier.constructed);
        assert_eq!(content, child.as_slice());
    }

    #[test]
    fn implicit_rewrites_tag_and_keeps_content() {
        let value = Integer(BigInt::from(9));
        let child = value.encode().unwrap();
        let rewritten = encode_implicit(1, &child).unwrap();
        let (identifier, content, _) = codec::decode_header(&rewritten).unwrap();
        assert_eq!(identifier.tag, Tag::context(1));
        assert!(!identifier.constructed);
        assert_eq!(codec::decode_bigint(content).unwrap(), BigInt::from(9));
    }

    #[test]
    fn set_of_is_sorted_lexicographically_by_der_bytes() {
        let items = alloc::vec![Integer(BigInt::from(300)), Integer(BigInt::from(1)), Integer(BigInt::from(2))];
        let encoded = encode_set_of(&items).unwrap();
        let (_, content, _) = codec::decode_header(&encoded).unwrap();
        let nodes = crate::builder::child_nodes(content).unwrap();
        let values: Vec<_> = nodes
            .iter()
            .map(|(_, c)| codec::decode_bigint(c).unwrap())
            .collect();
        // 1 (02 01 01), 2 (02 01 02), 300 (02 02 01 2C): byte-lexicographic,
        // not numeric, order.
        assert_eq!(values, alloc::vec![BigInt::from(1), BigInt::from(2), BigInt::from(300)]);
    }
}
