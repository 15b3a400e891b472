//! Bridges the primitive codec to the builder framework: every leaf ASN.1
//! type the builder tree can terminate on implements [`PrimitiveValue`],
//! giving [`super::primitive::PrimitiveBuilder`] a single generic shape to
//! build against instead of one bespoke builder per leaf type.

use alloc::vec::Vec;
use num_bigint::BigInt;

use crate::codec;
use crate::error::{DecodeError, EncodeError};
use crate::tag::Tag;

/// A leaf value with a default ASN.1 encoding: a fixed tag, and a pair of
/// pure functions to/from that tag's content octets.
pub trait PrimitiveValue: Sized {
    /// The universal tag this type decodes from / encodes to by default,
    /// absent any context-tag override from an enclosing field.
    const TAG: Tag;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError>;
    fn encode_content(&self) -> Result<Vec<u8>, EncodeError>;
}

macro_rules! infallible_primitive {
    ($ty:ty, $tag:expr, $decode:expr, $encode:expr) => {
        impl PrimitiveValue for $ty {
            const TAG: Tag = $tag;

            fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
                $decode(content)
            }

            fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
                Ok($encode(self))
            }
        }
    };
}

infallible_primitive!(bool, Tag::BOOL, codec::decode_boolean, |v: &bool| codec::encode_boolean(*v));

/// `NULL`. Carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Null;

impl PrimitiveValue for Null {
    const TAG: Tag = Tag::NULL;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        codec::decode_null(content).map(|()| Null)
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(codec::encode_null())
    }
}

/// ASN.1 `INTEGER`, backed by an arbitrary-precision signed integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Integer(pub BigInt);

impl PrimitiveValue for Integer {
    const TAG: Tag = Tag::INTEGER;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        codec::decode_bigint(content).map(Integer)
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(codec::encode_bigint(&self.0))
    }
}

/// ASN.1 `ENUMERATED`, a distinct type from `INTEGER` despite sharing the
/// same content encoding, so that builders dispatch on the right tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Enumerated(pub BigInt);

impl PrimitiveValue for Enumerated {
    const TAG: Tag = Tag::ENUMERATED;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        codec::decode_bigint(content).map(Enumerated)
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(codec::encode_bigint(&self.0))
    }
}

/// ASN.1 `OCTET STRING`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct OctetString(pub Vec<u8>);

infallible_primitive!(
    OctetString,
    Tag::OCTET_STRING,
    |c: &[u8]| Ok(OctetString(codec::decode_octet_string(c))),
    |v: &OctetString| codec::encode_octet_string(&v.0)
);

infallible_primitive!(
    codec::ObjectIdentifier,
    Tag::OBJECT_IDENTIFIER,
    codec::decode_oid_content,
    |v: &codec::ObjectIdentifier| codec::encode_oid_content(v).expect("well-formed OID always encodes")
);

impl PrimitiveValue for codec::RelativeOid {
    const TAG: Tag = Tag::RELATIVE_OID;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        codec::decode_relative_oid_content(content)
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(codec::encode_relative_oid_content(self))
    }
}

impl PrimitiveValue for codec::BitString {
    const TAG: Tag = Tag::BIT_STRING;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        codec::decode_bit_string_content(content)
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        codec::encode_bit_string_content(self)
    }
}

macro_rules! string_primitive {
    ($ty:ty, $tag:expr, $decode:path) => {
        impl PrimitiveValue for $ty {
            const TAG: Tag = $tag;

            fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
                $decode(content)
            }

            fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
                Ok(self.as_bytes().to_vec())
            }
        }
    };
}

string_primitive!(codec::PrintableString, Tag::PRINTABLE_STRING, codec::decode_printable_string);
string_primitive!(codec::Ia5String, Tag::IA5_STRING, codec::decode_ia5_string);
string_primitive!(codec::VisibleString, Tag::VISIBLE_STRING, codec::decode_visible_string);
string_primitive!(codec::GraphicString, Tag::GRAPHIC_STRING, codec::decode_graphic_string);
string_primitive!(codec::GeneralString, Tag::GENERAL_STRING, codec::decode_general_string);
string_primitive!(codec::NumericString, Tag::NUMERIC_STRING, codec::decode_numeric_string);
string_primitive!(codec::TeletexString, Tag::TELETEX_STRING, codec::decode_teletex_string);

impl PrimitiveValue for codec::Utf8String {
    const TAG: Tag = Tag::UTF8_STRING;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        codec::decode_utf8_string(content)
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.0.as_bytes().to_vec())
    }
}

impl PrimitiveValue for codec::UniversalString {
    const TAG: Tag = Tag::UNIVERSAL_STRING;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        codec::decode_universal_string(content)
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.0.clone())
    }
}

impl PrimitiveValue for codec::BmpString {
    const TAG: Tag = Tag::BMP_STRING;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        codec::decode_bmp_string(content)
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(self.0.clone())
    }
}

impl PrimitiveValue for codec::UtcTime {
    const TAG: Tag = Tag::UTC_TIME;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        codec::decode_utc_time(content)
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(codec::encode_utc_time(self))
    }
}

impl PrimitiveValue for codec::GeneralizedTime {
    const TAG: Tag = Tag::GENERALIZED_TIME;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        codec::decode_generalized_time(content)
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(codec::encode_generalized_time(self))
    }
}

/// ASN.1 `REAL`, paired with the base it should be (re-)encoded in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Real {
    pub value: f64,
    pub base: u8,
}

impl PrimitiveValue for Real {
    const TAG: Tag = Tag::REAL;

    fn decode_content(content: &[u8]) -> Result<Self, DecodeError> {
        // The base used on the wire is recoverable from the content's own
        // form octet; default to 10 if we can't tell (empty content, i.e.
        // zero) since re-encoding zero is base-independent.
        let base = match content.first() {
            Some(first) if first & 0x80 != 0 => 2,
            _ => 10,
        };
        codec::decode_real(content).map(|value| Real { value, base })
    }

    fn encode_content(&self) -> Result<Vec<u8>, EncodeError> {
        codec::encode_real(self.value, self.base)
    }
}
