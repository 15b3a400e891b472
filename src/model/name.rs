//! `Name`, `RDNSequence`, `RelativeDistinguishedName`, and
//! `AttributeTypeAndValue`, RFC 5280 §4.1.2.4 / X.501.
//!
//! An empty `RDNSequence` is accepted on both decode and encode: the
//! original implementation's encoder explicitly allows it even though its
//! decoders disagree among themselves on whether at least one RDN is
//! required (an open question this crate resolves in favor of the more
//! permissive behavior — see `DESIGN.md`).

use alloc::vec::Vec;

use crate::builder::collection::build_repeated;
use crate::builder::optional::{build_mandatory, expect_exhausted};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::{Builder, DefaultIdentifier};
use crate::choice_builder;
use crate::codec::{BmpString, Ia5String, ObjectIdentifier, PrintableString, TeletexString, UniversalString, Utf8String};
use crate::encode::{encode_sequence, encode_set, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::tag::Tag;

use super::raw::RawData;

choice_builder! {
    /// The union of string types an X.500 attribute value is allowed to
    /// carry, per X.520's `DirectoryString`.
    pub enum DirectoryString {
        Teletex(PrimitiveBuilder<TeletexString>),
        Universal(PrimitiveBuilder<UniversalString>),
        Bmp(PrimitiveBuilder<BmpString>),
        Printable(PrimitiveBuilder<PrintableString>),
        Utf8(PrimitiveBuilder<Utf8String>),
    }
}

impl Encode for DirectoryString {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            DirectoryString::Teletex(v) => v.encode(),
            DirectoryString::Universal(v) => v.encode(),
            DirectoryString::Bmp(v) => v.encode(),
            DirectoryString::Printable(v) => v.encode(),
            DirectoryString::Utf8(v) => v.encode(),
        }
    }
}

choice_builder! {
    /// An attribute value's physical encoding: most attributes use
    /// `DirectoryString`, `IA5String` shows up for e.g. email-address
    /// attributes, and anything else is retained as `RawData`.
    pub enum AttributeValue {
        Directory(DirectoryString),
        Ia5(PrimitiveBuilder<Ia5String>),
        Other(RawData),
    }
}

impl Encode for AttributeValue {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            AttributeValue::Directory(v) => v.encode(),
            AttributeValue::Ia5(v) => v.encode(),
            AttributeValue::Other(v) => v.encode(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTypeAndValue {
    pub attr_type: ObjectIdentifier,
    pub value: AttributeValue,
}

pub struct AttributeTypeAndValueBuilder;

impl Builder for AttributeTypeAndValueBuilder {
    type Output = AttributeTypeAndValue;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<AttributeTypeAndValue, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected AttributeTypeAndValue SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let attr_type = build_mandatory::<PrimitiveBuilder<ObjectIdentifier>>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttributeTypeAndValue.type",
        )?;
        let value = build_mandatory::<AttributeValue>(&nodes, &mut idx, depth + 1, "AttributeTypeAndValue.value")?;
        expect_exhausted(&nodes, idx, "AttributeTypeAndValue: unexpected trailing field")?;
        Ok(AttributeTypeAndValue { attr_type, value })
    }
}

impl DefaultIdentifier for AttributeTypeAndValueBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for AttributeTypeAndValue {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[self.attr_type.encode()?, self.value.encode()?]))
    }
}

/// A non-empty SET of `AttributeTypeAndValue`; order among members is
/// logically unordered but DER canonicalizes to a sorted SET on encode.
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeDistinguishedName(pub Vec<AttributeTypeAndValue>);

pub struct RelativeDistinguishedNameBuilder;

impl Builder for RelativeDistinguishedNameBuilder {
    type Output = RelativeDistinguishedName;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SET
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<RelativeDistinguishedName, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected RelativeDistinguishedName SET"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let members = build_repeated::<AttributeTypeAndValueBuilder>(&nodes, &mut idx, depth + 1)?;
        if members.is_empty() {
            return Err(DecodeError::incomplete("RelativeDistinguishedName: must contain at least one member"));
        }
        if idx != nodes.len() {
            return Err(DecodeError::invalid_content("RelativeDistinguishedName: element with unexpected tag"));
        }
        Ok(RelativeDistinguishedName(members))
    }
}

impl DefaultIdentifier for RelativeDistinguishedNameBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SET, true)
    }
}

impl Encode for RelativeDistinguishedName {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let fields = self.0.iter().map(Encode::encode).collect::<Result<Vec<_>, _>>()?;
        Ok(encode_set(fields))
    }
}

/// `RDNSequence`: an ordered sequence of RDNs. Empty is accepted (see
/// module docs).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RdnSequence(pub Vec<RelativeDistinguishedName>);

pub struct RdnSequenceBuilder;

impl Builder for RdnSequenceBuilder {
    type Output = RdnSequence;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<RdnSequence, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected RDNSequence SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let rdns = build_repeated::<RelativeDistinguishedNameBuilder>(&nodes, &mut idx, depth + 1)?;
        if idx != nodes.len() {
            return Err(DecodeError::invalid_content("RDNSequence: element with unexpected tag"));
        }
        Ok(RdnSequence(rdns))
    }
}

impl DefaultIdentifier for RdnSequenceBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for RdnSequence {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let fields = self.0.iter().map(Encode::encode).collect::<Result<Vec<_>, _>>()?;
        Ok(encode_sequence(&fields))
    }
}

/// X.501 `Name`. Only the `rdnSequence` alternative is defined in RFC 5280;
/// encoded identically to a bare `RDNSequence`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Name(pub RdnSequence);

pub struct NameBuilder;

impl Builder for NameBuilder {
    type Output = Name;

    fn matches(identifier: Identifier) -> bool {
        RdnSequenceBuilder::matches(identifier)
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<Name, DecodeError> {
        RdnSequenceBuilder::build(identifier, content, depth).map(Name)
    }
}

impl DefaultIdentifier for NameBuilder {
    fn default_identifier() -> Identifier {
        RdnSequenceBuilder::default_identifier()
    }
}

impl Encode for Name {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        self.0.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;

    #[test]
    fn empty_rdn_sequence_round_trips() {
        let name = Name(RdnSequence(Vec::new()));
        let der = name.encode().unwrap();
        assert_eq!(der, alloc::vec![0x30, 0x00]);
        assert_eq!(parse::<NameBuilder>(&der).unwrap(), name);
    }

    #[test]
    fn relative_distinguished_name_rejects_empty_set() {
        let empty_set = alloc::vec![0x31, 0x00];
        assert!(parse::<RelativeDistinguishedNameBuilder>(&empty_set).is_err());
    }

    #[test]
    fn single_rdn_common_name_round_trips() {
        let name = Name(RdnSequence(alloc::vec![RelativeDistinguishedName(alloc::vec![AttributeTypeAndValue {
            attr_type: crate::oids::common_name_oid(),
            value: AttributeValue::Directory(DirectoryString::Utf8(Utf8String("Example CA".into()))),
        }])]));
        let der = name.encode().unwrap();
        assert_eq!(parse::<NameBuilder>(&der).unwrap(), name);
    }
}
