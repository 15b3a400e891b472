//! `GeneralName`, RFC 5280 §4.2.1.6, used by `SubjectAltName`,
//! `IssuerAltName`, and the `GeneralSubtree` entries of `NameConstraints`.
//!
//! Every alternative is a context-tagged field ([0]..[8]); `directoryName`
//! and `ediPartyName` wrap CHOICE-shaped content which, per X.680, cannot
//! actually be implicitly tagged despite the module's IMPLICIT keyword —
//! compilers treat the tag as the outer identifier of the wrapped value
//! itself, which is exactly what this crate's `DefaultIdentifier` bound
//! already captures for `Name` (see `model::name`). `otherName`,
//! `ediPartyName`, and `x400Address` are parsed directly against their
//! context tag rather than through [`crate::builder::context_tagged`],
//! since their inner shape needs custom field handling anyway.

use alloc::vec::Vec;

use crate::builder::context_tagged::ContextTagged;
use crate::builder::optional::{build_mandatory, expect_exhausted};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::value::{OctetString, PrimitiveValue};
use crate::builder::{build_at, Builder};
use crate::choice_builder;
use crate::codec::{self, Ia5String, ObjectIdentifier};
use crate::encode::{encode_explicit, encode_implicit, encode_sequence, encode_tlv, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::tag::{Class, Tag};

use super::name::{DirectoryString, Name, NameBuilder};
use super::raw::RawData;

type Rfc822NameTag = ContextTagged<PrimitiveBuilder<Ia5String>, 1, false>;
type DnsNameTag = ContextTagged<PrimitiveBuilder<Ia5String>, 2, false>;
type DirectoryNameTag = ContextTagged<NameBuilder, 4, false>;
type UriTag = ContextTagged<PrimitiveBuilder<Ia5String>, 6, false>;
type IpAddressTag = ContextTagged<PrimitiveBuilder<OctetString>, 7, false>;
type RegisteredIdTag = ContextTagged<PrimitiveBuilder<ObjectIdentifier>, 8, false>;

/// `OtherName ::= SEQUENCE { type-id OBJECT IDENTIFIER, value [0] EXPLICIT ANY DEFINED BY type-id }`.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherName {
    pub type_id: ObjectIdentifier,
    pub value: RawData,
}

pub struct OtherNameBuilder;

impl Builder for OtherNameBuilder {
    type Output = OtherName;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::context(0)
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<OtherName, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected otherName [0]"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let type_id =
            build_mandatory::<PrimitiveBuilder<ObjectIdentifier>>(&nodes, &mut idx, depth + 1, "OtherName.type-id")?;
        let value = build_mandatory::<RawData>(&nodes, &mut idx, depth + 1, "OtherName.value")?;
        expect_exhausted(&nodes, idx, "OtherName: unexpected trailing field")?;
        Ok(OtherName { type_id, value })
    }
}

impl Encode for OtherName {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let inner = encode_sequence(&[self.type_id.encode()?, self.value.encode()?]);
        encode_implicit(0, &inner)
    }
}

/// `EDIPartyName ::= SEQUENCE { nameAssigner [0] DirectoryString OPTIONAL, partyName [1] DirectoryName }`.
#[derive(Debug, Clone, PartialEq)]
pub struct EdiPartyName {
    pub name_assigner: Option<DirectoryString>,
    pub party_name: DirectoryString,
}

pub struct EdiPartyNameBuilder;

impl Builder for EdiPartyNameBuilder {
    type Output = EdiPartyName;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::context(5)
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<EdiPartyName, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected ediPartyName [5]"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let name_assigner = match nodes.get(idx) {
            Some(&(node_id, node_content)) if node_id.tag == Tag::context(0) && node_id.constructed => {
                idx += 1;
                Some(unwrap_explicit_choice::<DirectoryString>(node_content, depth + 1)?)
            }
            _ => None,
        };
        let &(party_id, party_content) =
            nodes.get(idx).ok_or_else(|| DecodeError::incomplete("EDIPartyName.partyName"))?;
        if party_id.tag != Tag::context(1) || !party_id.constructed {
            return Err(DecodeError::incomplete("EDIPartyName.partyName"));
        }
        idx += 1;
        let party_name = unwrap_explicit_choice::<DirectoryString>(party_content, depth + 1)?;
        expect_exhausted(&nodes, idx, "EDIPartyName: unexpected trailing field")?;
        Ok(EdiPartyName { name_assigner, party_name })
    }
}

impl Encode for EdiPartyName {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(assigner) = &self.name_assigner {
            fields.push(encode_explicit(0, &assigner.encode()?));
        }
        fields.push(encode_explicit(1, &self.party_name.encode()?));
        encode_implicit(5, &encode_sequence(&fields))
    }
}

/// `x400Address` is out of scope (see `model::algorithm_identifier`'s
/// analogous call on per-field grammars); its content is retained verbatim.
pub struct X400AddressBuilder;

impl Builder for X400AddressBuilder {
    type Output = RawData;

    fn matches(identifier: Identifier) -> bool {
        identifier.tag == Tag::context(3)
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<RawData, DecodeError> {
        build_at::<RawData>(identifier, content, depth)
    }
}

choice_builder! {
    pub enum GeneralName {
        OtherName(OtherNameBuilder),
        Rfc822Name(Rfc822NameTag),
        DnsName(DnsNameTag),
        X400Address(X400AddressBuilder),
        DirectoryName(DirectoryNameTag),
        EdiPartyName(EdiPartyNameBuilder),
        UniformResourceIdentifier(UriTag),
        IpAddress(IpAddressTag),
        RegisteredId(RegisteredIdTag),
    }
}

impl Encode for GeneralName {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            GeneralName::OtherName(v) => v.encode(),
            GeneralName::Rfc822Name(v) => encode_context_primitive(1, v),
            GeneralName::DnsName(v) => encode_context_primitive(2, v),
            GeneralName::X400Address(v) => v.encode(),
            GeneralName::DirectoryName(v) => encode_implicit(4, &v.encode()?),
            GeneralName::EdiPartyName(v) => v.encode(),
            GeneralName::UniformResourceIdentifier(v) => encode_context_primitive(6, v),
            GeneralName::IpAddress(v) => encode_context_primitive(7, v),
            GeneralName::RegisteredId(v) => encode_context_primitive(8, v),
        }
    }
}

fn encode_context_primitive<T: PrimitiveValue>(tag: u32, value: &T) -> Result<Vec<u8>, EncodeError> {
    let content = value.encode_content()?;
    Ok(encode_tlv(Class::ContextSpecific, false, tag, &content))
}

fn unwrap_explicit_choice<B: Builder>(content: &[u8], depth: usize) -> Result<B::Output, DecodeError> {
    let (identifier, inner_content, remainder) = codec::decode_header(content)?;
    if !remainder.is_empty() {
        return Err(DecodeError::invalid_content("EXPLICIT wrapper holds more than one inner TLV"));
    }
    if !B::matches(identifier) {
        return Err(DecodeError::unsupported_format("EXPLICIT inner value does not match"));
    }
    build_at::<B>(identifier, inner_content, depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;

    #[test]
    fn dns_name_round_trips() {
        let value = GeneralName::DnsName(Ia5String(b"example.com".to_vec()));
        let der = value.encode().unwrap();
        assert_eq!(der[0], 0x82); // context [2], primitive
        assert_eq!(parse::<GeneralName>(&der).unwrap(), value);
    }

    #[test]
    fn ip_address_round_trips() {
        let value = GeneralName::IpAddress(OctetString(alloc::vec![127, 0, 0, 1]));
        let der = value.encode().unwrap();
        assert_eq!(parse::<GeneralName>(&der).unwrap(), value);
    }

    #[test]
    fn directory_name_round_trips_through_implicit_wrapping() {
        let value = GeneralName::DirectoryName(Name::default());
        let der = value.encode().unwrap();
        assert_eq!(parse::<GeneralName>(&der).unwrap(), value);
    }
}
