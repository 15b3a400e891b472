//! `Extension` and the well-known extension value shapes reachable through
//! its `extnId`-keyed secondary dispatch: `BasicConstraints`, `KeyUsage`,
//! `SubjectAltName`/`IssuerAltName`, `AuthorityKeyIdentifier`,
//! `ExtKeyUsageSyntax`, `NameConstraints`, `AuthorityInfoAccessSyntax`,
//! `PrivateKeyUsagePeriod`, plus the `CertificatePolicies`/
//! `PolicyConstraints`/`CRLDistributionPoints` extensions defined in
//! sibling modules.

use alloc::vec::Vec;

use crate::builder::collection::SequenceOf;
use crate::builder::context_tagged::ContextTagged;
use crate::builder::optional::{build_mandatory, build_optional, expect_exhausted, suppress_default};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::value::{Integer, OctetString};
use crate::builder::{build_at, parse_nested, Builder, DefaultIdentifier};
use crate::codec::{BitString, ObjectIdentifier};
use crate::encode::{encode_sequence, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::oids;
use crate::tag::Tag;

use super::crl::DistributionPoint;
use super::general_name::GeneralName;
use super::policy::{PolicyConstraints, PolicyConstraintsBuilder, PolicyInformation, PolicyInformationBuilder};
use super::raw::RawData;

/// `BasicConstraints ::= SEQUENCE { cA BOOLEAN DEFAULT FALSE, pathLenConstraint INTEGER OPTIONAL }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BasicConstraints {
    pub ca: bool,
    pub path_len_constraint: Option<num_bigint::BigInt>,
}

pub struct BasicConstraintsBuilder;

impl Builder for BasicConstraintsBuilder {
    type Output = BasicConstraints;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<BasicConstraints, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected BasicConstraints SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let ca = build_optional::<PrimitiveBuilder<bool>>(&nodes, &mut idx, depth + 1)?.unwrap_or(false);
        let path_len_constraint =
            build_optional::<PrimitiveBuilder<Integer>>(&nodes, &mut idx, depth + 1)?.map(|v| v.0);
        expect_exhausted(&nodes, idx, "BasicConstraints: unexpected trailing field")?;
        Ok(BasicConstraints { ca, path_len_constraint })
    }
}

impl DefaultIdentifier for BasicConstraintsBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for BasicConstraints {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(ca) = suppress_default(self.ca, &false) {
            fields.push(ca.encode()?);
        }
        if let Some(path_len) = &self.path_len_constraint {
            fields.push(Integer(path_len.clone()).encode()?);
        }
        Ok(encode_sequence(&fields))
    }
}

/// `KeyUsage ::= BIT STRING`, with the named-bit accessors RFC 5280 §4.2.1.3 defines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyUsage(pub BitString);

impl KeyUsage {
    pub fn digital_signature(&self) -> bool {
        self.0.bit(0)
    }
    pub fn non_repudiation(&self) -> bool {
        self.0.bit(1)
    }
    pub fn key_encipherment(&self) -> bool {
        self.0.bit(2)
    }
    pub fn data_encipherment(&self) -> bool {
        self.0.bit(3)
    }
    pub fn key_agreement(&self) -> bool {
        self.0.bit(4)
    }
    pub fn key_cert_sign(&self) -> bool {
        self.0.bit(5)
    }
    pub fn crl_sign(&self) -> bool {
        self.0.bit(6)
    }
    pub fn encipher_only(&self) -> bool {
        self.0.bit(7)
    }
    pub fn decipher_only(&self) -> bool {
        self.0.bit(8)
    }
}

/// `NameConstraints ::= SEQUENCE { permittedSubtrees [0] IMPLICIT GeneralSubtrees OPTIONAL, excludedSubtrees [1] IMPLICIT GeneralSubtrees OPTIONAL }`.
///
/// At least one of the two must be present (the spec's normative transition
/// table example); an instance with neither is `IncompleteInput`.
#[derive(Debug, Clone, PartialEq)]
pub struct NameConstraints {
    pub permitted_subtrees: Option<Vec<GeneralSubtree>>,
    pub excluded_subtrees: Option<Vec<GeneralSubtree>>,
}

/// `GeneralSubtree ::= SEQUENCE { base GeneralName, minimum [0] IMPLICIT INTEGER DEFAULT 0, maximum [1] IMPLICIT INTEGER OPTIONAL }`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralSubtree {
    pub base: GeneralName,
    pub minimum: num_bigint::BigInt,
    pub maximum: Option<num_bigint::BigInt>,
}

type MinimumTag = ContextTagged<PrimitiveBuilder<Integer>, 0, false>;
type MaximumTag = ContextTagged<PrimitiveBuilder<Integer>, 1, false>;

pub struct GeneralSubtreeBuilder;

impl Builder for GeneralSubtreeBuilder {
    type Output = GeneralSubtree;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<GeneralSubtree, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected GeneralSubtree SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let base = build_mandatory::<GeneralName>(&nodes, &mut idx, depth + 1, "GeneralSubtree.base")?;
        let minimum =
            build_optional::<MinimumTag>(&nodes, &mut idx, depth + 1)?.map(|v| v.0).unwrap_or_else(|| 0.into());
        let maximum = build_optional::<MaximumTag>(&nodes, &mut idx, depth + 1)?.map(|v| v.0);
        expect_exhausted(&nodes, idx, "GeneralSubtree: unexpected trailing field")?;
        Ok(GeneralSubtree { base, minimum, maximum })
    }
}

impl DefaultIdentifier for GeneralSubtreeBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for GeneralSubtree {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = alloc::vec![self.base.encode()?];
        if let Some(minimum) = suppress_default(self.minimum.clone(), &0.into()) {
            fields.push(crate::encode::encode_implicit(0, &Integer(minimum).encode()?)?);
        }
        if let Some(maximum) = &self.maximum {
            fields.push(crate::encode::encode_implicit(1, &Integer(maximum.clone()).encode()?)?);
        }
        Ok(encode_sequence(&fields))
    }
}

type PermittedSubtreesTag = ContextTagged<SequenceOf<GeneralSubtreeBuilder>, 0, false>;
type ExcludedSubtreesTag = ContextTagged<SequenceOf<GeneralSubtreeBuilder>, 1, false>;

pub struct NameConstraintsBuilder;

impl Builder for NameConstraintsBuilder {
    type Output = NameConstraints;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<NameConstraints, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected NameConstraints SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let permitted_subtrees = build_optional::<PermittedSubtreesTag>(&nodes, &mut idx, depth + 1)?;
        let excluded_subtrees = build_optional::<ExcludedSubtreesTag>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "NameConstraints: unexpected trailing field")?;
        if permitted_subtrees.is_none() && excluded_subtrees.is_none() {
            return Err(DecodeError::incomplete(
                "NameConstraints: at least one of permittedSubtrees/excludedSubtrees must be present",
            ));
        }
        Ok(NameConstraints { permitted_subtrees, excluded_subtrees })
    }
}

impl DefaultIdentifier for NameConstraintsBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for NameConstraints {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(subtrees) = &self.permitted_subtrees {
            let items: Vec<Vec<u8>> = subtrees.iter().map(Encode::encode).collect::<Result<_, _>>()?;
            fields.push(crate::encode::encode_implicit(0, &encode_sequence(&items))?);
        }
        if let Some(subtrees) = &self.excluded_subtrees {
            let items: Vec<Vec<u8>> = subtrees.iter().map(Encode::encode).collect::<Result<_, _>>()?;
            fields.push(crate::encode::encode_implicit(1, &encode_sequence(&items))?);
        }
        Ok(encode_sequence(&fields))
    }
}

/// `AccessDescription ::= SEQUENCE { accessMethod OBJECT IDENTIFIER, accessLocation GeneralName }`, RFC 5280 §4.2.2.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessDescription {
    pub access_method: ObjectIdentifier,
    pub access_location: GeneralName,
}

pub struct AccessDescriptionBuilder;

impl Builder for AccessDescriptionBuilder {
    type Output = AccessDescription;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<AccessDescription, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected AccessDescription SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let access_method = build_mandatory::<PrimitiveBuilder<ObjectIdentifier>>(
            &nodes,
            &mut idx,
            depth + 1,
            "AccessDescription.accessMethod",
        )?;
        let access_location =
            build_mandatory::<GeneralName>(&nodes, &mut idx, depth + 1, "AccessDescription.accessLocation")?;
        expect_exhausted(&nodes, idx, "AccessDescription: unexpected trailing field")?;
        Ok(AccessDescription { access_method, access_location })
    }
}

impl DefaultIdentifier for AccessDescriptionBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for AccessDescription {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[self.access_method.encode()?, self.access_location.encode()?]))
    }
}

/// `PrivateKeyUsagePeriod ::= SEQUENCE { notBefore [0] IMPLICIT GeneralizedTime OPTIONAL, notAfter [1] IMPLICIT GeneralizedTime OPTIONAL }`, RFC 5280 §4.2.1.4 (deprecated but still encountered).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrivateKeyUsagePeriod {
    pub not_before: Option<crate::codec::GeneralizedTime>,
    pub not_after: Option<crate::codec::GeneralizedTime>,
}

type NotBeforeTag = ContextTagged<PrimitiveBuilder<crate::codec::GeneralizedTime>, 0, false>;
type NotAfterTag = ContextTagged<PrimitiveBuilder<crate::codec::GeneralizedTime>, 1, false>;

pub struct PrivateKeyUsagePeriodBuilder;

impl Builder for PrivateKeyUsagePeriodBuilder {
    type Output = PrivateKeyUsagePeriod;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<PrivateKeyUsagePeriod, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected PrivateKeyUsagePeriod SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let not_before = build_optional::<NotBeforeTag>(&nodes, &mut idx, depth + 1)?;
        let not_after = build_optional::<NotAfterTag>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "PrivateKeyUsagePeriod: unexpected trailing field")?;
        Ok(PrivateKeyUsagePeriod { not_before, not_after })
    }
}

impl Encode for PrivateKeyUsagePeriod {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(value) = &self.not_before {
            fields.push(crate::encode::encode_implicit(0, &value.encode()?)?);
        }
        if let Some(value) = &self.not_after {
            fields.push(crate::encode::encode_implicit(1, &value.encode()?)?);
        }
        Ok(encode_sequence(&fields))
    }
}

/// An extension's decoded payload, reached via the secondary dispatch keyed
/// by `extnId`: an OID from [`oids::is_known_extension`] is reparsed with
/// its corresponding inner builder; any other OID keeps the raw octets.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionValue {
    KeyUsage(KeyUsage),
    BasicConstraints(BasicConstraints),
    SubjectAltName(Vec<GeneralName>),
    IssuerAltName(Vec<GeneralName>),
    SubjectKeyIdentifier(Vec<u8>),
    AuthorityKeyIdentifier(RawData),
    ExtKeyUsage(Vec<ObjectIdentifier>),
    NameConstraints(NameConstraints),
    CertificatePolicies(Vec<PolicyInformation>),
    PolicyConstraints(PolicyConstraints),
    CrlDistributionPoints(Vec<DistributionPoint>),
    AuthorityInfoAccess(Vec<AccessDescription>),
    SubjectInfoAccess(Vec<AccessDescription>),
    Other(Vec<u8>),
}

impl ExtensionValue {
    /// Reparses `content` (the `extnValue` OCTET STRING's payload) as a new
    /// root-level DER value, dispatching on `extn_id`. Unknown OIDs, and
    /// OIDs whose known shape fails to parse, fall back to raw octets
    /// rather than failing the whole `Extension`.
    fn decode(extn_id: &ObjectIdentifier, content: &[u8], depth: usize) -> Result<Self, DecodeError> {
        let arcs = oids::arcs_of(extn_id);
        macro_rules! try_known {
            ($oid:expr, $variant:expr, $builder:ty) => {
                if arcs == $oid {
                    return Ok($variant(parse_nested::<$builder>(content, depth)?));
                }
            };
        }
        if arcs == oids::KEY_USAGE {
            return Ok(ExtensionValue::KeyUsage(KeyUsage(parse_nested::<PrimitiveBuilder<BitString>>(
                content, depth,
            )?)));
        }
        try_known!(oids::BASIC_CONSTRAINTS, ExtensionValue::BasicConstraints, BasicConstraintsBuilder);
        if arcs == oids::SUBJECT_ALT_NAME {
            return Ok(ExtensionValue::SubjectAltName(parse_nested::<SequenceOf<GeneralName>>(content, depth)?));
        }
        if arcs == oids::ISSUER_ALT_NAME {
            return Ok(ExtensionValue::IssuerAltName(parse_nested::<SequenceOf<GeneralName>>(content, depth)?));
        }
        if arcs == oids::SUBJECT_KEY_IDENTIFIER {
            return Ok(ExtensionValue::SubjectKeyIdentifier(
                parse_nested::<PrimitiveBuilder<OctetString>>(content, depth)?.0,
            ));
        }
        if arcs == oids::AUTHORITY_KEY_IDENTIFIER {
            let (identifier, inner_content, remainder) = crate::codec::decode_header(content)?;
            if !remainder.is_empty() {
                return Err(DecodeError::invalid_content("AuthorityKeyIdentifier: trailing bytes"));
            }
            return Ok(ExtensionValue::AuthorityKeyIdentifier(build_at::<RawData>(
                identifier,
                inner_content,
                depth + 1,
            )?));
        }
        if arcs == oids::EXT_KEY_USAGE {
            return Ok(ExtensionValue::ExtKeyUsage(
                parse_nested::<SequenceOf<PrimitiveBuilder<ObjectIdentifier>>>(content, depth)?,
            ));
        }
        try_known!(oids::NAME_CONSTRAINTS, ExtensionValue::NameConstraints, NameConstraintsBuilder);
        if arcs == oids::CERTIFICATE_POLICIES {
            return Ok(ExtensionValue::CertificatePolicies(parse_nested::<SequenceOf<PolicyInformationBuilder>>(
                content, depth,
            )?));
        }
        try_known!(oids::POLICY_CONSTRAINTS, ExtensionValue::PolicyConstraints, PolicyConstraintsBuilder);
        if arcs == oids::CRL_DISTRIBUTION_POINTS {
            return Ok(ExtensionValue::CrlDistributionPoints(
                parse_nested::<SequenceOf<super::crl::DistributionPointBuilder>>(content, depth)?,
            ));
        }
        if arcs == oids::AUTHORITY_INFO_ACCESS {
            return Ok(ExtensionValue::AuthorityInfoAccess(
                parse_nested::<SequenceOf<AccessDescriptionBuilder>>(content, depth)?,
            ));
        }
        if arcs == oids::SUBJECT_INFO_ACCESS {
            return Ok(ExtensionValue::SubjectInfoAccess(
                parse_nested::<SequenceOf<AccessDescriptionBuilder>>(content, depth)?,
            ));
        }
        Ok(ExtensionValue::Other(content.to_vec()))
    }

    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            ExtensionValue::KeyUsage(v) => v.0.clone().encode(),
            ExtensionValue::BasicConstraints(v) => v.encode(),
            ExtensionValue::SubjectAltName(v) | ExtensionValue::IssuerAltName(v) => {
                let items: Vec<Vec<u8>> = v.iter().map(Encode::encode).collect::<Result<_, _>>()?;
                Ok(encode_sequence(&items))
            }
            ExtensionValue::SubjectKeyIdentifier(bytes) => OctetString(bytes.clone()).encode(),
            ExtensionValue::AuthorityKeyIdentifier(v) => v.encode(),
            ExtensionValue::ExtKeyUsage(oids) => {
                let items: Vec<Vec<u8>> = oids.iter().map(Encode::encode).collect::<Result<_, _>>()?;
                Ok(encode_sequence(&items))
            }
            ExtensionValue::NameConstraints(v) => v.encode(),
            ExtensionValue::CertificatePolicies(v) => {
                let items: Vec<Vec<u8>> = v.iter().map(Encode::encode).collect::<Result<_, _>>()?;
                Ok(encode_sequence(&items))
            }
            ExtensionValue::PolicyConstraints(v) => v.encode(),
            ExtensionValue::CrlDistributionPoints(v) => {
                let items: Vec<Vec<u8>> = v.iter().map(Encode::encode).collect::<Result<_, _>>()?;
                Ok(encode_sequence(&items))
            }
            ExtensionValue::AuthorityInfoAccess(v) | ExtensionValue::SubjectInfoAccess(v) => {
                let items: Vec<Vec<u8>> = v.iter().map(Encode::encode).collect::<Result<_, _>>()?;
                Ok(encode_sequence(&items))
            }
            ExtensionValue::Other(bytes) => Ok(bytes.clone()),
        }
    }
}

/// `Extension ::= SEQUENCE { extnId OBJECT IDENTIFIER, critical BOOLEAN DEFAULT FALSE, extnValue OCTET STRING }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
    pub extn_id: ObjectIdentifier,
    pub critical: bool,
    pub extn_value: ExtensionValue,
}

pub struct ExtensionBuilder;

impl Builder for ExtensionBuilder {
    type Output = Extension;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<Extension, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected Extension SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let extn_id =
            build_mandatory::<PrimitiveBuilder<ObjectIdentifier>>(&nodes, &mut idx, depth + 1, "Extension.extnId")?;
        let critical = build_optional::<PrimitiveBuilder<bool>>(&nodes, &mut idx, depth + 1)?.unwrap_or(false);
        let extn_value_bytes =
            build_mandatory::<PrimitiveBuilder<OctetString>>(&nodes, &mut idx, depth + 1, "Extension.extnValue")?;
        expect_exhausted(&nodes, idx, "Extension: unexpected trailing field")?;
        let extn_value = ExtensionValue::decode(&extn_id, &extn_value_bytes.0, depth + 1)?;
        Ok(Extension { extn_id, critical, extn_value })
    }
}

impl DefaultIdentifier for ExtensionBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for Extension {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = alloc::vec![self.extn_id.encode()?];
        if let Some(critical) = suppress_default(self.critical, &false) {
            fields.push(critical.encode()?);
        }
        fields.push(OctetString(self.extn_value.encode()?).encode()?);
        Ok(encode_sequence(&fields))
    }
}

/// `Extensions ::= SEQUENCE OF Extension`.
pub type Extensions = Vec<Extension>;
pub type ExtensionsBuilder = SequenceOf<ExtensionBuilder>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;

    #[test]
    fn basic_constraints_both_defaults_encodes_to_empty_sequence() {
        let value = BasicConstraints::default();
        let der = value.encode().unwrap();
        assert_eq!(der, alloc::vec![0x30, 0x00]);
        assert_eq!(parse::<BasicConstraintsBuilder>(&der).unwrap(), value);
    }

    #[test]
    fn extension_with_false_critical_omits_boolean() {
        let value = Extension {
            extn_id: oids::basic_constraints_oid(),
            critical: false,
            extn_value: ExtensionValue::BasicConstraints(BasicConstraints::default()),
        };
        let der = value.encode().unwrap();
        // SEQUENCE { OID, OCTET STRING } — no BOOLEAN TLV (tag 0x01) present.
        assert!(!der.contains(&0x01u8) || der[2] != 0x01);
        let decoded = parse::<ExtensionBuilder>(&der).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn name_constraints_requires_at_least_one_subtree() {
        let empty = crate::codec::encode_header(crate::tag::Class::Universal, true, Tag::SEQUENCE.value, 0);
        assert!(parse::<NameConstraintsBuilder>(&empty).is_err());
    }

    #[test]
    fn unknown_extension_oid_falls_back_to_raw_octets() {
        let value = Extension {
            extn_id: ObjectIdentifier::new(alloc::vec![1, 2, 3, 4, 5]),
            critical: true,
            extn_value: ExtensionValue::Other(alloc::vec![0xde, 0xad, 0xbe, 0xef]),
        };
        let der = value.encode().unwrap();
        assert_eq!(parse::<ExtensionBuilder>(&der).unwrap(), value);
    }
}
