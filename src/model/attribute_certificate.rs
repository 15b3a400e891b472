//! `AttributeCertificate`, RFC 5755 §4.1.

use alloc::vec::Vec;

use crate::builder::context_tagged::ContextTagged;
use crate::builder::optional::{build_mandatory, build_optional, expect_exhausted};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::value::Integer;
use crate::builder::{child_nodes, Builder, DefaultIdentifier};
use crate::choice_builder;
use crate::codec::{BitString, ObjectIdentifier};
use crate::encode::{encode_sequence, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::tag::Tag;

use super::algorithm_identifier::{AlgorithmIdentifier, AlgorithmIdentifierBuilder};
use super::extension::{Extensions, ExtensionsBuilder};
use super::general_name::GeneralName;
use super::name::{Name, NameBuilder};
use super::raw::RawData;

/// `IssuerSerial ::= SEQUENCE { issuer GeneralNames, serial CertificateSerialNumber, issuerUID UniqueIdentifier OPTIONAL }`.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuerSerial {
    pub issuer: Vec<GeneralName>,
    pub serial: num_bigint::BigInt,
    pub issuer_uid: Option<BitString>,
}

pub struct IssuerSerialBuilder;

impl Builder for IssuerSerialBuilder {
    type Output = IssuerSerial;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<IssuerSerial, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected IssuerSerial SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let issuer = build_mandatory::<crate::builder::collection::SequenceOf<GeneralName>>(
            &nodes,
            &mut idx,
            depth + 1,
            "IssuerSerial.issuer",
        )?;
        let serial =
            build_mandatory::<PrimitiveBuilder<Integer>>(&nodes, &mut idx, depth + 1, "IssuerSerial.serial")?.0;
        let issuer_uid = build_optional::<PrimitiveBuilder<BitString>>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "IssuerSerial: unexpected trailing field")?;
        Ok(IssuerSerial { issuer, serial, issuer_uid })
    }
}

impl DefaultIdentifier for IssuerSerialBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for IssuerSerial {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let issuer: Vec<Vec<u8>> = self.issuer.iter().map(Encode::encode).collect::<Result<_, _>>()?;
        let mut fields = alloc::vec![encode_sequence(&issuer), Integer(self.serial.clone()).encode()?];
        if let Some(uid) = &self.issuer_uid {
            fields.push(uid.encode()?);
        }
        Ok(encode_sequence(&fields))
    }
}

/// `ObjectDigestInfo ::= SEQUENCE { digestedObjectType ENUMERATED, otherObjectTypeID OBJECT IDENTIFIER OPTIONAL, digestAlgorithm AlgorithmIdentifier, objectDigest BIT STRING }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDigestInfo {
    pub digested_object_type: num_bigint::BigInt,
    pub other_object_type_id: Option<ObjectIdentifier>,
    pub digest_algorithm: AlgorithmIdentifier,
    pub object_digest: BitString,
}

pub struct ObjectDigestInfoBuilder;

impl Builder for ObjectDigestInfoBuilder {
    type Output = ObjectDigestInfo;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<ObjectDigestInfo, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected ObjectDigestInfo SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let digested_object_type = build_mandatory::<PrimitiveBuilder<crate::builder::value::Enumerated>>(
            &nodes,
            &mut idx,
            depth + 1,
            "ObjectDigestInfo.digestedObjectType",
        )?
        .0;
        let other_object_type_id = build_optional::<PrimitiveBuilder<ObjectIdentifier>>(&nodes, &mut idx, depth + 1)?;
        let digest_algorithm = build_mandatory::<AlgorithmIdentifierBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "ObjectDigestInfo.digestAlgorithm",
        )?;
        let object_digest = build_mandatory::<PrimitiveBuilder<BitString>>(
            &nodes,
            &mut idx,
            depth + 1,
            "ObjectDigestInfo.objectDigest",
        )?;
        expect_exhausted(&nodes, idx, "ObjectDigestInfo: unexpected trailing field")?;
        Ok(ObjectDigestInfo { digested_object_type, other_object_type_id, digest_algorithm, object_digest })
    }
}

impl DefaultIdentifier for ObjectDigestInfoBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for ObjectDigestInfo {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = alloc::vec![crate::builder::value::Enumerated(self.digested_object_type.clone()).encode()?];
        if let Some(oid) = &self.other_object_type_id {
            fields.push(oid.encode()?);
        }
        fields.push(self.digest_algorithm.encode()?);
        fields.push(self.object_digest.encode()?);
        Ok(encode_sequence(&fields))
    }
}

type BaseCertificateIdTag = ContextTagged<IssuerSerialBuilder, 0, false>;
type EntityNameTag = ContextTagged<crate::builder::collection::SequenceOf<GeneralName>, 1, false>;
type ObjectDigestInfoTag = ContextTagged<ObjectDigestInfoBuilder, 2, false>;

choice_builder! {
    /// `Holder ::= SEQUENCE { baseCertificateID [0] IssuerSerial OPTIONAL, entityName [1] GeneralNames OPTIONAL, objectDigestInfo [2] ObjectDigestInfo OPTIONAL }`
    /// modeled as a CHOICE since RFC 5755 requires exactly one to be
    /// present in practice.
    pub enum Holder {
        BaseCertificateId(BaseCertificateIdTag),
        EntityName(EntityNameTag),
        ObjectDigestInfo(ObjectDigestInfoTag),
    }
}

impl Encode for Holder {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Holder::BaseCertificateId(v) => crate::encode::encode_implicit(0, &v.encode()?),
            Holder::EntityName(v) => {
                let items: Vec<Vec<u8>> = v.iter().map(Encode::encode).collect::<Result<_, _>>()?;
                crate::encode::encode_implicit(1, &encode_sequence(&items))
            }
            Holder::ObjectDigestInfo(v) => crate::encode::encode_implicit(2, &v.encode()?),
        }
    }
}

choice_builder! {
    /// `AttCertIssuer ::= CHOICE { v1Form GeneralNames, v2Form [0] V2Form }`.
    /// `v1Form` is untagged and modeled narrowed to a single `Name` (the
    /// common case); `v2Form` is `[0]`-tagged and kept opaque as
    /// [`RawData`] since its `objectDigestInfo` alternative is rarely used
    /// in practice. `v1Form` must be tried first since `RawData` matches
    /// unconditionally.
    pub enum Issuer {
        V1Form(NameBuilder),
        V2Form(RawData),
    }
}

impl Encode for Issuer {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Issuer::V1Form(name) => name.encode(),
            Issuer::V2Form(raw) => raw.encode(),
        }
    }
}

/// `AttCertValidityPeriod ::= SEQUENCE { notBeforeTime GeneralizedTime, notAfterTime GeneralizedTime }`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttCertValidityPeriod {
    pub not_before_time: crate::codec::GeneralizedTime,
    pub not_after_time: crate::codec::GeneralizedTime,
}

pub struct AttCertValidityPeriodBuilder;

impl Builder for AttCertValidityPeriodBuilder {
    type Output = AttCertValidityPeriod;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<AttCertValidityPeriod, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected AttCertValidityPeriod SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let not_before_time = build_mandatory::<PrimitiveBuilder<crate::codec::GeneralizedTime>>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttCertValidityPeriod.notBeforeTime",
        )?;
        let not_after_time = build_mandatory::<PrimitiveBuilder<crate::codec::GeneralizedTime>>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttCertValidityPeriod.notAfterTime",
        )?;
        expect_exhausted(&nodes, idx, "AttCertValidityPeriod: unexpected trailing field")?;
        Ok(AttCertValidityPeriod { not_before_time, not_after_time })
    }
}

impl DefaultIdentifier for AttCertValidityPeriodBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for AttCertValidityPeriod {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[self.not_before_time.encode()?, self.not_after_time.encode()?]))
    }
}

/// `Attribute` as used inside an attribute certificate; reuses the
/// `model::csr::Attribute` shape (RFC 5755 attributes have the same
/// `type`/`values` SEQUENCE/SET OF AttributeValue structure as PKCS#10's).
pub use super::csr::{Attribute, AttributeBuilder};

/// `AttributeCertificateInfo ::= SEQUENCE { ... }`, RFC 5755 §4.1. `version`
/// must be `v2` (value 1); any other value is a decode error rather than
/// silently accepted, per the normative invariant that only AttributeCertificate
/// v2 is defined.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeCertificateInfo {
    pub holder: Holder,
    pub issuer: Issuer,
    pub signature: AlgorithmIdentifier,
    pub serial_number: num_bigint::BigInt,
    pub att_cert_validity_period: AttCertValidityPeriod,
    pub attributes: Vec<Attribute>,
    pub issuer_unique_id: Option<BitString>,
    pub extensions: Option<Extensions>,
}

pub struct AttributeCertificateInfoBuilder;

impl Builder for AttributeCertificateInfoBuilder {
    type Output = AttributeCertificateInfo;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<AttributeCertificateInfo, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected AttributeCertificateInfo SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let version = build_mandatory::<PrimitiveBuilder<Integer>>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttributeCertificateInfo.version",
        )?;
        if version.0 != 1.into() {
            return Err(DecodeError::invalid_content("AttributeCertificateInfo.version: only v2 (value 1) is defined"));
        }
        let holder = build_mandatory::<Holder>(&nodes, &mut idx, depth + 1, "AttributeCertificateInfo.holder")?;
        let issuer = build_mandatory::<Issuer>(&nodes, &mut idx, depth + 1, "AttributeCertificateInfo.issuer")?;
        let signature = build_mandatory::<AlgorithmIdentifierBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttributeCertificateInfo.signature",
        )?;
        let serial_number = build_mandatory::<PrimitiveBuilder<Integer>>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttributeCertificateInfo.serialNumber",
        )?
        .0;
        let att_cert_validity_period = build_mandatory::<AttCertValidityPeriodBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttributeCertificateInfo.attCertValidityPeriod",
        )?;
        let attributes = build_mandatory::<crate::builder::collection::SequenceOf<AttributeBuilder>>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttributeCertificateInfo.attributes",
        )?;
        let issuer_unique_id = build_optional::<PrimitiveBuilder<BitString>>(&nodes, &mut idx, depth + 1)?;
        let extensions = build_optional::<ExtensionsBuilder>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "AttributeCertificateInfo: unexpected trailing field")?;
        Ok(AttributeCertificateInfo {
            holder,
            issuer,
            signature,
            serial_number,
            att_cert_validity_period,
            attributes,
            issuer_unique_id,
            extensions,
        })
    }
}

impl DefaultIdentifier for AttributeCertificateInfoBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for AttributeCertificateInfo {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let attributes: Vec<Vec<u8>> = self.attributes.iter().map(Encode::encode).collect::<Result<_, _>>()?;
        let mut fields = alloc::vec![
            Integer(1.into()).encode()?,
            self.holder.encode()?,
            self.issuer.encode()?,
            self.signature.encode()?,
            Integer(self.serial_number.clone()).encode()?,
            self.att_cert_validity_period.encode()?,
            encode_sequence(&attributes),
        ];
        if let Some(id) = &self.issuer_unique_id {
            fields.push(id.encode()?);
        }
        if let Some(extensions) = &self.extensions {
            let items: Vec<Vec<u8>> = extensions.iter().map(Encode::encode).collect::<Result<_, _>>()?;
            fields.push(encode_sequence(&items));
        }
        Ok(encode_sequence(&fields))
    }
}

/// `AttributeCertificate ::= SEQUENCE { acinfo AttributeCertificateInfo, signatureAlgorithm AlgorithmIdentifier, signatureValue BIT STRING }`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeCertificate {
    pub ac_info: AttributeCertificateInfo,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature_value: BitString,
}

pub struct AttributeCertificateBuilder;

impl Builder for AttributeCertificateBuilder {
    type Output = AttributeCertificate;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<AttributeCertificate, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected AttributeCertificate SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let ac_info = build_mandatory::<AttributeCertificateInfoBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttributeCertificate.acinfo",
        )?;
        let signature_algorithm = build_mandatory::<AlgorithmIdentifierBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttributeCertificate.signatureAlgorithm",
        )?;
        let signature_value = build_mandatory::<PrimitiveBuilder<BitString>>(
            &nodes,
            &mut idx,
            depth + 1,
            "AttributeCertificate.signatureValue",
        )?;
        expect_exhausted(&nodes, idx, "AttributeCertificate: unexpected trailing field")?;
        Ok(AttributeCertificate { ac_info, signature_algorithm, signature_value })
    }
}

impl DefaultIdentifier for AttributeCertificateBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for AttributeCertificate {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[
            self.ac_info.encode()?,
            self.signature_algorithm.encode()?,
            self.signature_value.encode()?,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;

    #[test]
    fn attribute_certificate_info_rejects_non_v2_version() {
        // version INTEGER 0 (v1) instead of the mandatory 1 (v2).
        let bogus = alloc::vec![0x02, 0x01, 0x00];
        assert!(parse::<PrimitiveBuilder<Integer>>(&bogus).is_ok());
        // Full AttributeCertificateInfo with version 0 must fail.
        let info = AttributeCertificateInfo {
            holder: Holder::EntityName(alloc::vec![GeneralName::DnsName(crate::codec::Ia5String(
                b"example.com".to_vec()
            ))]),
            issuer: Issuer::V1Form(Name::default()),
            signature: AlgorithmIdentifier { algorithm: crate::oids::sha256_with_rsa_encryption_oid(), parameters: None },
            serial_number: 1.into(),
            att_cert_validity_period: AttCertValidityPeriod {
                not_before_time: crate::codec::GeneralizedTime("20240101000000Z".into()),
                not_after_time: crate::codec::GeneralizedTime("20250101000000Z".into()),
            },
            attributes: Vec::new(),
            issuer_unique_id: None,
            extensions: None,
        };
        let mut der = info.encode().unwrap();
        // Rewrite the version INTEGER's content byte from 1 to 0 (offset depends on
        // the SEQUENCE header length, but the version field is always first after it).
        let version_content_pos = der.iter().position(|&b| b == 0x02).unwrap() + 2;
        der[version_content_pos] = 0x00;
        assert!(parse::<AttributeCertificateInfoBuilder>(&der).is_err());
    }

    #[test]
    fn attribute_certificate_round_trips() {
        let info = AttributeCertificateInfo {
            holder: Holder::EntityName(alloc::vec![GeneralName::DnsName(crate::codec::Ia5String(
                b"example.com".to_vec()
            ))]),
            issuer: Issuer::V1Form(Name::default()),
            signature: AlgorithmIdentifier { algorithm: crate::oids::sha256_with_rsa_encryption_oid(), parameters: None },
            serial_number: 1.into(),
            att_cert_validity_period: AttCertValidityPeriod {
                not_before_time: crate::codec::GeneralizedTime("20240101000000Z".into()),
                not_after_time: crate::codec::GeneralizedTime("20250101000000Z".into()),
            },
            attributes: Vec::new(),
            issuer_unique_id: None,
            extensions: None,
        };
        let cert = AttributeCertificate {
            ac_info: info,
            signature_algorithm: AlgorithmIdentifier {
                algorithm: crate::oids::sha256_with_rsa_encryption_oid(),
                parameters: None,
            },
            signature_value: BitString { bytes: alloc::vec![0x01], unused_bits: 0 },
        };
        let der = cert.encode().unwrap();
        assert_eq!(parse::<AttributeCertificateBuilder>(&der).unwrap(), cert);
    }
}
