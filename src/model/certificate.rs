//! `Certificate`, RFC 5280 §4.1: `SEQUENCE { tbsCertificate, signatureAlgorithm, signatureValue }`.

use alloc::vec::Vec;

use crate::builder::context_tagged::ContextTagged;
use crate::builder::optional::{build_mandatory, build_optional, expect_exhausted, suppress_default};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::value::Integer;
use crate::builder::{Builder, DefaultIdentifier};
use crate::codec::BitString;
use crate::encode::{encode_implicit, encode_sequence, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::tag::Tag;

use super::algorithm_identifier::{AlgorithmIdentifier, AlgorithmIdentifierBuilder};
use super::extension::{Extensions, ExtensionsBuilder};
use super::name::{Name, NameBuilder};
use super::validity::{Validity, ValidityBuilder};

/// `Version ::= INTEGER { v1(0), v2(1), v3(2) }`, `[0] EXPLICIT`, default v1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    #[default]
    V1,
    V2,
    V3,
}

impl Version {
    fn as_i64(self) -> i64 {
        match self {
            Version::V1 => 0,
            Version::V2 => 1,
            Version::V3 => 2,
        }
    }

    fn from_bigint(value: &num_bigint::BigInt) -> Result<Self, DecodeError> {
        match value {
            v if *v == 0.into() => Ok(Version::V1),
            v if *v == 1.into() => Ok(Version::V2),
            v if *v == 2.into() => Ok(Version::V3),
            _ => Err(DecodeError::invalid_content("Version: not one of v1/v2/v3")),
        }
    }
}

type VersionTag = ContextTagged<PrimitiveBuilder<Integer>, 0, true>;

/// `SubjectPublicKeyInfo ::= SEQUENCE { algorithm AlgorithmIdentifier, subjectPublicKey BIT STRING }`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub subject_public_key: BitString,
}

pub struct SubjectPublicKeyInfoBuilder;

impl Builder for SubjectPublicKeyInfoBuilder {
    type Output = SubjectPublicKeyInfo;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<SubjectPublicKeyInfo, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected SubjectPublicKeyInfo SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let algorithm = build_mandatory::<AlgorithmIdentifierBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "SubjectPublicKeyInfo.algorithm",
        )?;
        let subject_public_key = build_mandatory::<PrimitiveBuilder<BitString>>(
            &nodes,
            &mut idx,
            depth + 1,
            "SubjectPublicKeyInfo.subjectPublicKey",
        )?;
        expect_exhausted(&nodes, idx, "SubjectPublicKeyInfo: unexpected trailing field")?;
        Ok(SubjectPublicKeyInfo { algorithm, subject_public_key })
    }
}

impl DefaultIdentifier for SubjectPublicKeyInfoBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for SubjectPublicKeyInfo {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[self.algorithm.encode()?, self.subject_public_key.encode()?]))
    }
}

type IssuerUniqueIdTag = ContextTagged<PrimitiveBuilder<BitString>, 1, false>;
type SubjectUniqueIdTag = ContextTagged<PrimitiveBuilder<BitString>, 2, false>;
type ExtensionsTag = ContextTagged<ExtensionsBuilder, 3, true>;

/// `TBSCertificate ::= SEQUENCE { ... }`, RFC 5280 §4.1.2.
#[derive(Debug, Clone, PartialEq)]
pub struct TbsCertificate {
    pub version: Version,
    pub serial_number: num_bigint::BigInt,
    pub signature: AlgorithmIdentifier,
    pub issuer: Name,
    pub validity: Validity,
    pub subject: Name,
    pub subject_public_key_info: SubjectPublicKeyInfo,
    pub issuer_unique_id: Option<BitString>,
    pub subject_unique_id: Option<BitString>,
    pub extensions: Option<Extensions>,
}

pub struct TbsCertificateBuilder;

impl Builder for TbsCertificateBuilder {
    type Output = TbsCertificate;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<TbsCertificate, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected TBSCertificate SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let version = match build_optional::<VersionTag>(&nodes, &mut idx, depth + 1)? {
            Some(v) => Version::from_bigint(&v.0)?,
            None => Version::V1,
        };
        let serial_number =
            build_mandatory::<PrimitiveBuilder<Integer>>(&nodes, &mut idx, depth + 1, "TBSCertificate.serialNumber")?
                .0;
        let signature = build_mandatory::<AlgorithmIdentifierBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "TBSCertificate.signature",
        )?;
        let issuer = build_mandatory::<NameBuilder>(&nodes, &mut idx, depth + 1, "TBSCertificate.issuer")?;
        let validity = build_mandatory::<ValidityBuilder>(&nodes, &mut idx, depth + 1, "TBSCertificate.validity")?;
        let subject = build_mandatory::<NameBuilder>(&nodes, &mut idx, depth + 1, "TBSCertificate.subject")?;
        let subject_public_key_info = build_mandatory::<SubjectPublicKeyInfoBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "TBSCertificate.subjectPublicKeyInfo",
        )?;
        let issuer_unique_id = build_optional::<IssuerUniqueIdTag>(&nodes, &mut idx, depth + 1)?;
        let subject_unique_id = build_optional::<SubjectUniqueIdTag>(&nodes, &mut idx, depth + 1)?;
        let extensions = build_optional::<ExtensionsTag>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "TBSCertificate: unexpected trailing field")?;
        Ok(TbsCertificate {
            version,
            serial_number,
            signature,
            issuer,
            validity,
            subject,
            subject_public_key_info,
            issuer_unique_id,
            subject_unique_id,
            extensions,
        })
    }
}

impl DefaultIdentifier for TbsCertificateBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for TbsCertificate {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(version) = suppress_default(self.version, &Version::V1) {
            fields.push(crate::encode::encode_explicit(0, &Integer(version.as_i64().into()).encode()?));
        }
        fields.push(Integer(self.serial_number.clone()).encode()?);
        fields.push(self.signature.encode()?);
        fields.push(self.issuer.encode()?);
        fields.push(self.validity.encode()?);
        fields.push(self.subject.encode()?);
        fields.push(self.subject_public_key_info.encode()?);
        if let Some(id) = &self.issuer_unique_id {
            fields.push(encode_implicit(1, &id.encode()?)?);
        }
        if let Some(id) = &self.subject_unique_id {
            fields.push(encode_implicit(2, &id.encode()?)?);
        }
        if let Some(extensions) = &self.extensions {
            let items: Vec<Vec<u8>> = extensions.iter().map(Encode::encode).collect::<Result<_, _>>()?;
            fields.push(crate::encode::encode_explicit(3, &encode_sequence(&items)));
        }
        Ok(encode_sequence(&fields))
    }
}

/// `Certificate ::= SEQUENCE { tbsCertificate TBSCertificate, signatureAlgorithm AlgorithmIdentifier, signatureValue BIT STRING }`.
#[derive(Debug, Clone, PartialEq)]
pub struct X509Certificate {
    pub tbs_certificate: TbsCertificate,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature_value: BitString,
}

pub struct X509CertificateBuilder;

impl Builder for X509CertificateBuilder {
    type Output = X509Certificate;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<X509Certificate, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected Certificate SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let tbs_certificate = build_mandatory::<TbsCertificateBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "Certificate.tbsCertificate",
        )?;
        let signature_algorithm = build_mandatory::<AlgorithmIdentifierBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "Certificate.signatureAlgorithm",
        )?;
        let signature_value = build_mandatory::<PrimitiveBuilder<BitString>>(
            &nodes,
            &mut idx,
            depth + 1,
            "Certificate.signatureValue",
        )?;
        expect_exhausted(&nodes, idx, "Certificate: unexpected trailing field")?;
        Ok(X509Certificate { tbs_certificate, signature_algorithm, signature_value })
    }
}

impl DefaultIdentifier for X509CertificateBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for X509Certificate {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[
            self.tbs_certificate.encode()?,
            self.signature_algorithm.encode()?,
            self.signature_value.encode()?,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;

    fn sample_tbs() -> TbsCertificate {
        TbsCertificate {
            version: Version::V3,
            serial_number: 1.into(),
            signature: AlgorithmIdentifier { algorithm: crate::oids::sha256_with_rsa_encryption_oid(), parameters: None },
            issuer: Name::default(),
            validity: Validity {
                not_before: super::validity::Time::Utc(crate::codec::UtcTime("240101000000Z".into())),
                not_after: super::validity::Time::Utc(crate::codec::UtcTime("250101000000Z".into())),
            },
            subject: Name::default(),
            subject_public_key_info: SubjectPublicKeyInfo {
                algorithm: AlgorithmIdentifier { algorithm: crate::oids::rsa_encryption_oid(), parameters: None },
                subject_public_key: BitString { bytes: alloc::vec![0x00], unused_bits: 0 },
            },
            issuer_unique_id: None,
            subject_unique_id: None,
            extensions: None,
        }
    }

    #[test]
    fn version_v1_is_suppressed_on_encode() {
        let mut tbs = sample_tbs();
        tbs.version = Version::V1;
        let der = tbs.encode().unwrap();
        // first field after the (absent) version tag is the serial number, an INTEGER (0x02).
        assert_eq!(der[2], 0x02);
        assert_eq!(parse::<TbsCertificateBuilder>(&der).unwrap(), tbs);
    }

    #[test]
    fn version_v3_round_trips_through_explicit_tag() {
        let tbs = sample_tbs();
        let der = tbs.encode().unwrap();
        assert_eq!(der[2], 0xa0); // [0] EXPLICIT, constructed
        assert_eq!(parse::<TbsCertificateBuilder>(&der).unwrap(), tbs);
    }

    #[test]
    fn full_certificate_round_trips() {
        let cert = X509Certificate {
            tbs_certificate: sample_tbs(),
            signature_algorithm: AlgorithmIdentifier {
                algorithm: crate::oids::sha256_with_rsa_encryption_oid(),
                parameters: None,
            },
            signature_value: BitString { bytes: alloc::vec![0xab, 0xcd], unused_bits: 0 },
        };
        let der = cert.encode().unwrap();
        assert_eq!(parse::<X509CertificateBuilder>(&der).unwrap(), cert);
    }
}
