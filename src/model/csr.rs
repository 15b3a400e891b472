//! `CertificationRequest`, RFC 2986 (PKCS#10).

use alloc::vec::Vec;

use crate::builder::collection::SetOf;
use crate::builder::context_tagged::ContextTagged;
use crate::builder::optional::{build_mandatory, build_optional, expect_exhausted};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::value::Integer;
use crate::builder::{Builder, DefaultIdentifier};
use crate::codec::{BitString, ObjectIdentifier};
use crate::encode::{encode_implicit, encode_sequence, encode_set, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::tag::Tag;

use super::algorithm_identifier::{AlgorithmIdentifier, AlgorithmIdentifierBuilder};
use super::certificate::{SubjectPublicKeyInfo, SubjectPublicKeyInfoBuilder};
use super::name::{AttributeValue, Name, NameBuilder};

/// `Attribute ::= SEQUENCE { type OBJECT IDENTIFIER, values SET OF AttributeValue }`,
/// shared by `CertificationRequestInfo.attributes` and X.501 attribute
/// collections generally.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub attr_type: ObjectIdentifier,
    pub values: Vec<AttributeValue>,
}

pub struct AttributeBuilder;

impl Builder for AttributeBuilder {
    type Output = Attribute;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<Attribute, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected Attribute SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let attr_type =
            build_mandatory::<PrimitiveBuilder<ObjectIdentifier>>(&nodes, &mut idx, depth + 1, "Attribute.type")?;
        let values = build_mandatory::<SetOf<AttributeValue>>(&nodes, &mut idx, depth + 1, "Attribute.values")?;
        expect_exhausted(&nodes, idx, "Attribute: unexpected trailing field")?;
        Ok(Attribute { attr_type, values })
    }
}

impl DefaultIdentifier for AttributeBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for Attribute {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let values: Vec<Vec<u8>> = self.values.iter().map(Encode::encode).collect::<Result<_, _>>()?;
        Ok(encode_sequence(&[self.attr_type.encode()?, encode_set(values)]))
    }
}

type AttributesTag = ContextTagged<SetOf<AttributeBuilder>, 0, false>;

/// `CertificationRequestInfo ::= SEQUENCE { version INTEGER, subject Name, subjectPKInfo SubjectPublicKeyInfo, attributes [0] IMPLICIT SET OF Attribute }`.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificationRequestInfo {
    pub version: num_bigint::BigInt,
    pub subject: Name,
    pub subject_pk_info: SubjectPublicKeyInfo,
    pub attributes: Vec<Attribute>,
}

pub struct CertificationRequestInfoBuilder;

impl Builder for CertificationRequestInfoBuilder {
    type Output = CertificationRequestInfo;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<CertificationRequestInfo, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected CertificationRequestInfo SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let version = build_mandatory::<PrimitiveBuilder<Integer>>(
            &nodes,
            &mut idx,
            depth + 1,
            "CertificationRequestInfo.version",
        )?
        .0;
        let subject =
            build_mandatory::<NameBuilder>(&nodes, &mut idx, depth + 1, "CertificationRequestInfo.subject")?;
        let subject_pk_info = build_mandatory::<SubjectPublicKeyInfoBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "CertificationRequestInfo.subjectPKInfo",
        )?;
        let attributes = build_optional::<AttributesTag>(&nodes, &mut idx, depth + 1)?.unwrap_or_default();
        expect_exhausted(&nodes, idx, "CertificationRequestInfo: unexpected trailing field")?;
        Ok(CertificationRequestInfo { version, subject, subject_pk_info, attributes })
    }
}

impl DefaultIdentifier for CertificationRequestInfoBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for CertificationRequestInfo {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let attributes: Vec<Vec<u8>> = self.attributes.iter().map(Encode::encode).collect::<Result<_, _>>()?;
        Ok(encode_sequence(&[
            Integer(self.version.clone()).encode()?,
            self.subject.encode()?,
            self.subject_pk_info.encode()?,
            encode_implicit(0, &encode_set(attributes))?,
        ]))
    }
}

/// `CertificationRequest ::= SEQUENCE { certificationRequestInfo CertificationRequestInfo, signatureAlgorithm AlgorithmIdentifier, signature BIT STRING }`.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificationRequest {
    pub certification_request_info: CertificationRequestInfo,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature: BitString,
}

pub struct CertificationRequestBuilder;

impl Builder for CertificationRequestBuilder {
    type Output = CertificationRequest;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<CertificationRequest, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected CertificationRequest SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let certification_request_info = build_mandatory::<CertificationRequestInfoBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "CertificationRequest.certificationRequestInfo",
        )?;
        let signature_algorithm = build_mandatory::<AlgorithmIdentifierBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "CertificationRequest.signatureAlgorithm",
        )?;
        let signature = build_mandatory::<PrimitiveBuilder<BitString>>(
            &nodes,
            &mut idx,
            depth + 1,
            "CertificationRequest.signature",
        )?;
        expect_exhausted(&nodes, idx, "CertificationRequest: unexpected trailing field")?;
        Ok(CertificationRequest { certification_request_info, signature_algorithm, signature })
    }
}

impl DefaultIdentifier for CertificationRequestBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for CertificationRequest {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[
            self.certification_request_info.encode()?,
            self.signature_algorithm.encode()?,
            self.signature.encode()?,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;

    #[test]
    fn csr_with_no_attributes_round_trips() {
        let info = CertificationRequestInfo {
            version: 0.into(),
            subject: Name::default(),
            subject_pk_info: SubjectPublicKeyInfo {
                algorithm: AlgorithmIdentifier { algorithm: crate::oids::rsa_encryption_oid(), parameters: None },
                subject_public_key: BitString { bytes: alloc::vec![0x01, 0x02], unused_bits: 0 },
            },
            attributes: Vec::new(),
        };
        let der = info.encode().unwrap();
        assert_eq!(parse::<CertificationRequestInfoBuilder>(&der).unwrap(), info);
    }

    #[test]
    fn full_certification_request_round_trips() {
        let req = CertificationRequest {
            certification_request_info: CertificationRequestInfo {
                version: 0.into(),
                subject: Name::default(),
                subject_pk_info: SubjectPublicKeyInfo {
                    algorithm: AlgorithmIdentifier { algorithm: crate::oids::rsa_encryption_oid(), parameters: None },
                    subject_public_key: BitString { bytes: alloc::vec![0x01], unused_bits: 0 },
                },
                attributes: Vec::new(),
            },
            signature_algorithm: AlgorithmIdentifier {
                algorithm: crate::oids::sha256_with_rsa_encryption_oid(),
                parameters: None,
            },
            signature: BitString { bytes: alloc::vec![0xff], unused_bits: 0 },
        };
        let der = req.encode().unwrap();
        assert_eq!(parse::<CertificationRequestBuilder>(&der).unwrap(), req);
    }
}
