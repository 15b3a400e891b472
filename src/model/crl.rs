//! Certificate revocation lists, RFC 5280 §5: `CertificateList`,
//! `TBSCertList`, `RevokedCertificate`, and the `DistributionPoint` family
//! shared with the `cRLDistributionPoints` extension.

use alloc::vec::Vec;

use crate::builder::collection::SequenceOf;
use crate::builder::context_tagged::ContextTagged;
use crate::builder::optional::{build_mandatory, build_optional, expect_exhausted};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::value::Integer;
use crate::builder::{Builder, DefaultIdentifier};
use crate::choice_builder;
use crate::codec::BitString;
use crate::encode::{encode_explicit, encode_implicit, encode_sequence, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::tag::Tag;

use super::algorithm_identifier::{AlgorithmIdentifier, AlgorithmIdentifierBuilder};
use super::extension::{Extensions, ExtensionsBuilder};
use super::general_name::GeneralName;
use super::name::{Name, NameBuilder};
use super::validity::Time;

/// `DistributionPointName ::= CHOICE { fullName [0] GeneralNames, nameRelativeToCRLIssuer [1] RelativeDistinguishedName }`.
///
/// Both alternatives are CHOICE/SET-shaped, so — as with `directoryName`
/// in [`super::general_name`] — the context tag is realized as IMPLICIT
/// over a type with a fixed `DefaultIdentifier` rather than through
/// per-variant special casing.
type FullNameTag = ContextTagged<SequenceOf<GeneralName>, 0, false>;
type RelativeNameTag = ContextTagged<super::name::RelativeDistinguishedNameBuilder, 1, false>;

choice_builder! {
    pub enum DistributionPointName {
        FullName(FullNameTag),
        NameRelativeToCrlIssuer(RelativeNameTag),
    }
}

impl Encode for DistributionPointName {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            DistributionPointName::FullName(names) => {
                let items: Vec<Vec<u8>> = names.iter().map(Encode::encode).collect::<Result<_, _>>()?;
                encode_implicit(0, &encode_sequence(&items))
            }
            DistributionPointName::NameRelativeToCrlIssuer(rdn) => encode_implicit(1, &rdn.encode()?),
        }
    }
}

type DistributionPointNameTag = ContextTagged<DistributionPointNameAsDefaultTagged, 0, true>;

/// `DistributionPointName` re-exposed with a fixed outer identifier so it
/// can sit behind the `[0] EXPLICIT` field of `DistributionPoint` — CHOICE
/// types have no `DefaultIdentifier` of their own (X.680), so this crate
/// wraps the dispatch in a one-off adapter rather than special-casing
/// `DistributionPoint`'s builder.
pub struct DistributionPointNameAsDefaultTagged;

impl Builder for DistributionPointNameAsDefaultTagged {
    type Output = DistributionPointName;

    fn matches(identifier: Identifier) -> bool {
        DistributionPointName::matches(identifier)
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<DistributionPointName, DecodeError> {
        DistributionPointName::build(identifier, content, depth)
    }
}

impl DefaultIdentifier for DistributionPointNameAsDefaultTagged {
    fn default_identifier() -> Identifier {
        // Arbitrary: never consulted by the EXPLICIT branch of ContextTagged,
        // which only needs the CHOICE's own `matches`/`build`.
        Identifier::new(Tag::SEQUENCE, true)
    }
}

type ReasonFlagsTag = ContextTagged<PrimitiveBuilder<BitString>, 1, false>;
type CrlIssuerTag = ContextTagged<SequenceOf<GeneralName>, 2, false>;

/// `DistributionPoint ::= SEQUENCE { distributionPoint [0] EXPLICIT DistributionPointName OPTIONAL, reasons [1] IMPLICIT ReasonFlags OPTIONAL, cRLIssuer [2] IMPLICIT GeneralNames OPTIONAL }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DistributionPoint {
    pub distribution_point: Option<DistributionPointName>,
    pub reasons: Option<BitString>,
    pub crl_issuer: Option<Vec<GeneralName>>,
}

pub struct DistributionPointBuilder;

impl Builder for DistributionPointBuilder {
    type Output = DistributionPoint;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<DistributionPoint, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected DistributionPoint SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let distribution_point = build_optional::<DistributionPointNameTag>(&nodes, &mut idx, depth + 1)?;
        let reasons = build_optional::<ReasonFlagsTag>(&nodes, &mut idx, depth + 1)?;
        let crl_issuer = build_optional::<CrlIssuerTag>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "DistributionPoint: unexpected trailing field")?;
        Ok(DistributionPoint { distribution_point, reasons, crl_issuer })
    }
}

impl DefaultIdentifier for DistributionPointBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for DistributionPoint {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(name) = &self.distribution_point {
            fields.push(encode_explicit(0, &name.encode()?));
        }
        if let Some(reasons) = &self.reasons {
            fields.push(encode_implicit(1, &reasons.encode()?)?);
        }
        if let Some(names) = &self.crl_issuer {
            let items: Vec<Vec<u8>> = names.iter().map(Encode::encode).collect::<Result<_, _>>()?;
            fields.push(encode_implicit(2, &encode_sequence(&items))?);
        }
        Ok(encode_sequence(&fields))
    }
}

/// `IssuingDistributionPoint ::= SEQUENCE { distributionPoint [0] EXPLICIT DistributionPointName OPTIONAL, onlyContainsUserCerts [1] IMPLICIT BOOLEAN DEFAULT FALSE, onlyContainsCACerts [2] IMPLICIT BOOLEAN DEFAULT FALSE, onlySomeReasons [3] IMPLICIT ReasonFlags OPTIONAL, indirectCRL [4] IMPLICIT BOOLEAN DEFAULT FALSE, onlyContainsAttributeCerts [5] IMPLICIT BOOLEAN DEFAULT FALSE }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssuingDistributionPoint {
    pub distribution_point: Option<DistributionPointName>,
    pub only_contains_user_certs: bool,
    pub only_contains_ca_certs: bool,
    pub only_some_reasons: Option<BitString>,
    pub indirect_crl: bool,
    pub only_contains_attribute_certs: bool,
}

type OnlyUserCertsTag = ContextTagged<PrimitiveBuilder<bool>, 1, false>;
type OnlyCaCertsTag = ContextTagged<PrimitiveBuilder<bool>, 2, false>;
type OnlySomeReasonsTag = ContextTagged<PrimitiveBuilder<BitString>, 3, false>;
type IndirectCrlTag = ContextTagged<PrimitiveBuilder<bool>, 4, false>;
type OnlyAttributeCertsTag = ContextTagged<PrimitiveBuilder<bool>, 5, false>;

pub struct IssuingDistributionPointBuilder;

impl Builder for IssuingDistributionPointBuilder {
    type Output = IssuingDistributionPoint;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<IssuingDistributionPoint, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected IssuingDistributionPoint SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let distribution_point = build_optional::<DistributionPointNameTag>(&nodes, &mut idx, depth + 1)?;
        let only_contains_user_certs = build_optional::<OnlyUserCertsTag>(&nodes, &mut idx, depth + 1)?.unwrap_or(false);
        let only_contains_ca_certs = build_optional::<OnlyCaCertsTag>(&nodes, &mut idx, depth + 1)?.unwrap_or(false);
        let only_some_reasons = build_optional::<OnlySomeReasonsTag>(&nodes, &mut idx, depth + 1)?;
        let indirect_crl = build_optional::<IndirectCrlTag>(&nodes, &mut idx, depth + 1)?.unwrap_or(false);
        let only_contains_attribute_certs =
            build_optional::<OnlyAttributeCertsTag>(&nodes, &mut idx, depth + 1)?.unwrap_or(false);
        expect_exhausted(&nodes, idx, "IssuingDistributionPoint: unexpected trailing field")?;
        Ok(IssuingDistributionPoint {
            distribution_point,
            only_contains_user_certs,
            only_contains_ca_certs,
            only_some_reasons,
            indirect_crl,
            only_contains_attribute_certs,
        })
    }
}

impl Encode for IssuingDistributionPoint {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(name) = &self.distribution_point {
            fields.push(encode_explicit(0, &name.encode()?));
        }
        if self.only_contains_user_certs {
            fields.push(encode_implicit(1, &self.only_contains_user_certs.encode()?)?);
        }
        if self.only_contains_ca_certs {
            fields.push(encode_implicit(2, &self.only_contains_ca_certs.encode()?)?);
        }
        if let Some(reasons) = &self.only_some_reasons {
            fields.push(encode_implicit(3, &reasons.encode()?)?);
        }
        if self.indirect_crl {
            fields.push(encode_implicit(4, &self.indirect_crl.encode()?)?);
        }
        if self.only_contains_attribute_certs {
            fields.push(encode_implicit(5, &self.only_contains_attribute_certs.encode()?)?);
        }
        Ok(encode_sequence(&fields))
    }
}

/// `RevokedCertificate ::= SEQUENCE { userCertificate CertificateSerialNumber, revocationDate Time, crlEntryExtensions Extensions OPTIONAL }`.
#[derive(Debug, Clone, PartialEq)]
pub struct RevokedCertificate {
    pub user_certificate: num_bigint::BigInt,
    pub revocation_date: Time,
    pub crl_entry_extensions: Option<Extensions>,
}

pub struct RevokedCertificateBuilder;

impl Builder for RevokedCertificateBuilder {
    type Output = RevokedCertificate;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<RevokedCertificate, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected RevokedCertificate SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let user_certificate = build_mandatory::<PrimitiveBuilder<Integer>>(
            &nodes,
            &mut idx,
            depth + 1,
            "RevokedCertificate.userCertificate",
        )?;
        let revocation_date =
            build_mandatory::<Time>(&nodes, &mut idx, depth + 1, "RevokedCertificate.revocationDate")?;
        let crl_entry_extensions = build_optional::<ExtensionsBuilder>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "RevokedCertificate: unexpected trailing field")?;
        Ok(RevokedCertificate { user_certificate: user_certificate.0, revocation_date, crl_entry_extensions })
    }
}

impl DefaultIdentifier for RevokedCertificateBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for RevokedCertificate {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = alloc::vec![Integer(self.user_certificate.clone()).encode()?, self.revocation_date.encode()?];
        if let Some(extensions) = &self.crl_entry_extensions {
            fields.push(extensions.encode()?);
        }
        Ok(encode_sequence(&fields))
    }
}

/// `TBSCertList ::= SEQUENCE { version INTEGER OPTIONAL, signature AlgorithmIdentifier, issuer Name, thisUpdate Time, nextUpdate Time OPTIONAL, revokedCertificates SEQUENCE OF RevokedCertificate OPTIONAL, crlExtensions [0] EXPLICIT Extensions OPTIONAL }`.
#[derive(Debug, Clone, PartialEq)]
pub struct TbsCertList {
    pub version: Option<num_bigint::BigInt>,
    pub signature: AlgorithmIdentifier,
    pub issuer: Name,
    pub this_update: Time,
    pub next_update: Option<Time>,
    pub revoked_certificates: Vec<RevokedCertificate>,
    pub crl_extensions: Option<Extensions>,
}

type CrlExtensionsTag = ContextTagged<ExtensionsBuilder, 0, true>;

pub struct TbsCertListBuilder;

impl Builder for TbsCertListBuilder {
    type Output = TbsCertList;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<TbsCertList, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected TBSCertList SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let version = build_optional::<PrimitiveBuilder<Integer>>(&nodes, &mut idx, depth + 1)?.map(|v| v.0);
        let signature =
            build_mandatory::<AlgorithmIdentifierBuilder>(&nodes, &mut idx, depth + 1, "TBSCertList.signature")?;
        let issuer = build_mandatory::<NameBuilder>(&nodes, &mut idx, depth + 1, "TBSCertList.issuer")?;
        let this_update = build_mandatory::<Time>(&nodes, &mut idx, depth + 1, "TBSCertList.thisUpdate")?;
        let next_update = build_optional::<Time>(&nodes, &mut idx, depth + 1)?;
        let revoked_certificates =
            build_optional::<SequenceOf<RevokedCertificateBuilder>>(&nodes, &mut idx, depth + 1)?.unwrap_or_default();
        let crl_extensions = build_optional::<CrlExtensionsTag>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "TBSCertList: unexpected trailing field")?;
        Ok(TbsCertList { version, signature, issuer, this_update, next_update, revoked_certificates, crl_extensions })
    }
}

impl DefaultIdentifier for TbsCertListBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for TbsCertList {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(version) = &self.version {
            fields.push(Integer(version.clone()).encode()?);
        }
        fields.push(self.signature.encode()?);
        fields.push(self.issuer.encode()?);
        fields.push(self.this_update.encode()?);
        if let Some(next_update) = &self.next_update {
            fields.push(next_update.encode()?);
        }
        if !self.revoked_certificates.is_empty() {
            let items: Vec<Vec<u8>> =
                self.revoked_certificates.iter().map(Encode::encode).collect::<Result<_, _>>()?;
            fields.push(encode_sequence(&items));
        }
        if let Some(extensions) = &self.crl_extensions {
            fields.push(encode_explicit(0, &extensions.encode()?));
        }
        Ok(encode_sequence(&fields))
    }
}

/// `CertificateList ::= SEQUENCE { tbsCertList TBSCertList, signatureAlgorithm AlgorithmIdentifier, signatureValue BIT STRING }`.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateList {
    pub tbs_cert_list: TbsCertList,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature_value: BitString,
}

pub struct CertificateListBuilder;

impl Builder for CertificateListBuilder {
    type Output = CertificateList;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<CertificateList, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected CertificateList SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let tbs_cert_list =
            build_mandatory::<TbsCertListBuilder>(&nodes, &mut idx, depth + 1, "CertificateList.tbsCertList")?;
        let signature_algorithm = build_mandatory::<AlgorithmIdentifierBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "CertificateList.signatureAlgorithm",
        )?;
        let signature_value = build_mandatory::<PrimitiveBuilder<BitString>>(
            &nodes,
            &mut idx,
            depth + 1,
            "CertificateList.signatureValue",
        )?;
        expect_exhausted(&nodes, idx, "CertificateList: unexpected trailing field")?;
        Ok(CertificateList { tbs_cert_list, signature_algorithm, signature_value })
    }
}

impl Encode for CertificateList {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[
            self.tbs_cert_list.encode()?,
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
    fn distribution_point_round_trips_full_name_variant() {
        let value = DistributionPoint {
            distribution_point: Some(DistributionPointName::FullName(alloc::vec![GeneralName::DnsName(
                crate::codec::Ia5String(b"crl.example.com".to_vec()),
            )])),
            reasons: None,
            crl_issuer: None,
        };
        let der = value.encode().unwrap();
        assert_eq!(parse::<DistributionPointBuilder>(&der).unwrap(), value);
    }

    #[test]
    fn issuing_distribution_point_suppresses_default_booleans() {
        let value = IssuingDistributionPoint::default();
        let der = value.encode().unwrap();
        assert_eq!(der, alloc::vec![0x30, 0x00]);
        assert_eq!(parse::<IssuingDistributionPointBuilder>(&der).unwrap(), value);
    }
}
