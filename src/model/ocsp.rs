//! OCSP, RFC 6960: `OCSPResponse` and its `BasicOCSPResponse` payload.

use alloc::vec::Vec;

use crate::builder::context_tagged::ContextTagged;
use crate::builder::optional::{build_mandatory, build_optional, expect_exhausted};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::value::{Enumerated, OctetString};
use crate::builder::{child_nodes, parse_nested, Builder, DefaultIdentifier};
use crate::choice_builder;
use crate::codec::{BitString, GeneralizedTime, ObjectIdentifier};
use crate::encode::{encode_explicit, encode_sequence, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::oids;
use crate::tag::Tag;

use super::algorithm_identifier::{AlgorithmIdentifier, AlgorithmIdentifierBuilder};
use super::extension::{Extensions, ExtensionsBuilder};
use super::name::NameBuilder;
use super::raw::RawData;

/// `ResponseBytes ::= SEQUENCE { responseType OBJECT IDENTIFIER, response OCTET STRING }`.
///
/// `response` is reparsed as a `BasicOCSPResponse` when `responseType` is
/// `id-pkix-ocsp-basic`; any other response type is kept as raw octets,
/// mirroring `model::extension::ExtensionValue`'s secondary-dispatch
/// fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseBytes {
    pub response_type: ObjectIdentifier,
    pub response: ResponseBytesPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBytesPayload {
    Basic(BasicOcspResponse),
    Other(Vec<u8>),
}

pub struct ResponseBytesBuilder;

impl Builder for ResponseBytesBuilder {
    type Output = ResponseBytes;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<ResponseBytes, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected ResponseBytes SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let response_type = build_mandatory::<PrimitiveBuilder<ObjectIdentifier>>(
            &nodes,
            &mut idx,
            depth + 1,
            "ResponseBytes.responseType",
        )?;
        let response_bytes =
            build_mandatory::<PrimitiveBuilder<OctetString>>(&nodes, &mut idx, depth + 1, "ResponseBytes.response")?;
        expect_exhausted(&nodes, idx, "ResponseBytes: unexpected trailing field")?;
        let response = if oids::arcs_of(&response_type) == oids::ID_PKIX_OCSP_BASIC {
            ResponseBytesPayload::Basic(parse_nested::<BasicOcspResponseBuilder>(&response_bytes.0, depth + 1)?)
        } else {
            ResponseBytesPayload::Other(response_bytes.0)
        };
        Ok(ResponseBytes { response_type, response })
    }
}

impl DefaultIdentifier for ResponseBytesBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for ResponseBytes {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let payload = match &self.response {
            ResponseBytesPayload::Basic(v) => v.encode()?,
            ResponseBytesPayload::Other(bytes) => bytes.clone(),
        };
        Ok(encode_sequence(&[self.response_type.encode()?, OctetString(payload).encode()?]))
    }
}

type ResponseBytesTag = ContextTagged<ResponseBytesBuilder, 0, true>;

/// `OCSPResponse ::= SEQUENCE { responseStatus OCSPResponseStatus, responseBytes [0] EXPLICIT ResponseBytes OPTIONAL }`.
#[derive(Debug, Clone, PartialEq)]
pub struct OcspResponse {
    pub response_status: num_bigint::BigInt,
    pub response_bytes: Option<ResponseBytes>,
}

pub struct OcspResponseBuilder;

impl Builder for OcspResponseBuilder {
    type Output = OcspResponse;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<OcspResponse, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected OCSPResponse SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let response_status = build_mandatory::<PrimitiveBuilder<Enumerated>>(
            &nodes,
            &mut idx,
            depth + 1,
            "OCSPResponse.responseStatus",
        )?
        .0;
        let response_bytes = build_optional::<ResponseBytesTag>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "OCSPResponse: unexpected trailing field")?;
        Ok(OcspResponse { response_status, response_bytes })
    }
}

impl Encode for OcspResponse {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = alloc::vec![Enumerated(self.response_status.clone()).encode()?];
        if let Some(response_bytes) = &self.response_bytes {
            fields.push(encode_explicit(0, &response_bytes.encode()?));
        }
        Ok(encode_sequence(&fields))
    }
}

/// `ResponderID ::= CHOICE { byName [1] Name, byKey [2] KeyHash }`.
type ByNameTag = ContextTagged<NameBuilder, 1, false>;
type ByKeyTag = ContextTagged<PrimitiveBuilder<OctetString>, 2, false>;

choice_builder! {
    pub enum ResponderId {
        ByName(ByNameTag),
        ByKey(ByKeyTag),
    }
}

impl Encode for ResponderId {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            ResponderId::ByName(name) => crate::encode::encode_implicit(1, &name.encode()?),
            ResponderId::ByKey(key) => {
                let content = key.encode_content()?;
                Ok(crate::encode::encode_tlv(crate::tag::Class::ContextSpecific, false, 2, &content))
            }
        }
    }
}

/// `CertID ::= SEQUENCE { hashAlgorithm AlgorithmIdentifier, issuerNameHash OCTET STRING, issuerKeyHash OCTET STRING, serialNumber CertificateSerialNumber }`.
#[derive(Debug, Clone, PartialEq)]
pub struct CertId {
    pub hash_algorithm: AlgorithmIdentifier,
    pub issuer_name_hash: Vec<u8>,
    pub issuer_key_hash: Vec<u8>,
    pub serial_number: num_bigint::BigInt,
}

pub struct CertIdBuilder;

impl Builder for CertIdBuilder {
    type Output = CertId;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<CertId, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected CertID SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let hash_algorithm =
            build_mandatory::<AlgorithmIdentifierBuilder>(&nodes, &mut idx, depth + 1, "CertID.hashAlgorithm")?;
        let issuer_name_hash = build_mandatory::<PrimitiveBuilder<OctetString>>(
            &nodes,
            &mut idx,
            depth + 1,
            "CertID.issuerNameHash",
        )?
        .0;
        let issuer_key_hash =
            build_mandatory::<PrimitiveBuilder<OctetString>>(&nodes, &mut idx, depth + 1, "CertID.issuerKeyHash")?.0;
        let serial_number = build_mandatory::<PrimitiveBuilder<crate::builder::value::Integer>>(
            &nodes,
            &mut idx,
            depth + 1,
            "CertID.serialNumber",
        )?
        .0;
        expect_exhausted(&nodes, idx, "CertID: unexpected trailing field")?;
        Ok(CertId { hash_algorithm, issuer_name_hash, issuer_key_hash, serial_number })
    }
}

impl DefaultIdentifier for CertIdBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for CertId {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[
            self.hash_algorithm.encode()?,
            OctetString(self.issuer_name_hash.clone()).encode()?,
            OctetString(self.issuer_key_hash.clone()).encode()?,
            crate::builder::value::Integer(self.serial_number.clone()).encode()?,
        ]))
    }
}

/// `RevokedInfo ::= SEQUENCE { revocationTime GeneralizedTime, revocationReason [0] EXPLICIT CRLReason OPTIONAL }`.
#[derive(Debug, Clone, PartialEq)]
pub struct RevokedInfo {
    pub revocation_time: GeneralizedTime,
    pub revocation_reason: Option<num_bigint::BigInt>,
}

type RevocationReasonTag = ContextTagged<PrimitiveBuilder<Enumerated>, 0, true>;

pub struct RevokedInfoBuilder;

impl Builder for RevokedInfoBuilder {
    type Output = RevokedInfo;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<RevokedInfo, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected RevokedInfo SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let revocation_time = build_mandatory::<PrimitiveBuilder<GeneralizedTime>>(
            &nodes,
            &mut idx,
            depth + 1,
            "RevokedInfo.revocationTime",
        )?;
        let revocation_reason =
            build_optional::<RevocationReasonTag>(&nodes, &mut idx, depth + 1)?.map(|v| v.0);
        expect_exhausted(&nodes, idx, "RevokedInfo: unexpected trailing field")?;
        Ok(RevokedInfo { revocation_time, revocation_reason })
    }
}

impl DefaultIdentifier for RevokedInfoBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for RevokedInfo {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = alloc::vec![self.revocation_time.encode()?];
        if let Some(reason) = &self.revocation_reason {
            fields.push(encode_explicit(0, &Enumerated(reason.clone()).encode()?));
        }
        Ok(encode_sequence(&fields))
    }
}

type GoodTag = ContextTagged<PrimitiveBuilder<crate::builder::value::Null>, 0, false>;
type RevokedTag = ContextTagged<RevokedInfoBuilder, 1, false>;
type UnknownTag = ContextTagged<PrimitiveBuilder<crate::builder::value::Null>, 2, false>;

choice_builder! {
    /// `CertStatus ::= CHOICE { good [0] IMPLICIT NULL, revoked [1] IMPLICIT RevokedInfo, unknown [2] IMPLICIT UnknownInfo }`.
    pub enum CertStatus {
        Good(GoodTag),
        Revoked(RevokedTag),
        Unknown(UnknownTag),
    }
}

impl Encode for CertStatus {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            CertStatus::Good(_) => crate::encode::encode_implicit(0, &crate::builder::value::Null.encode()?),
            CertStatus::Revoked(info) => crate::encode::encode_implicit(1, &info.encode()?),
            CertStatus::Unknown(_) => crate::encode::encode_implicit(2, &crate::builder::value::Null.encode()?),
        }
    }
}

type SingleNextUpdateTag = ContextTagged<PrimitiveBuilder<GeneralizedTime>, 0, true>;
type SingleExtensionsTag = ContextTagged<ExtensionsBuilder, 1, true>;

/// `SingleResponse ::= SEQUENCE { certID CertID, certStatus CertStatus, thisUpdate GeneralizedTime, nextUpdate [0] EXPLICIT GeneralizedTime OPTIONAL, singleExtensions [1] EXPLICIT Extensions OPTIONAL }`.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleResponse {
    pub cert_id: CertId,
    pub cert_status: CertStatus,
    pub this_update: GeneralizedTime,
    pub next_update: Option<GeneralizedTime>,
    pub single_extensions: Option<Extensions>,
}

pub struct SingleResponseBuilder;

impl Builder for SingleResponseBuilder {
    type Output = SingleResponse;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<SingleResponse, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected SingleResponse SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let cert_id = build_mandatory::<CertIdBuilder>(&nodes, &mut idx, depth + 1, "SingleResponse.certID")?;
        let cert_status =
            build_mandatory::<CertStatus>(&nodes, &mut idx, depth + 1, "SingleResponse.certStatus")?;
        let this_update = build_mandatory::<PrimitiveBuilder<GeneralizedTime>>(
            &nodes,
            &mut idx,
            depth + 1,
            "SingleResponse.thisUpdate",
        )?;
        let next_update = build_optional::<SingleNextUpdateTag>(&nodes, &mut idx, depth + 1)?;
        let single_extensions = build_optional::<SingleExtensionsTag>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "SingleResponse: unexpected trailing field")?;
        Ok(SingleResponse { cert_id, cert_status, this_update, next_update, single_extensions })
    }
}

impl DefaultIdentifier for SingleResponseBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for SingleResponse {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = alloc::vec![self.cert_id.encode()?, self.cert_status.encode()?, self.this_update.encode()?];
        if let Some(next_update) = &self.next_update {
            fields.push(encode_explicit(0, &next_update.encode()?));
        }
        if let Some(extensions) = &self.single_extensions {
            let items: Vec<Vec<u8>> = extensions.iter().map(Encode::encode).collect::<Result<_, _>>()?;
            fields.push(encode_explicit(1, &encode_sequence(&items)));
        }
        Ok(encode_sequence(&fields))
    }
}

type ResponseExtensionsTag = ContextTagged<ExtensionsBuilder, 1, true>;

/// `ResponseData ::= SEQUENCE { version [0] EXPLICIT Version DEFAULT v1, responderID ResponderID, producedAt GeneralizedTime, responses SEQUENCE OF SingleResponse, responseExtensions [1] EXPLICIT Extensions OPTIONAL }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseData {
    pub version: num_bigint::BigInt,
    pub responder_id: ResponderId,
    pub produced_at: GeneralizedTime,
    pub responses: Vec<SingleResponse>,
    pub response_extensions: Option<Extensions>,
}

type VersionTag = ContextTagged<PrimitiveBuilder<crate::builder::value::Integer>, 0, true>;

pub struct ResponseDataBuilder;

impl Builder for ResponseDataBuilder {
    type Output = ResponseData;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<ResponseData, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected ResponseData SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let version = build_optional::<VersionTag>(&nodes, &mut idx, depth + 1)?.map(|v| v.0).unwrap_or_else(|| 0.into());
        let responder_id =
            build_mandatory::<ResponderId>(&nodes, &mut idx, depth + 1, "ResponseData.responderID")?;
        let produced_at = build_mandatory::<PrimitiveBuilder<GeneralizedTime>>(
            &nodes,
            &mut idx,
            depth + 1,
            "ResponseData.producedAt",
        )?;
        let responses = build_mandatory::<crate::builder::collection::SequenceOf<SingleResponseBuilder>>(
            &nodes,
            &mut idx,
            depth + 1,
            "ResponseData.responses",
        )?;
        let response_extensions = build_optional::<ResponseExtensionsTag>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "ResponseData: unexpected trailing field")?;
        Ok(ResponseData { version, responder_id, produced_at, responses, response_extensions })
    }
}

impl Encode for ResponseData {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(version) = crate::builder::optional::suppress_default(self.version.clone(), &0.into()) {
            fields.push(encode_explicit(0, &crate::builder::value::Integer(version).encode()?));
        }
        fields.push(self.responder_id.encode()?);
        fields.push(self.produced_at.encode()?);
        let responses: Vec<Vec<u8>> = self.responses.iter().map(Encode::encode).collect::<Result<_, _>>()?;
        fields.push(encode_sequence(&responses));
        if let Some(extensions) = &self.response_extensions {
            let items: Vec<Vec<u8>> = extensions.iter().map(Encode::encode).collect::<Result<_, _>>()?;
            fields.push(encode_explicit(1, &encode_sequence(&items)));
        }
        Ok(encode_sequence(&fields))
    }
}

/// `BasicOCSPResponse ::= SEQUENCE { tbsResponseData ResponseData, signatureAlgorithm AlgorithmIdentifier, signature BIT STRING, certs [0] EXPLICIT SEQUENCE OF Certificate OPTIONAL }`.
///
/// `certs` is left as [`RawData`] of each embedded `Certificate` TLV rather
/// than reusing `model::certificate::X509Certificate`, since OCSP responder
/// certs are rarely consulted and keeping this module decoupled from
/// `certificate.rs` avoids a dependency cycle risk as both grow.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicOcspResponse {
    pub tbs_response_data: ResponseData,
    pub signature_algorithm: AlgorithmIdentifier,
    pub signature: BitString,
    pub certs: Option<Vec<RawData>>,
}

type CertsTag = ContextTagged<crate::builder::collection::SequenceOf<RawData>, 0, true>;

pub struct BasicOcspResponseBuilder;

impl Builder for BasicOcspResponseBuilder {
    type Output = BasicOcspResponse;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<BasicOcspResponse, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected BasicOCSPResponse SEQUENCE"));
        }
        let nodes = child_nodes(content)?;
        let mut idx = 0;
        let tbs_response_data = build_mandatory::<ResponseDataBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "BasicOCSPResponse.tbsResponseData",
        )?;
        let signature_algorithm = build_mandatory::<AlgorithmIdentifierBuilder>(
            &nodes,
            &mut idx,
            depth + 1,
            "BasicOCSPResponse.signatureAlgorithm",
        )?;
        let signature = build_mandatory::<PrimitiveBuilder<BitString>>(
            &nodes,
            &mut idx,
            depth + 1,
            "BasicOCSPResponse.signature",
        )?;
        let certs = build_optional::<CertsTag>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "BasicOCSPResponse: unexpected trailing field")?;
        Ok(BasicOcspResponse { tbs_response_data, signature_algorithm, signature, certs })
    }
}

impl DefaultIdentifier for BasicOcspResponseBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for BasicOcspResponse {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = alloc::vec![
            self.tbs_response_data.encode()?,
            self.signature_algorithm.encode()?,
            self.signature.encode()?,
        ];
        if let Some(certs) = &self.certs {
            let items: Vec<Vec<u8>> = certs.iter().map(Encode::encode).collect::<Result<_, _>>()?;
            fields.push(encode_explicit(0, &encode_sequence(&items)));
        }
        Ok(encode_sequence(&fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;

    #[test]
    fn ocsp_response_without_bytes_round_trips() {
        let value = OcspResponse { response_status: 3.into(), response_bytes: None };
        let der = value.encode().unwrap();
        assert_eq!(parse::<OcspResponseBuilder>(&der).unwrap(), value);
    }

    #[test]
    fn cert_status_good_round_trips() {
        let value = CertStatus::Good(crate::builder::value::Null);
        let der = value.encode().unwrap();
        assert_eq!(der, alloc::vec![0x80, 0x00]);
        assert_eq!(parse::<CertStatus>(&der).unwrap(), value);
    }

    #[test]
    fn responder_id_by_key_round_trips() {
        let value = ResponderId::ByKey(OctetString(alloc::vec![1, 2, 3, 4]));
        let der = value.encode().unwrap();
        assert_eq!(parse::<ResponderId>(&der).unwrap(), value);
    }

    #[test]
    fn cert_status_revoked_round_trips_through_implicit_tag() {
        let value = CertStatus::Revoked(RevokedInfo {
            revocation_time: GeneralizedTime("20240101000000Z".into()),
            revocation_reason: None,
        });
        let der = value.encode().unwrap();
        // [1] IMPLICIT RevokedInfo: context tag 1, constructed (RevokedInfo is a
        // SEQUENCE), no nested SEQUENCE tag inside.
        assert_eq!(der[0], 0xa1);
        assert_eq!(parse::<CertStatus>(&der).unwrap(), value);
    }
}
