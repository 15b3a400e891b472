//! Certificate policy extensions, RFC 5280 §4.2.1.4 / §4.2.1.11/.12:
//! `PolicyInformation`, `PolicyQualifierInfo`, `UserNotice`,
//! `NoticeReference`, `PolicyConstraints`.

use alloc::vec::Vec;

use crate::builder::collection::SequenceOf;
use crate::builder::context_tagged::ContextTagged;
use crate::builder::optional::{build_mandatory, build_optional, expect_exhausted};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::value::Integer;
use crate::builder::{Builder, DefaultIdentifier};
use crate::choice_builder;
use crate::codec::{ObjectIdentifier, Utf8String};
use crate::encode::{encode_sequence, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::tag::Tag;

use super::raw::RawData;

/// `NoticeReference ::= SEQUENCE { organization DisplayText, noticeNumbers SEQUENCE OF INTEGER }`.
///
/// `DisplayText` is modeled here as a plain `UTF8String`: the four-variant
/// `DisplayText` CHOICE (IA5String/VisibleString/BMPString/UTF8String) adds
/// little over `model::name::DirectoryString` for the one caller that needs
/// it, so this crate narrows to the modern (UTF8String-only) case and keeps
/// the rest as `RawData` via [`PolicyQualifierInfo::Other`].
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeReference {
    pub organization: Utf8String,
    pub notice_numbers: Vec<num_bigint::BigInt>,
}

pub struct NoticeReferenceBuilder;

impl Builder for NoticeReferenceBuilder {
    type Output = NoticeReference;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<NoticeReference, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected NoticeReference SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let organization = build_mandatory::<PrimitiveBuilder<Utf8String>>(
            &nodes,
            &mut idx,
            depth + 1,
            "NoticeReference.organization",
        )?;
        let notice_numbers = build_mandatory::<SequenceOf<PrimitiveBuilder<Integer>>>(
            &nodes,
            &mut idx,
            depth + 1,
            "NoticeReference.noticeNumbers",
        )?;
        expect_exhausted(&nodes, idx, "NoticeReference: unexpected trailing field")?;
        Ok(NoticeReference {
            organization: organization.0,
            notice_numbers: notice_numbers.into_iter().map(|i| i.0).collect(),
        })
    }
}

impl DefaultIdentifier for NoticeReferenceBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for NoticeReference {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let numbers: Vec<Vec<u8>> =
            self.notice_numbers.iter().map(|n| Integer(n.clone()).encode()).collect::<Result<_, _>>()?;
        Ok(encode_sequence(&[Utf8String(self.organization.0.clone()).encode()?, encode_sequence(&numbers)]))
    }
}

/// `UserNotice ::= SEQUENCE { noticeRef NoticeReference OPTIONAL, explicitText DisplayText OPTIONAL }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserNotice {
    pub notice_ref: Option<NoticeReference>,
    pub explicit_text: Option<Utf8String>,
}

pub struct UserNoticeBuilder;

impl Builder for UserNoticeBuilder {
    type Output = UserNotice;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<UserNotice, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected UserNotice SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let notice_ref = build_optional::<NoticeReferenceBuilder>(&nodes, &mut idx, depth + 1)?;
        let explicit_text = build_optional::<PrimitiveBuilder<Utf8String>>(&nodes, &mut idx, depth + 1)?.map(|v: Utf8String| v.0);
        expect_exhausted(&nodes, idx, "UserNotice: unexpected trailing field")?;
        Ok(UserNotice { notice_ref, explicit_text })
    }
}

impl DefaultIdentifier for UserNoticeBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for UserNotice {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(notice_ref) = &self.notice_ref {
            fields.push(notice_ref.encode()?);
        }
        if let Some(text) = &self.explicit_text {
            fields.push(Utf8String(text.0.clone()).encode()?);
        }
        Ok(encode_sequence(&fields))
    }
}

choice_builder! {
    pub enum PolicyQualifier {
        CpsUri(PrimitiveBuilder<crate::codec::Ia5String>),
        UserNotice(UserNoticeBuilder),
        Other(RawData),
    }
}

impl Encode for PolicyQualifier {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            PolicyQualifier::CpsUri(v) => v.encode(),
            PolicyQualifier::UserNotice(v) => v.encode(),
            PolicyQualifier::Other(v) => v.encode(),
        }
    }
}

/// `PolicyQualifierInfo ::= SEQUENCE { policyQualifierId OBJECT IDENTIFIER, qualifier ANY DEFINED BY policyQualifierId }`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyQualifierInfo {
    pub policy_qualifier_id: ObjectIdentifier,
    pub qualifier: PolicyQualifier,
}

pub struct PolicyQualifierInfoBuilder;

impl Builder for PolicyQualifierInfoBuilder {
    type Output = PolicyQualifierInfo;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<PolicyQualifierInfo, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected PolicyQualifierInfo SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let policy_qualifier_id = build_mandatory::<PrimitiveBuilder<ObjectIdentifier>>(
            &nodes,
            &mut idx,
            depth + 1,
            "PolicyQualifierInfo.policyQualifierId",
        )?;
        let qualifier =
            build_mandatory::<PolicyQualifier>(&nodes, &mut idx, depth + 1, "PolicyQualifierInfo.qualifier")?;
        expect_exhausted(&nodes, idx, "PolicyQualifierInfo: unexpected trailing field")?;
        Ok(PolicyQualifierInfo { policy_qualifier_id, qualifier })
    }
}

impl DefaultIdentifier for PolicyQualifierInfoBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for PolicyQualifierInfo {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[self.policy_qualifier_id.encode()?, self.qualifier.encode()?]))
    }
}

/// `PolicyInformation ::= SEQUENCE { policyIdentifier OBJECT IDENTIFIER, policyQualifiers SEQUENCE OF PolicyQualifierInfo OPTIONAL }`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyInformation {
    pub policy_identifier: ObjectIdentifier,
    pub policy_qualifiers: Vec<PolicyQualifierInfo>,
}

pub struct PolicyInformationBuilder;

impl Builder for PolicyInformationBuilder {
    type Output = PolicyInformation;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<PolicyInformation, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected PolicyInformation SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let policy_identifier = build_mandatory::<PrimitiveBuilder<ObjectIdentifier>>(
            &nodes,
            &mut idx,
            depth + 1,
            "PolicyInformation.policyIdentifier",
        )?;
        let policy_qualifiers =
            build_optional::<SequenceOf<PolicyQualifierInfoBuilder>>(&nodes, &mut idx, depth + 1)?.unwrap_or_default();
        expect_exhausted(&nodes, idx, "PolicyInformation: unexpected trailing field")?;
        Ok(PolicyInformation { policy_identifier, policy_qualifiers })
    }
}

impl DefaultIdentifier for PolicyInformationBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for PolicyInformation {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = alloc::vec![self.policy_identifier.encode()?];
        if !self.policy_qualifiers.is_empty() {
            let qualifiers: Vec<Vec<u8>> =
                self.policy_qualifiers.iter().map(Encode::encode).collect::<Result<_, _>>()?;
            fields.push(encode_sequence(&qualifiers));
        }
        Ok(encode_sequence(&fields))
    }
}

type RequireExplicitPolicyTag = ContextTagged<PrimitiveBuilder<Integer>, 0, false>;
type InhibitPolicyMappingTag = ContextTagged<PrimitiveBuilder<Integer>, 1, false>;

/// `PolicyConstraints ::= SEQUENCE { requireExplicitPolicy [0] SkipCerts OPTIONAL, inhibitPolicyMapping [1] SkipCerts OPTIONAL }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicyConstraints {
    pub require_explicit_policy: Option<num_bigint::BigInt>,
    pub inhibit_policy_mapping: Option<num_bigint::BigInt>,
}

pub struct PolicyConstraintsBuilder;

impl Builder for PolicyConstraintsBuilder {
    type Output = PolicyConstraints;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<PolicyConstraints, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected PolicyConstraints SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let require_explicit_policy =
            build_optional::<RequireExplicitPolicyTag>(&nodes, &mut idx, depth + 1)?.map(|v| v.0);
        let inhibit_policy_mapping =
            build_optional::<InhibitPolicyMappingTag>(&nodes, &mut idx, depth + 1)?.map(|v| v.0);
        expect_exhausted(&nodes, idx, "PolicyConstraints: unexpected trailing field")?;
        Ok(PolicyConstraints { require_explicit_policy, inhibit_policy_mapping })
    }
}

impl DefaultIdentifier for PolicyConstraintsBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for PolicyConstraints {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = Vec::new();
        if let Some(value) = &self.require_explicit_policy {
            fields.push(crate::encode::encode_implicit(0, &Integer(value.clone()).encode()?)?);
        }
        if let Some(value) = &self.inhibit_policy_mapping {
            fields.push(crate::encode::encode_implicit(1, &Integer(value.clone()).encode()?)?);
        }
        Ok(encode_sequence(&fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;

    #[test]
    fn policy_constraints_round_trips_with_both_fields() {
        let value = PolicyConstraints {
            require_explicit_policy: Some(num_bigint::BigInt::from(0)),
            inhibit_policy_mapping: Some(num_bigint::BigInt::from(3)),
        };
        let der = value.encode().unwrap();
        assert_eq!(parse::<PolicyConstraintsBuilder>(&der).unwrap(), value);
    }

    #[test]
    fn policy_information_without_qualifiers_round_trips() {
        let value = PolicyInformation {
            policy_identifier: crate::oids::certificate_policies_oid(),
            policy_qualifiers: Vec::new(),
        };
        let der = value.encode().unwrap();
        assert_eq!(parse::<PolicyInformationBuilder>(&der).unwrap(), value);
    }
}
