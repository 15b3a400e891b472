//! `Time` and `Validity`, RFC 5280 §4.1.2.5.

use alloc::vec::Vec;

use crate::builder::optional::{build_mandatory, expect_exhausted};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::{Builder, DefaultIdentifier};
use crate::choice_builder;
use crate::codec::{GeneralizedTime, UtcTime};
use crate::encode::{encode_sequence, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::tag::Tag;

choice_builder! {
    /// A certificate validity bound: `UTCTime` through 2049, `GeneralizedTime`
    /// from 2050 onward per RFC 5280 §4.1.2.5, but this codec accepts
    /// whichever variant is actually on the wire.
    pub enum Time {
        Utc(PrimitiveBuilder<UtcTime>),
        Generalized(PrimitiveBuilder<GeneralizedTime>),
    }
}

impl Encode for Time {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Time::Utc(value) => value.encode(),
            Time::Generalized(value) => value.encode(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Validity {
    pub not_before: Time,
    pub not_after: Time,
}

pub struct ValidityBuilder;

impl Builder for ValidityBuilder {
    type Output = Validity;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<Validity, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected Validity SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let not_before = build_mandatory::<Time>(&nodes, &mut idx, depth + 1, "Validity.notBefore")?;
        let not_after = build_mandatory::<Time>(&nodes, &mut idx, depth + 1, "Validity.notAfter")?;
        expect_exhausted(&nodes, idx, "Validity: unexpected trailing field")?;
        Ok(Validity { not_before, not_after })
    }
}

impl DefaultIdentifier for ValidityBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for Validity {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_sequence(&[self.not_before.encode()?, self.not_after.encode()?]))
    }
}
