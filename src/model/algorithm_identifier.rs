//! `AlgorithmIdentifier`, RFC 5280 §4.1.1.2: an algorithm OID plus an
//! algorithm-defined parameters value.
//!
//! The full per-algorithm parameter grammar (`RSASSA-PSS-params`,
//! `RSAES-OAEP-params`, `DomainParameters`, `ECParameters`, `Dss-Parms`,
//! …) is not modeled field-by-field here: parameters are exposed as
//! [`RawData`] for the caller to reparse against the sibling `algorithm`
//! OID, the same pattern [`crate::model::extension::Extension`] uses for
//! unrecognized extension values. `NULL` is the one shape common enough
//! (RSA, plain DSA/ECDSA signatures) to warrant its own variant.

use alloc::vec::Vec;

use crate::builder::optional::{build_mandatory, build_optional, expect_exhausted};
use crate::builder::primitive::PrimitiveBuilder;
use crate::builder::value::Null;
use crate::builder::{Builder, DefaultIdentifier};
use crate::choice_builder;
use crate::codec::ObjectIdentifier;
use crate::encode::{encode_sequence, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;
use crate::tag::Tag;

use super::raw::RawData;

choice_builder! {
    pub enum AlgorithmParameters {
        Null(PrimitiveBuilder<Null>),
        Other(RawData),
    }
}

impl Encode for AlgorithmParameters {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            AlgorithmParameters::Null(value) => value.encode(),
            AlgorithmParameters::Other(value) => value.encode(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifier,
    pub parameters: Option<AlgorithmParameters>,
}

pub struct AlgorithmIdentifierBuilder;

impl Builder for AlgorithmIdentifierBuilder {
    type Output = AlgorithmIdentifier;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<AlgorithmIdentifier, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected AlgorithmIdentifier SEQUENCE"));
        }
        let nodes = crate::builder::child_nodes(content)?;
        let mut idx = 0;
        let algorithm = build_mandatory::<PrimitiveBuilder<ObjectIdentifier>>(
            &nodes,
            &mut idx,
            depth + 1,
            "AlgorithmIdentifier.algorithm",
        )?;
        let parameters = build_optional::<AlgorithmParameters>(&nodes, &mut idx, depth + 1)?;
        expect_exhausted(&nodes, idx, "AlgorithmIdentifier: unexpected trailing field")?;
        Ok(AlgorithmIdentifier { algorithm, parameters })
    }
}

impl DefaultIdentifier for AlgorithmIdentifierBuilder {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

impl Encode for AlgorithmIdentifier {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut fields = alloc::vec![self.algorithm.encode()?];
        if let Some(parameters) = &self.parameters {
            fields.push(parameters.encode()?);
        }
        Ok(encode_sequence(&fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::parse;

    #[test]
    fn round_trips_rsa_encryption_with_null_parameters() {
        let value = AlgorithmIdentifier {
            algorithm: crate::oids::rsa_encryption_oid(),
            parameters: Some(AlgorithmParameters::Null(Null)),
        };
        let der = value.encode().unwrap();
        let decoded = parse::<AlgorithmIdentifierBuilder>(&der).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn parameters_may_be_absent() {
        let value = AlgorithmIdentifier { algorithm: crate::oids::id_ec_public_key_oid(), parameters: None };
        let der = value.encode().unwrap();
        let decoded = parse::<AlgorithmIdentifierBuilder>(&der).unwrap();
        assert_eq!(decoded, value);
    }
}
