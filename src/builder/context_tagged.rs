//! `ContextTaggedBuilder<T, n, explicit?>` — wraps another builder under a
//! context-specific tag, either EXPLICIT (the original tag survives inside
//! a fresh constructed wrapper) or IMPLICIT (the tag is rewritten in
//! place, content untouched).

use core::marker::PhantomData;

use super::{build_at, Builder, DefaultIdentifier};
use crate::codec;
use crate::error::DecodeError;
use crate::identifier::Identifier;
use crate::tag::Tag;

/// `B` wrapped under context tag `TAG`. `EXPLICIT = true` for `[n] EXPLICIT
/// B`, `false` for `[n] IMPLICIT B`.
pub struct ContextTagged<B, const TAG: u32, const EXPLICIT: bool>(PhantomData<B>);

impl<B: DefaultIdentifier, const TAG: u32, const EXPLICIT: bool> Builder for ContextTagged<B, TAG, EXPLICIT> {
    type Output = B::Output;

    fn matches(identifier: Identifier) -> bool {
        if identifier.tag != Tag::context(TAG) {
            return false;
        }
        if EXPLICIT {
            identifier.constructed
        } else {
            identifier.constructed == B::default_identifier().constructed
        }
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<B::Output, DecodeError> {
        if identifier.tag != Tag::context(TAG) {
            return Err(DecodeError::unsupported_format("context tag mismatch"));
        }

        if EXPLICIT {
            if !identifier.constructed {
                return Err(DecodeError::invalid_content("EXPLICIT context tag must be constructed"));
            }
            let (inner_identifier, inner_content, remainder) = codec::decode_header(content)?;
            if !remainder.is_empty() {
                return Err(DecodeError::invalid_content(
                    "EXPLICIT wrapper holds more than one inner TLV",
                ));
            }
            if !B::matches(inner_identifier) {
                return Err(DecodeError::unsupported_format("EXPLICIT inner value does not match"));
            }
            build_at::<B>(inner_identifier, inner_content, depth + 1)
        } else {
            let default = B::default_identifier();
            if identifier.constructed != default.constructed {
                return Err(DecodeError::invalid_content("IMPLICIT tag constructed-bit mismatch"));
            }
            build_at::<B>(default, content, depth)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::primitive::PrimitiveBuilder;
    use crate::builder::value::Integer;
    use crate::codec;
    use num_bigint::BigInt;

    type ExplicitVersion = ContextTagged<PrimitiveBuilder<Integer>, 0, true>;

    #[test]
    fn explicit_unwraps_inner_tlv() {
        let inner = codec::encode_header(crate::tag::Class::Universal, false, 2, 1);
        let mut content = inner;
        content.push(0x02); // INTEGER 2
        let outer = codec::encode_header(crate::tag::Class::ContextSpecific, true, 0, content.len());
        let full = [outer, content].concat();

        let (identifier, content, _) = codec::decode_header(&full).unwrap();
        let value = ExplicitVersion::build(identifier, content, 0).unwrap();
        assert_eq!(value.0, BigInt::from(2));
    }

    type ImplicitSerial = ContextTagged<PrimitiveBuilder<Integer>, 1, false>;

    #[test]
    fn implicit_reuses_inner_tag_rules_on_raw_content() {
        let content = codec::encode_bigint(&BigInt::from(7));
        let outer = codec::encode_header(crate::tag::Class::ContextSpecific, false, 1, content.len());
        let full = [outer, content].concat();

        let (identifier, content, _) = codec::decode_header(&full).unwrap();
        let value = ImplicitSerial::build(identifier, content, 0).unwrap();
        assert_eq!(value.0, BigInt::from(7));
    }
}
