//! `PrimitiveBuilder<T>` — the leaf builder kind. Expects exactly one
//! primitive TLV whose tag matches `T`'s default encoding and decodes its
//! content via the primitive codec.

use core::marker::PhantomData;

use super::value::PrimitiveValue;
use super::{Builder, DefaultIdentifier};
use crate::error::DecodeError;
use crate::identifier::Identifier;

/// Builds any [`PrimitiveValue`] from its single default-tagged TLV.
pub struct PrimitiveBuilder<T>(PhantomData<T>);

impl<T: PrimitiveValue> Builder for PrimitiveBuilder<T> {
    type Output = T;

    fn matches(identifier: Identifier) -> bool {
        !identifier.constructed && identifier.tag == T::TAG
    }

    fn build(identifier: Identifier, content: &[u8], _depth: usize) -> Result<T, DecodeError> {
        if identifier.constructed {
            return Err(DecodeError::unsupported_format("primitive value encoded as constructed"));
        }
        if identifier.tag != T::TAG {
            return Err(DecodeError::unsupported_format("tag mismatch for primitive value"));
        }
        T::decode_content(content)
    }
}

impl<T: PrimitiveValue> DefaultIdentifier for PrimitiveBuilder<T> {
    fn default_identifier() -> Identifier {
        Identifier::new(T::TAG, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::value::Integer;
    use crate::codec;
    use num_bigint::BigInt;

    #[test]
    fn decodes_matching_tag() {
        let content = codec::encode_bigint(&BigInt::from(42));
        let identifier = Identifier::new(crate::tag::Tag::INTEGER, false);
        let value = PrimitiveBuilder::<Integer>::build(identifier, &content, 0).unwrap();
        assert_eq!(value.0, BigInt::from(42));
    }

    #[test]
    fn rejects_tag_mismatch() {
        let identifier = Identifier::new(crate::tag::Tag::BOOL, false);
        assert!(PrimitiveBuilder::<Integer>::build(identifier, &[0x00], 0).is_err());
    }
}
