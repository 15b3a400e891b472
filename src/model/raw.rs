//! `RawData`: the opaque fallback carried by every CHOICE and ANY-typed
//! field whose declared alternatives don't cover what's on the wire. Holds
//! the node's own identifier plus its undecoded content, so it can still
//! be re-encoded byte-for-byte.

use alloc::vec::Vec;

use crate::builder::Builder;
use crate::encode::{encode_tlv, Encode};
use crate::error::{DecodeError, EncodeError};
use crate::identifier::Identifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawData {
    pub identifier: Identifier,
    pub content: Vec<u8>,
}

impl Builder for RawData {
    type Output = Self;

    /// Matches any TLV node — the universal fallback. Must always be
    /// ordered last in a CHOICE's declared variant list.
    fn matches(_identifier: Identifier) -> bool {
        true
    }

    fn build(identifier: Identifier, content: &[u8], _depth: usize) -> Result<Self, DecodeError> {
        Ok(RawData { identifier, content: content.to_vec() })
    }
}

impl Encode for RawData {
    fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(encode_tlv(
            self.identifier.tag.class,
            self.identifier.constructed,
            self.identifier.tag.value,
            &self.content,
        ))
    }
}
