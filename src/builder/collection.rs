//! `SequenceOfBuilder<T>` / `SetOfBuilder<T>` — zero or more children of
//! the same shape. Both preserve parse order; the encoder is what sorts a
//! SET OF into canonical order, not the builder.

use alloc::vec::Vec;
use core::marker::PhantomData;

use super::{build_at, Builder, DefaultIdentifier};
use crate::error::DecodeError;
use crate::identifier::Identifier;
use crate::tag::Tag;

/// Consumes every node from `nodes[*idx]` onward that matches `B`, in
/// order, as a repeated field within a larger composite (e.g. the
/// `RevokedCertificate` entries inside a `TBSCertList`).
pub fn build_repeated<B: Builder>(
    nodes: &[(Identifier, &[u8])],
    idx: &mut usize,
    depth: usize,
) -> Result<Vec<B::Output>, DecodeError> {
    let mut out = Vec::new();
    while let Some(&(identifier, content)) = nodes.get(*idx) {
        if !B::matches(identifier) {
            break;
        }
        out.push(build_at::<B>(identifier, content, depth)?);
        *idx += 1;
    }
    Ok(out)
}

/// A standalone `SEQUENCE OF B`: a SEQUENCE whose every child matches `B`.
pub struct SequenceOf<B>(PhantomData<B>);

impl<B: Builder> Builder for SequenceOf<B> {
    type Output = Vec<B::Output>;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SEQUENCE
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<Vec<B::Output>, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected SEQUENCE OF"));
        }
        let nodes = super::child_nodes(content)?;
        let mut idx = 0;
        let items = build_repeated::<B>(&nodes, &mut idx, depth + 1)?;
        if idx != nodes.len() {
            return Err(DecodeError::invalid_content("SEQUENCE OF: element with unexpected tag"));
        }
        Ok(items)
    }
}

impl<B: Builder> DefaultIdentifier for SequenceOf<B> {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SEQUENCE, true)
    }
}

/// A standalone `SET OF B`: like [`SequenceOf`] but tagged SET. Parse order
/// is preserved; re-sorting into canonical order is the encoder's job.
pub struct SetOf<B>(PhantomData<B>);

impl<B: Builder> Builder for SetOf<B> {
    type Output = Vec<B::Output>;

    fn matches(identifier: Identifier) -> bool {
        identifier.constructed && identifier.tag == Tag::SET
    }

    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<Vec<B::Output>, DecodeError> {
        if !Self::matches(identifier) {
            return Err(DecodeError::unsupported_format("expected SET OF"));
        }
        let nodes = super::child_nodes(content)?;
        let mut idx = 0;
        let items = build_repeated::<B>(&nodes, &mut idx, depth + 1)?;
        if idx != nodes.len() {
            return Err(DecodeError::invalid_content("SET OF: element with unexpected tag"));
        }
        Ok(items)
    }
}

impl<B: Builder> DefaultIdentifier for SetOf<B> {
    fn default_identifier() -> Identifier {
        Identifier::new(Tag::SET, true)
    }
}
