//! The builder framework: turns a tree of TLV nodes into typed values.
//!
//! Two layers live here. [`walk`] is the push-style event interface named
//! in the public contract — it delivers `OnPrimitive` / `OnConstructedOpen`
//! / `OnConstructedClose` events to a visitor in document order, and is
//! what the out-of-scope extension-parser callback surface is built on.
//! The [`Builder`] trait and its kinds (`primitive`, `collection`,
//! `choice`, `context_tagged`, `optional`) are a specialization of the
//! same TLV walk that builds a typed value directly: each composite
//! builder dispatches its own fields by matching on the identifier of the
//! node in front of it, rather than indirecting through a `CreateState`
//! table of virtual sub-builders. A SEQUENCE's fields arrive in declared
//! order, so every composite builder here walks its node list with a
//! single cursor via [`optional::build_mandatory`]/[`optional::
//! build_optional`]; none of this crate's modeled types are a SET with
//! distinct, differently-tagged fields that could arrive out of order
//! (the SET-shaped types here are all homogeneous SET OF, handled by
//! [`collection::SetOf`]), so there is no unordered-dispatch cursor.

pub mod choice;
pub mod collection;
pub mod context_tagged;
pub mod optional;
pub mod primitive;
pub mod value;

use alloc::vec::Vec;

use crate::codec;
use crate::error::DecodeError;
use crate::identifier::Identifier;

/// A recursion-depth bound for nested constructed values (and for the
/// secondary parse of OCTET-STRING-wrapped nested DER, e.g. extension
/// values or an OCSP `ResponseBytes`), defending against pathological
/// input. Exceeding it yields `IncompleteInput`.
pub const MAX_RECURSION_DEPTH: usize = 32;

/// One push-style parse event, delivered in document order.
#[derive(Debug, Clone, Copy)]
pub enum ParseEvent<'a> {
    OnPrimitive { identifier: Identifier, content: &'a [u8] },
    OnConstructedOpen { identifier: Identifier },
    OnConstructedClose,
}

/// Walks one TLV node (and, if constructed, its children recursively),
/// delivering events to `visitor` in document order. Returns whatever
/// followed the node in `input`. This is the primitive the extension-parser
/// callback surface (out of scope) is built on top of.
pub fn walk<'a>(
    input: &'a [u8],
    depth: usize,
    visitor: &mut dyn FnMut(ParseEvent<'_>) -> Result<(), DecodeError>,
) -> Result<&'a [u8], DecodeError> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(DecodeError::incomplete("recursion depth exceeded"));
    }
    let (identifier, content, remainder) = codec::decode_header(input)?;
    if identifier.constructed {
        visitor(ParseEvent::OnConstructedOpen { identifier })?;
        let mut rest = content;
        while !rest.is_empty() {
            rest = walk(rest, depth + 1, visitor)?;
        }
        visitor(ParseEvent::OnConstructedClose)?;
    } else {
        visitor(ParseEvent::OnPrimitive { identifier, content })?;
    }
    Ok(remainder)
}

/// The capability every builder kind implements: given one full TLV node
/// (its identifier, already split from its content), produce the typed
/// value it describes. `depth` tracks nesting for [`MAX_RECURSION_DEPTH`].
pub trait Builder: Sized {
    type Output;

    /// Whether a TLV node with this identifier is one this builder can
    /// consume — the static grammar check that replaces a transition-table
    /// lookup.
    fn matches(identifier: Identifier) -> bool;

    /// Consumes one TLV node and builds the typed value.
    fn build(identifier: Identifier, content: &[u8], depth: usize) -> Result<Self::Output, DecodeError>;
}

/// Builders whose own default (untagged) encoding has a single, fixed
/// identifier. Needed by [`context_tagged`] to realize IMPLICIT tagging,
/// which rewrites only the tag octet and leaves content untouched. CHOICE
/// types have no single default identifier and, per X.680, can never be
/// implicitly tagged — they simply don't implement this trait.
pub trait DefaultIdentifier: Builder {
    fn default_identifier() -> Identifier;
}

/// Builds a `B` from the TLV node at `(identifier, content)`, checking the
/// recursion bound first.
pub fn build_at<B: Builder>(identifier: Identifier, content: &[u8], depth: usize) -> Result<B::Output, DecodeError> {
    if depth > MAX_RECURSION_DEPTH {
        return Err(DecodeError::incomplete("recursion depth exceeded"));
    }
    B::build(identifier, content, depth)
}

/// The public parse entry point: decodes a root-level TLV and builds `B`'s
/// output from it. Trailing bytes after the root TLV are an error.
pub fn parse<B: Builder>(bytes: &[u8]) -> Result<B::Output, DecodeError> {
    let (identifier, content, remainder) = codec::decode_header(bytes)?;
    if !remainder.is_empty() {
        return Err(DecodeError::invalid_content("trailing bytes after root TLV"));
    }
    if !B::matches(identifier) {
        return Err(DecodeError::unsupported_format("root TLV does not match the expected type"));
    }
    build_at::<B>(identifier, content, 0)
}

/// Parses a nested DER blob (an extension value, an OCSP `ResponseBytes`
/// payload, …) that is itself a fresh root-level parse, carrying the
/// recursion depth forward so repeated nesting still hits the bound.
pub fn parse_nested<B: Builder>(bytes: &[u8], depth: usize) -> Result<B::Output, DecodeError> {
    let (identifier, content, remainder) = codec::decode_header(bytes)?;
    if !remainder.is_empty() {
        return Err(DecodeError::invalid_content("trailing bytes after nested TLV"));
    }
    if !B::matches(identifier) {
        return Err(DecodeError::unsupported_format("nested TLV does not match the expected type"));
    }
    build_at::<B>(identifier, content, depth + 1)
}

/// Splits a constructed TLV's content into its immediate child nodes, each
/// as `(identifier, content)`, without recursing into grandchildren.
pub fn child_nodes(content: &[u8]) -> Result<Vec<(Identifier, &[u8])>, DecodeError> {
    let mut nodes = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        let (identifier, child_content, remainder) = codec::decode_header(rest)?;
        nodes.push((identifier, child_content));
        rest = remainder;
    }
    Ok(nodes)
}
