//! `OptionalBuilder<T>` realized as field-cursor helpers: a SEQUENCE's
//! mandatory and optional fields arrive in declared order, so each one is
//! consumed by checking whether the node at the cursor matches before
//! advancing, rather than by a separate stateful wrapper builder.

use super::{build_at, Builder};
use crate::error::DecodeError;
use crate::identifier::Identifier;

/// Consumes the node at `nodes[*idx]` as a `B` if present and if it
/// matches; otherwise leaves the cursor untouched and returns `None`. This
/// is `OptionalBuilder<T>`: "acts as `PrimitiveBuilder<T>` when the next
/// event matches, otherwise transitions on without consuming."
pub fn build_optional<B: Builder>(
    nodes: &[(Identifier, &[u8])],
    idx: &mut usize,
    depth: usize,
) -> Result<Option<B::Output>, DecodeError> {
    match nodes.get(*idx) {
        Some(&(identifier, content)) if B::matches(identifier) => {
            let value = build_at::<B>(identifier, content, depth)?;
            *idx += 1;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

/// Consumes the node at `nodes[*idx]` as a `B`, failing with
/// `IncompleteInput` if it is absent or does not match — a mandatory
/// SEQUENCE field.
pub fn build_mandatory<B: Builder>(
    nodes: &[(Identifier, &[u8])],
    idx: &mut usize,
    depth: usize,
    context: &'static str,
) -> Result<B::Output, DecodeError> {
    let &(identifier, content) = nodes.get(*idx).ok_or_else(|| DecodeError::incomplete(context))?;
    if !B::matches(identifier) {
        return Err(DecodeError::incomplete(context));
    }
    *idx += 1;
    build_at::<B>(identifier, content, depth)
}

/// Fails if any nodes remain unconsumed past `idx` — used after a
/// composite builder has walked its declared fields, so that an
/// unrecognized trailing element is reported rather than silently ignored.
pub fn expect_exhausted(nodes: &[(Identifier, &[u8])], idx: usize, context: &'static str) -> Result<(), DecodeError> {
    if idx == nodes.len() {
        Ok(())
    } else {
        Err(DecodeError::incomplete(context))
    }
}

/// Default field omission: encode-side counterpart of default suppression.
/// Returns `None` (nothing to emit) when `value == default`.
pub fn suppress_default<T: PartialEq>(value: T, default: &T) -> Option<T> {
    if value == *default {
        None
    } else {
        Some(value)
    }
}
