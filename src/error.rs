//! The error taxonomy shared by the codec, builder, and encoder layers.
//!
//! Mirrors the split the teacher codec uses between a decode-side and an
//! encode-side error type, each a flat `snafu`-derived enum carrying a short
//! diagnostic naming the field or byte offset at fault.

use alloc::string::String;
use snafu::Snafu;

/// Errors that can occur while decoding DER into a typed value.
#[derive(Debug, Snafu, PartialEq, Eq, Clone)]
#[snafu(visibility(pub(crate)))]
pub enum DecodeError {
    /// Primitive content violates its type's rules: empty INTEGER/OID, OID
    /// arc0 > 2, a REAL that is neither NR3 nor binary form, non-minimal
    /// INTEGER canonicalization.
    #[snafu(display("invalid content for {context}"))]
    InvalidContent { context: String },

    /// A BIT STRING's unused-bits octet was greater than 7.
    #[snafu(display("invalid unused-bits count in {context}"))]
    InvalidUnusedBits { context: String },

    /// TLV header or content shorter than declared length, builder reached
    /// end-of-input at a non-accepting state, or a mandatory field is
    /// missing when the root builder is asked to yield.
    #[snafu(display("incomplete input at {context}"))]
    IncompleteInput { context: String },

    /// The internal dispatcher could not match a physical type discriminator
    /// (e.g. a CHOICE variant or an OID-keyed union) to any known arm. This
    /// should never occur against a well-formed schema.
    #[snafu(display("internal dispatch failure at {context}"))]
    RuntimeFault { context: String },

    /// A type's declared value constraint (size bound, character-set
    /// restriction) rejected the decoded value.
    #[snafu(display("constraint check failed for {context}"))]
    ConstraintCheckFail { context: String },

    /// An unknown ASN.1 tag was encountered where no fallback `RawData`
    /// variant is declared.
    #[snafu(display("unsupported tag/format at {context}"))]
    UnsupportedFormat { context: String },
}

impl DecodeError {
    pub fn invalid_content(context: impl Into<String>) -> Self {
        Self::InvalidContent { context: context.into() }
    }

    pub fn invalid_unused_bits(context: impl Into<String>) -> Self {
        Self::InvalidUnusedBits { context: context.into() }
    }

    pub fn incomplete(context: impl Into<String>) -> Self {
        Self::IncompleteInput { context: context.into() }
    }

    pub fn runtime_fault(context: impl Into<String>) -> Self {
        Self::RuntimeFault { context: context.into() }
    }

    pub fn constraint_check_fail(context: impl Into<String>) -> Self {
        Self::ConstraintCheckFail { context: context.into() }
    }

    pub fn unsupported_format(context: impl Into<String>) -> Self {
        Self::UnsupportedFormat { context: context.into() }
    }
}

/// Errors that can occur while encoding a typed value into DER.
#[derive(Debug, Snafu, PartialEq, Eq, Clone)]
#[snafu(visibility(pub(crate)))]
pub enum EncodeError {
    /// Semantic precondition of a value was violated: an empty OID, an OID
    /// with arc0 > 2, an empty INTEGER.
    #[snafu(display("invalid content for {context}"))]
    InvalidContent { context: String },

    /// A BIT STRING's unused-bits count was greater than 7.
    #[snafu(display("invalid unused-bits count in {context}"))]
    InvalidUnusedBits { context: String },

    /// A REAL value was encoded with a base other than 2 or 10.
    #[snafu(display("unsupported REAL base for {context}"))]
    UnsupportedBase { context: String },
}

impl EncodeError {
    pub fn invalid_content(context: impl Into<String>) -> Self {
        Self::InvalidContent { context: context.into() }
    }

    pub fn invalid_unused_bits(context: impl Into<String>) -> Self {
        Self::InvalidUnusedBits { context: context.into() }
    }

    pub fn unsupported_base(context: impl Into<String>) -> Self {
        Self::UnsupportedBase { context: context.into() }
    }
}
