//! A DER codec and builder framework for ASN.1, with built-in domain
//! knowledge for the X.509/PKIX/OCSP structures defined by RFC 5280,
//! RFC 5912, RFC 6960, and RFC 2986.
//!
//! Three layers, leaves first:
//!
//! - [`codec`] — the primitive codec: TLV framing plus encode/decode for
//!   every ASN.1 primitive DER assigns a universal tag to.
//! - [`model`] — the typed structure catalog (`Name`, `Extension`,
//!   `TbsCertificate`, …) shared between the builder and encoder paths.
//! - [`builder`] — the builder framework that turns a stream of TLV
//!   parse events into a typed value, and [`encode`], its back-path,
//!   which serializes a typed value back to canonical DER.
//!
//! Only DER is supported — no BER/CER/PER/XER, no streaming across I/O
//! boundaries, no ASN.1-source schema compilation. A parse consumes a
//! fully-resident octet slice and an encode produces one.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod builder;
pub mod codec;
pub mod encode;
pub mod error;
pub mod identifier;
pub mod model;
pub mod oids;
pub mod tag;

pub use builder::{parse, Builder};
pub use encode::Encode;
pub use error::{DecodeError, EncodeError};
pub use identifier::Identifier;
pub use tag::{Class, Tag};
