//! The primitive codec: TLV framing plus an encode/decode function pair for
//! every ASN.1 primitive type DER assigns a universal tag to. Every
//! function here operates on bare content octets (the `V` of TLV) and
//! never looks at or produces the surrounding identifier/length; callers
//! assemble full TLVs via [`header`].

pub mod bit_string;
pub mod header;
pub mod integer;
pub mod octet_string;
pub mod oid;
pub mod primitives;
pub mod real;
pub mod strings;
pub mod time;

pub use bit_string::{decode_bit_string_content, encode_bit_string_content, BitString};
pub use header::{decode_header, encode_header};
pub use integer::{decode_bigint, encode_bigint, encode_integer_bytes};
pub use octet_string::{decode_octet_string, encode_octet_string};
pub use oid::{
    decode_oid_content, decode_relative_oid_content, encode_oid_content,
    encode_relative_oid_content, ObjectIdentifier, RelativeOid,
};
pub use primitives::{
    decode_boolean, decode_enumerated, decode_null, encode_boolean, encode_enumerated,
    encode_null,
};
pub use real::{decode_real, encode_real};
pub use strings::{
    decode_bmp_string, decode_general_string, decode_graphic_string, decode_ia5_string,
    decode_numeric_string, decode_printable_string, decode_teletex_string,
    decode_universal_string, decode_utf8_string, BmpString, GeneralString, GraphicString,
    Ia5String, NumericString, PrintableString, TeletexString, UniversalString, Utf8String,
};
pub use time::{
    decode_generalized_time, decode_utc_time, encode_generalized_time, encode_utc_time,
    is_valid_generalized_time, is_valid_utc_time, GeneralizedTime, UtcTime,
};
