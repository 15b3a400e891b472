//! The DER character-string types. Each variant wraps a byte (or code-unit)
//! sequence and restricts it to its own permitted alphabet; the type itself
//! carries that alphabet rather than a shared base class.

use alloc::{string::String, vec::Vec};

use crate::error::DecodeError;

macro_rules! restricted_string {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub Vec<u8>);

        impl $name {
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<Vec<u8>> for $name {
            fn from(value: Vec<u8>) -> Self {
                Self(value)
            }
        }
    };
}

restricted_string!(PrintableString, "ASN.1 `PrintableString`.");
restricted_string!(Ia5String, "ASN.1 `IA5String`: 7-bit IA5 (near-ASCII).");
restricted_string!(VisibleString, "ASN.1 `VisibleString`: ISO 646 visible subset.");
restricted_string!(GraphicString, "ASN.1 `GraphicString`.");
restricted_string!(GeneralString, "ASN.1 `GeneralString`.");
restricted_string!(NumericString, "ASN.1 `NumericString`: digits and space.");
restricted_string!(TeletexString, "ASN.1 `TeletexString` (T.61), carried as raw octets.");

/// ASN.1 `UTF8String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Utf8String(pub String);

/// ASN.1 `UniversalString`: UCS-4, four bytes per character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UniversalString(pub Vec<u8>);

/// ASN.1 `BMPString`: UCS-2, two bytes per character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BmpString(pub Vec<u8>);

fn validate(ok: bool, context: &'static str) -> Result<(), DecodeError> {
    if ok {
        Ok(())
    } else {
        Err(DecodeError::constraint_check_fail(context))
    }
}

/// Validates that `bytes` only contains PrintableString's alphabet:
/// `A-Z a-z 0-9 ' ( ) + , - . / : = ?` and space.
pub fn decode_printable_string(bytes: &[u8]) -> Result<PrintableString, DecodeError> {
    let allowed = |b: u8| {
        b.is_ascii_alphanumeric()
            || matches!(b, b' ' | b'\'' | b'(' | b')' | b'+' | b',' | b'-' | b'.' | b'/' | b':' | b'=' | b'?')
    };
    validate(bytes.iter().all(|&b| allowed(b)), "PrintableString alphabet")?;
    Ok(PrintableString(bytes.to_vec()))
}

/// Validates that `bytes` are all within the 7-bit IA5 range.
pub fn decode_ia5_string(bytes: &[u8]) -> Result<Ia5String, DecodeError> {
    validate(bytes.iter().all(|&b| b < 0x80), "IA5String alphabet")?;
    Ok(Ia5String(bytes.to_vec()))
}

/// Validates that `bytes` are within the ISO 646 visible (printable ASCII,
/// excluding DEL) range.
pub fn decode_visible_string(bytes: &[u8]) -> Result<VisibleString, DecodeError> {
    validate(
        bytes.iter().all(|&b| (0x20..0x7f).contains(&b)),
        "VisibleString alphabet",
    )?;
    Ok(VisibleString(bytes.to_vec()))
}

/// GraphicString has no universally enforced restriction beyond excluding
/// C0/C1 control codes.
pub fn decode_graphic_string(bytes: &[u8]) -> Result<GraphicString, DecodeError> {
    validate(bytes.iter().all(|&b| b >= 0x20), "GraphicString alphabet")?;
    Ok(GraphicString(bytes.to_vec()))
}

/// GeneralString is effectively unconstrained at the octet level.
pub fn decode_general_string(bytes: &[u8]) -> Result<GeneralString, DecodeError> {
    Ok(GeneralString(bytes.to_vec()))
}

/// Validates that `bytes` are ASCII digits or space.
pub fn decode_numeric_string(bytes: &[u8]) -> Result<NumericString, DecodeError> {
    validate(
        bytes.iter().all(|&b| b.is_ascii_digit() || b == b' '),
        "NumericString alphabet",
    )?;
    Ok(NumericString(bytes.to_vec()))
}

/// TeletexString (T.61) is carried as raw octets without alphabet
/// enforcement; the full T.61 repertoire is outside this codec's scope.
pub fn decode_teletex_string(bytes: &[u8]) -> Result<TeletexString, DecodeError> {
    Ok(TeletexString(bytes.to_vec()))
}

/// Validates that `bytes` is well-formed UTF-8.
pub fn decode_utf8_string(bytes: &[u8]) -> Result<Utf8String, DecodeError> {
    let s = core::str::from_utf8(bytes)
        .map_err(|_| DecodeError::constraint_check_fail("UTF8String: invalid UTF-8"))?;
    Ok(Utf8String(s.into()))
}

/// Validates that `bytes` is a whole number of UCS-4 code units.
pub fn decode_universal_string(bytes: &[u8]) -> Result<UniversalString, DecodeError> {
    validate(bytes.len() % 4 == 0, "UniversalString: length not a multiple of 4")?;
    Ok(UniversalString(bytes.to_vec()))
}

/// Validates that `bytes` is a whole number of UCS-2 code units.
pub fn decode_bmp_string(bytes: &[u8]) -> Result<BmpString, DecodeError> {
    validate(bytes.len() % 2 == 0, "BMPString: length not a multiple of 2")?;
    Ok(BmpString(bytes.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_string_rejects_asterisk() {
        assert!(decode_printable_string(b"hello*world").is_err());
        assert!(decode_printable_string(b"hello, world").is_ok());
    }

    #[test]
    fn ia5_string_rejects_high_bit() {
        assert!(decode_ia5_string(&[0x80]).is_err());
        assert!(decode_ia5_string(b"example.com").is_ok());
    }

    #[test]
    fn utf8_string_rejects_invalid_bytes() {
        assert!(decode_utf8_string(&[0xff, 0xfe]).is_err());
        assert!(decode_utf8_string("héllo".as_bytes()).is_ok());
    }

    #[test]
    fn bmp_string_requires_even_length() {
        assert!(decode_bmp_string(&[0x00]).is_err());
        assert!(decode_bmp_string(&[0x00, 0x41]).is_ok());
    }
}
