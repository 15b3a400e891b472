//! DER `REAL`: base-10 (NR3 text) and base-2 (binary) forms.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::error::{DecodeError, EncodeError};

use super::integer::{decode_bigint, encode_bigint};
use num_bigint::BigInt;

/// Encodes a REAL value. `base` must be 2 (binary form, X.690 §8.5.7) or 10
/// (NR3 text form, ISO 6093); any other base yields
/// [`EncodeError::UnsupportedBase`].
pub fn encode_real(value: f64, base: u8) -> Result<Vec<u8>, EncodeError> {
    if value == 0.0 {
        return Ok(Vec::new());
    }
    match base {
        10 => Ok(encode_nr3(value).into_bytes()),
        2 => encode_binary(value),
        _ => Err(EncodeError::unsupported_base("REAL")),
    }
}

/// Decodes REAL content back into a value. Returns `0.0` for empty content
/// per X.690's convention for the value zero.
pub fn decode_real(content: &[u8]) -> Result<f64, DecodeError> {
    if content.is_empty() {
        return Ok(0.0);
    }
    let first = content[0];
    if first & 0x80 != 0 {
        decode_binary(content)
    } else if first & 0xc0 == 0 {
        decode_nr3(&content[1..])
    } else {
        Err(DecodeError::invalid_content("REAL: unsupported content form"))
    }
}

fn encode_nr3(value: f64) -> String {
    // Rust's `{:e}` gives us "<mantissa>e<exponent>"; NR3 additionally
    // requires a decimal point in the mantissa and an explicit exponent
    // sign, which we patch in.
    let rust_form = format!("{value:e}");
    let (mantissa, exponent) = rust_form.split_once('e').expect("`{:e}` always has an exponent");
    let mantissa = if mantissa.contains('.') {
        mantissa.to_string()
    } else {
        format!("{mantissa}.0")
    };
    let exponent: i64 = exponent.parse().expect("valid exponent digits");
    format!("\u{3}{mantissa}E{exponent:+}")
}

fn decode_nr3(text: &[u8]) -> Result<f64, DecodeError> {
    let text = core::str::from_utf8(text)
        .map_err(|_| DecodeError::invalid_content("REAL: NR3 form is not valid UTF-8"))?;
    let (mantissa, exponent) = text
        .split_once('E')
        .ok_or_else(|| DecodeError::invalid_content("REAL: NR3 form missing exponent"))?;
    let mantissa: f64 = mantissa
        .parse()
        .map_err(|_| DecodeError::invalid_content("REAL: NR3 mantissa is not numeric"))?;
    let exponent: i32 = exponent
        .parse()
        .map_err(|_| DecodeError::invalid_content("REAL: NR3 exponent is not numeric"))?;
    Ok(mantissa * 10f64.powi(exponent))
}

/// Decomposes `value` into `(sign, mantissa, exponent)` with
/// `value = sign * mantissa * 2^exponent`, `mantissa` odd.
fn decompose(value: f64) -> (bool, u64, i64) {
    let negative = value.is_sign_negative();
    let bits = value.abs().to_bits();
    let raw_exponent = ((bits >> 52) & 0x7ff) as i64;
    let raw_mantissa = bits & 0xf_ffff_ffff_ffff;

    let (mut mantissa, mut exponent) = if raw_exponent == 0 {
        (raw_mantissa, -1022 - 52)
    } else {
        (raw_mantissa | (1u64 << 52), raw_exponent - 1023 - 52)
    };

    while mantissa != 0 && mantissa & 1 == 0 {
        mantissa >>= 1;
        exponent += 1;
    }

    (negative, mantissa, exponent)
}

fn encode_binary(value: f64) -> Result<Vec<u8>, EncodeError> {
    let (negative, mantissa, exponent) = decompose(value);

    let exponent_bytes = encode_bigint(&BigInt::from(exponent));
    let mantissa_bytes = mantissa.to_be_bytes();
    let mantissa_bytes = {
        let first_nonzero = mantissa_bytes.iter().position(|&b| b != 0).unwrap_or(7);
        mantissa_bytes[first_nonzero..].to_vec()
    };

    let mut first_octet = 0x80u8;
    if negative {
        first_octet |= 0x40;
    }
    let exponent_len_code = match exponent_bytes.len() {
        1 => 0b00,
        2 => 0b01,
        3 => 0b10,
        _ => 0b11,
    };
    first_octet |= exponent_len_code;

    let mut out = alloc::vec![first_octet];
    if exponent_len_code == 0b11 {
        out.push(exponent_bytes.len() as u8);
    }
    out.extend_from_slice(&exponent_bytes);
    out.extend_from_slice(&mantissa_bytes);
    Ok(out)
}

fn decode_binary(content: &[u8]) -> Result<f64, DecodeError> {
    let first = *content
        .first()
        .ok_or_else(|| DecodeError::incomplete("REAL: missing first octet"))?;
    let negative = first & 0x40 != 0;
    let exponent_len_code = first & 0b11;
    let mut rest = &content[1..];

    let exponent_len = if exponent_len_code == 0b11 {
        let len = *rest
            .first()
            .ok_or_else(|| DecodeError::incomplete("REAL: missing exponent length octet"))?
            as usize;
        rest = &rest[1..];
        len
    } else {
        (exponent_len_code + 1) as usize
    };

    if rest.len() < exponent_len {
        return Err(DecodeError::incomplete("REAL: truncated exponent"));
    }
    let (exponent_bytes, mantissa_bytes) = rest.split_at(exponent_len);
    let exponent = decode_bigint(exponent_bytes)?;
    let exponent: i32 = exponent
        .try_into()
        .map_err(|_| DecodeError::invalid_content("REAL: exponent out of range"))?;

    let mut mantissa: u64 = 0;
    for &b in mantissa_bytes {
        mantissa = (mantissa << 8) | b as u64;
    }

    let magnitude = mantissa as f64 * 2f64.powi(exponent);
    Ok(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_encodes_empty() {
        assert_eq!(encode_real(0.0, 10).unwrap(), Vec::<u8>::new());
        assert_eq!(decode_real(&[]).unwrap(), 0.0);
    }

    #[test]
    fn base10_round_trips() {
        for v in [1.5, -1.5, 123.0, -0.25] {
            let encoded = encode_real(v, 10).unwrap();
            assert_eq!(decode_real(&encoded).unwrap(), v);
        }
    }

    #[test]
    fn base2_round_trips() {
        for v in [1.5, -1.5, 123.0, -0.25, 3.14159] {
            let encoded = encode_real(v, 2).unwrap();
            assert_eq!(decode_real(&encoded).unwrap(), v);
        }
    }

    #[test]
    fn unsupported_base_is_rejected() {
        assert!(encode_real(1.0, 16).is_err());
    }
}
