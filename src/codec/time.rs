//! `UTCTime` and `GeneralizedTime`, stored as their DER ASCII content plus a
//! grammar validator. Neither type re-validates full calendar correctness
//! (month/day cross-checking, real leap years, actual leap seconds) — only
//! the local field-range checks described below, matching the documented
//! limitation that e.g. February 31st is accepted.

use alloc::{string::String, vec::Vec};

use crate::error::DecodeError;

/// ASN.1 `UTCTime`: `YYMMDDhh[mm[ss]](Z|(+|-)hhmm)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UtcTime(pub String);

/// ASN.1 `GeneralizedTime`:
/// `YYYYMMDDhh[mm[ss[(.|,)f{1,4}]]][((+|-)hh[mm])|Z]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneralizedTime(pub String);

fn digits(s: &[u8], at: usize, count: usize) -> Option<u32> {
    let slice = s.get(at..at + count)?;
    if slice.iter().all(u8::is_ascii_digit) {
        core::str::from_utf8(slice).ok()?.parse().ok()
    } else {
        None
    }
}

/// Validates a UTCTime string against its grammar and per-field ranges.
pub fn is_valid_utc_time(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 11 {
        return false;
    }
    let Some(month) = digits(b, 2, 2) else { return false };
    let Some(day) = digits(b, 4, 2) else { return false };
    let Some(hour) = digits(b, 6, 2) else { return false };
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || hour > 23 {
        return false;
    }

    let mut pos = 8;
    if let Some(minute) = digits(b, pos, 2) {
        if minute > 59 {
            return false;
        }
        pos += 2;
        if let Some(second) = digits(b, pos, 2) {
            if second > 59 {
                return false;
            }
            pos += 2;
        }
    }

    match b.get(pos) {
        Some(b'Z') => pos + 1 == b.len(),
        Some(b'+') | Some(b'-') => validate_offset(&b[pos + 1..]),
        _ => false,
    }
}

/// Validates a GeneralizedTime string against the grammar in the module
/// documentation, including the leap-second restriction: `ss == 60` is only
/// accepted when the preceding `YYYYMMDDhhmm` matches `06302359` or
/// `12312359`.
pub fn is_valid_generalized_time(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 10 {
        return false;
    }
    let Some(month) = digits(b, 4, 2) else { return false };
    let Some(day) = digits(b, 6, 2) else { return false };
    let Some(hour) = digits(b, 8, 2) else { return false };
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || hour > 23 {
        return false;
    }

    let mut pos = 10;
    if let Some(minute) = digits(b, pos, 2) {
        if minute > 59 {
            return false;
        }
        pos += 2;

        if let Some(second) = digits(b, pos, 2) {
            let leap_ok = second == 60
                && matches!(&b[4..pos], b"06302359" | b"12312359");
            if second > 59 && !leap_ok {
                return false;
            }
            pos += 2;

            if matches!(b.get(pos), Some(b'.') | Some(b',')) {
                let frac_start = pos + 1;
                let frac_len = b[frac_start..]
                    .iter()
                    .take_while(|c| c.is_ascii_digit())
                    .count();
                if !(1..=4).contains(&frac_len) {
                    return false;
                }
                pos = frac_start + frac_len;
            }
        }
    }

    match b.get(pos) {
        None => true,
        Some(b'Z') => pos + 1 == b.len(),
        Some(b'+') | Some(b'-') => validate_offset(&b[pos + 1..]),
        _ => false,
    }
}

fn validate_offset(rest: &[u8]) -> bool {
    match rest.len() {
        2 => digits(rest, 0, 2).is_some_and(|hh| hh <= 24),
        4 => {
            digits(rest, 0, 2).is_some_and(|hh| hh <= 24)
                && digits(rest, 2, 2).is_some_and(|mm| mm <= 59)
        }
        _ => false,
    }
}

/// Decodes UTCTime content, rejecting malformed or out-of-range strings.
pub fn decode_utc_time(content: &[u8]) -> Result<UtcTime, DecodeError> {
    let s = core::str::from_utf8(content)
        .map_err(|_| DecodeError::constraint_check_fail("UTCTime: not ASCII/UTF-8"))?;
    if is_valid_utc_time(s) {
        Ok(UtcTime(s.into()))
    } else {
        Err(DecodeError::constraint_check_fail("UTCTime: malformed"))
    }
}

/// Decodes GeneralizedTime content, running [`is_valid_generalized_time`]
/// before accepting.
pub fn decode_generalized_time(content: &[u8]) -> Result<GeneralizedTime, DecodeError> {
    let s = core::str::from_utf8(content)
        .map_err(|_| DecodeError::constraint_check_fail("GeneralizedTime: not ASCII/UTF-8"))?;
    if is_valid_generalized_time(s) {
        Ok(GeneralizedTime(s.into()))
    } else {
        Err(DecodeError::constraint_check_fail("GeneralizedTime: malformed"))
    }
}

/// Encodes UTCTime content. Does not re-validate; callers are expected to
/// only construct `UtcTime` values that already satisfy the grammar.
pub fn encode_utc_time(value: &UtcTime) -> Vec<u8> {
    value.0.as_bytes().to_vec()
}

/// Encodes GeneralizedTime content, assuming `value` already matches
/// [`is_valid_generalized_time`].
pub fn encode_generalized_time(value: &GeneralizedTime) -> Vec<u8> {
    value.0.as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_true_leap_second_date() {
        assert!(is_valid_generalized_time("20231231235960Z"));
    }

    #[test]
    fn rejects_leap_second_on_other_dates() {
        assert!(!is_valid_generalized_time("20230715235960Z"));
    }

    #[test]
    fn accepts_february_31st_documented_limitation() {
        assert!(is_valid_generalized_time("20230231000000Z"));
    }

    #[test]
    fn rejects_month_13() {
        assert!(!is_valid_generalized_time("20231300000000Z"));
    }

    #[test]
    fn accepts_fractional_seconds() {
        assert!(is_valid_generalized_time("20230101000000.123Z"));
    }

    #[test]
    fn accepts_bare_local_time_without_zone() {
        assert!(is_valid_generalized_time("2023010100"));
    }

    #[test]
    fn round_trips_through_decode_and_encode() {
        let decoded = decode_generalized_time(b"20231231235960Z").unwrap();
        assert_eq!(encode_generalized_time(&decoded), b"20231231235960Z");
    }
}
