//! End-to-end scenarios spanning module boundaries: a full certificate
//! round-trip, the OID/BasicConstraints/GeneralizedTime worked examples,
//! and the recursion-depth boundary.

use certasn1::builder::{parse, walk, ParseEvent, MAX_RECURSION_DEPTH};
use certasn1::codec::{BitString, GeneralizedTime, ObjectIdentifier};
use certasn1::encode::Encode;
use certasn1::model::{
    AlgorithmIdentifier, BasicConstraints, Extension, ExtensionValue, Name, SubjectPublicKeyInfo, TbsCertificate,
    Validity, Version, X509Certificate,
};
use certasn1::model::certificate::{TbsCertificateBuilder, X509CertificateBuilder};
use certasn1::model::validity::Time;
use certasn1::oids;

fn sample_certificate() -> X509Certificate {
    let tbs = TbsCertificate {
        version: Version::V3,
        serial_number: 42.into(),
        signature: AlgorithmIdentifier { algorithm: oids::sha256_with_rsa_encryption_oid(), parameters: None },
        issuer: Name::default(),
        validity: Validity {
            not_before: Time::Utc(certasn1::codec::UtcTime("240101000000Z".into())),
            not_after: Time::Utc(certasn1::codec::UtcTime("250101000000Z".into())),
        },
        subject: Name::default(),
        subject_public_key_info: SubjectPublicKeyInfo {
            algorithm: AlgorithmIdentifier { algorithm: oids::rsa_encryption_oid(), parameters: None },
            subject_public_key: BitString { bytes: vec![0x00, 0x01], unused_bits: 0 },
        },
        issuer_unique_id: None,
        subject_unique_id: None,
        extensions: None,
    };
    X509Certificate {
        tbs_certificate: tbs,
        signature_algorithm: AlgorithmIdentifier { algorithm: oids::sha256_with_rsa_encryption_oid(), parameters: None },
        signature_value: BitString { bytes: vec![0xde, 0xad, 0xbe, 0xef], unused_bits: 0 },
    }
}

#[test]
fn full_certificate_round_trips_byte_identical_when_already_canonical() {
    let cert = sample_certificate();
    let der = cert.encode().expect("encode");
    let decoded = parse::<X509CertificateBuilder>(&der).expect("parse");
    assert_eq!(decoded, cert);

    // Canonicalization idempotence: re-encoding the decoded value reproduces
    // the same canonical bytes.
    let der_again = decoded.encode().expect("re-encode");
    assert_eq!(der, der_again);
}

#[test]
fn oid_encodes_to_the_documented_byte_sequence() {
    // 1.2.840.113549.1.1.11 (sha256WithRSAEncryption)
    let oid = oids::sha256_with_rsa_encryption_oid();
    let der = oid.encode().expect("encode");
    assert_eq!(der, vec![0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x0B]);
    let decoded: ObjectIdentifier = parse::<certasn1::builder::primitive::PrimitiveBuilder<ObjectIdentifier>>(&der)
        .expect("decode");
    assert_eq!(decoded, oid);
}

#[test]
fn extension_with_false_critical_and_default_basic_constraints() {
    let bc = BasicConstraints { ca: false, path_len_constraint: None };
    assert_eq!(bc.encode().unwrap(), vec![0x30, 0x00]);

    let ext = Extension {
        extn_id: oids::basic_constraints_oid(),
        critical: false,
        extn_value: ExtensionValue::BasicConstraints(bc),
    };
    let der = ext.encode().expect("encode");
    // SEQUENCE header, then the OID TLV, no BOOLEAN, then the OCTET STRING
    // wrapping `30 00`.
    assert_eq!(der[2], 0x06); // OID tag, right after the SEQUENCE header
    assert!(der.windows(2).any(|w| w == [0x04, 0x02])); // OCTET STRING, length 2
    assert!(der.ends_with(&[0x30, 0x00]));
}

#[test]
fn generalized_time_leap_second_example_from_spec() {
    let accepted = parse::<certasn1::builder::primitive::PrimitiveBuilder<GeneralizedTime>>(&[
        0x18, 0x0F, 0x32, 0x30, 0x32, 0x33, 0x31, 0x32, 0x33, 0x31, 0x32, 0x33, 0x35, 0x39, 0x36, 0x30, 0x5A,
    ]);
    assert_eq!(accepted.unwrap().0, "20231231235960Z");

    let rejected_date = GeneralizedTime("20230715235960Z".into());
    assert!(!certasn1::codec::is_valid_generalized_time(&rejected_date.0));
}

fn nested_sequence_der(levels: usize) -> Vec<u8> {
    let mut der = vec![0x30u8, 0x00u8];
    for _ in 1..levels {
        let len = der.len();
        assert!(len < 128, "test helper only supports short-form lengths");
        let mut next = vec![0x30u8, len as u8];
        next.extend_from_slice(&der);
        der = next;
    }
    der
}

#[test]
fn recursion_depth_exactly_at_the_limit_is_accepted() {
    let der = nested_sequence_der(MAX_RECURSION_DEPTH + 1);
    let result = walk(&der, 0, &mut |_event: ParseEvent<'_>| Ok(()));
    assert!(result.is_ok());
}

#[test]
fn recursion_depth_one_past_the_limit_is_rejected() {
    let der = nested_sequence_der(MAX_RECURSION_DEPTH + 2);
    let result = walk(&der, 0, &mut |_event: ParseEvent<'_>| Ok(()));
    assert!(result.is_err());
}
