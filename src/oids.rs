//! The static OID registry (§6): symbolic names for the extension,
//! algorithm, and attribute OIDs this crate has built-in knowledge of, so
//! callers never need to embed arc-list literals of their own.
//!
//! Each constant is the OID's arcs as a `&'static [u32]`; call
//! [`ObjectIdentifier::new`](crate::codec::ObjectIdentifier::new) on
//! `CONST.to_vec()` (or use the matching `*_oid()` helper) to get an
//! owned value ready for comparison or encoding.

use crate::codec::ObjectIdentifier;

macro_rules! oid_registry {
    ($($const_name:ident, $fn_name:ident = [$($arc:expr),+ $(,)?];)+) => {
        $(
            pub const $const_name: &[u32] = &[$($arc),+];

            pub fn $fn_name() -> ObjectIdentifier {
                ObjectIdentifier::new($const_name.to_vec())
            }
        )+
    };
}

oid_registry! {
    // id-ce-* certificate extensions, RFC 5280 §4.2.
    KEY_USAGE, key_usage_oid = [2, 5, 29, 15];
    SUBJECT_ALT_NAME, subject_alt_name_oid = [2, 5, 29, 17];
    ISSUER_ALT_NAME, issuer_alt_name_oid = [2, 5, 29, 18];
    BASIC_CONSTRAINTS, basic_constraints_oid = [2, 5, 29, 19];
    NAME_CONSTRAINTS, name_constraints_oid = [2, 5, 29, 30];
    CRL_DISTRIBUTION_POINTS, crl_distribution_points_oid = [2, 5, 29, 31];
    CERTIFICATE_POLICIES, certificate_policies_oid = [2, 5, 29, 32];
    POLICY_MAPPINGS, policy_mappings_oid = [2, 5, 29, 33];
    AUTHORITY_KEY_IDENTIFIER, authority_key_identifier_oid = [2, 5, 29, 35];
    POLICY_CONSTRAINTS, policy_constraints_oid = [2, 5, 29, 36];
    EXT_KEY_USAGE, ext_key_usage_oid = [2, 5, 29, 37];
    SUBJECT_KEY_IDENTIFIER, subject_key_identifier_oid = [2, 5, 29, 14];
    INHIBIT_ANY_POLICY, inhibit_any_policy_oid = [2, 5, 29, 54];
    ISSUING_DISTRIBUTION_POINT, issuing_distribution_point_oid = [2, 5, 29, 28];
    FRESHEST_CRL, freshest_crl_oid = [2, 5, 29, 46];

    // id-pe-*, RFC 5280 §4.2.2.
    AUTHORITY_INFO_ACCESS, authority_info_access_oid = [1, 3, 6, 1, 5, 5, 7, 1, 1];
    SUBJECT_INFO_ACCESS, subject_info_access_oid = [1, 3, 6, 1, 5, 5, 7, 1, 11];

    // Attribute-type OIDs used in Name / RDN, RFC 4519.
    AT_COMMON_NAME, common_name_oid = [2, 5, 4, 3];
    AT_SURNAME, surname_oid = [2, 5, 4, 4];
    AT_SERIAL_NUMBER, serial_number_oid = [2, 5, 4, 5];
    AT_COUNTRY_NAME, country_name_oid = [2, 5, 4, 6];
    AT_LOCALITY_NAME, locality_name_oid = [2, 5, 4, 7];
    AT_STATE_OR_PROVINCE_NAME, state_or_province_name_oid = [2, 5, 4, 8];
    AT_ORGANIZATION_NAME, organization_name_oid = [2, 5, 4, 10];
    AT_ORGANIZATIONAL_UNIT_NAME, organizational_unit_name_oid = [2, 5, 4, 11];
    AT_TITLE, title_oid = [2, 5, 4, 12];
    AT_GIVEN_NAME, given_name_oid = [2, 5, 4, 42];

    // id-sha*, RFC 3279 / NIST.
    ID_SHA1, id_sha1_oid = [1, 3, 14, 3, 2, 26];
    ID_SHA256, id_sha256_oid = [2, 16, 840, 1, 101, 3, 4, 2, 1];
    ID_SHA384, id_sha384_oid = [2, 16, 840, 1, 101, 3, 4, 2, 2];
    ID_SHA512, id_sha512_oid = [2, 16, 840, 1, 101, 3, 4, 2, 3];

    // PKCS#1 signature/encryption algorithms, RFC 8017.
    RSA_ENCRYPTION, rsa_encryption_oid = [1, 2, 840, 113549, 1, 1, 1];
    SHA256_WITH_RSA_ENCRYPTION, sha256_with_rsa_encryption_oid = [1, 2, 840, 113549, 1, 1, 11];
    SHA384_WITH_RSA_ENCRYPTION, sha384_with_rsa_encryption_oid = [1, 2, 840, 113549, 1, 1, 12];
    SHA512_WITH_RSA_ENCRYPTION, sha512_with_rsa_encryption_oid = [1, 2, 840, 113549, 1, 1, 13];
    ID_RSASSA_PSS, id_rsassa_pss_oid = [1, 2, 840, 113549, 1, 1, 10];
    ID_RSAES_OAEP, id_rsaes_oaep_oid = [1, 2, 840, 113549, 1, 1, 7];

    // id-ecPublicKey and friends, RFC 5480.
    ID_EC_PUBLIC_KEY, id_ec_public_key_oid = [1, 2, 840, 10045, 2, 1];
    ECDSA_WITH_SHA256, ecdsa_with_sha256_oid = [1, 2, 840, 10045, 4, 3, 2];
    ECDSA_WITH_SHA384, ecdsa_with_sha384_oid = [1, 2, 840, 10045, 4, 3, 3];

    // PKCS#9 attributes used in CertificationRequestInfo, RFC 2985.
    PKCS9_EXTENSION_REQUEST, pkcs9_extension_request_oid = [1, 2, 840, 113549, 1, 9, 14];
    PKCS9_CHALLENGE_PASSWORD, pkcs9_challenge_password_oid = [1, 2, 840, 113549, 1, 9, 7];

    // id-kp-* extended key usage purposes, RFC 5280 §4.2.1.12.
    ID_KP_SERVER_AUTH, id_kp_server_auth_oid = [1, 3, 6, 1, 5, 5, 7, 3, 1];
    ID_KP_CLIENT_AUTH, id_kp_client_auth_oid = [1, 3, 6, 1, 5, 5, 7, 3, 2];
    ID_KP_CODE_SIGNING, id_kp_code_signing_oid = [1, 3, 6, 1, 5, 5, 7, 3, 3];
    ID_KP_OCSP_SIGNING, id_kp_ocsp_signing_oid = [1, 3, 6, 1, 5, 5, 7, 3, 9];

    // OCSP, RFC 6960.
    ID_PKIX_OCSP_BASIC, id_pkix_ocsp_basic_oid = [1, 3, 6, 1, 5, 5, 7, 48, 1, 1];
    ID_PKIX_OCSP_NONCE, id_pkix_ocsp_nonce_oid = [1, 3, 6, 1, 5, 5, 7, 48, 1, 2];
    ID_AD_OCSP, id_ad_ocsp_oid = [1, 3, 6, 1, 5, 5, 7, 48, 1];
    ID_AD_CA_ISSUERS, id_ad_ca_issuers_oid = [1, 3, 6, 1, 5, 5, 7, 48, 2];
}

/// Well-known certificate-extension OIDs this crate knows how to reparse
/// the `extnValue` octets of, keyed by OID; used by the `Extension`
/// builder's secondary dispatch.
pub fn is_known_extension(oid: &ObjectIdentifier) -> bool {
    let arcs = oid.arcs();
    [
        KEY_USAGE,
        SUBJECT_ALT_NAME,
        ISSUER_ALT_NAME,
        BASIC_CONSTRAINTS,
        NAME_CONSTRAINTS,
        CRL_DISTRIBUTION_POINTS,
        CERTIFICATE_POLICIES,
        POLICY_MAPPINGS,
        AUTHORITY_KEY_IDENTIFIER,
        POLICY_CONSTRAINTS,
        EXT_KEY_USAGE,
        SUBJECT_KEY_IDENTIFIER,
        INHIBIT_ANY_POLICY,
        ISSUING_DISTRIBUTION_POINT,
        FRESHEST_CRL,
        AUTHORITY_INFO_ACCESS,
        SUBJECT_INFO_ACCESS,
    ]
    .iter()
    .any(|known| *known == arcs)
}

pub fn arcs_of(oid: &ObjectIdentifier) -> &[u32] {
    oid.arcs()
}
