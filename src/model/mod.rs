//! The PKIX/CMP object model built on top of the `builder` framework:
//! X.509 certificates, CRLs, CSRs, OCSP messages, and attribute
//! certificates, each expressed as a plain struct/enum plus a zero-sized
//! `Builder` type and a hand-written `Encode` impl.

pub mod algorithm_identifier;
pub mod attribute_certificate;
pub mod certificate;
pub mod crl;
pub mod csr;
pub mod extension;
pub mod general_name;
pub mod name;
pub mod ocsp;
pub mod policy;
pub mod raw;
pub mod validity;

pub use algorithm_identifier::{AlgorithmIdentifier, AlgorithmIdentifierBuilder, AlgorithmParameters};
pub use attribute_certificate::{
    AttributeCertificate, AttributeCertificateBuilder, AttributeCertificateInfo, Holder, Issuer, IssuerSerial,
    ObjectDigestInfo,
};
pub use certificate::{SubjectPublicKeyInfo, TbsCertificate, Version, X509Certificate};
pub use crl::{CertificateList, DistributionPoint, DistributionPointName, IssuingDistributionPoint, RevokedCertificate, TbsCertList};
pub use csr::{Attribute, CertificationRequest, CertificationRequestInfo};
pub use extension::{AccessDescription, BasicConstraints, Extension, ExtensionValue, Extensions, KeyUsage, NameConstraints, PrivateKeyUsagePeriod};
pub use general_name::{EdiPartyName, GeneralName, OtherName};
pub use name::{AttributeTypeAndValue, DirectoryString, Name, RdnSequence, RelativeDistinguishedName};
pub use ocsp::{BasicOcspResponse, CertId, CertStatus, OcspResponse, ResponderId, ResponseBytes, ResponseData, SingleResponse};
pub use policy::{NoticeReference, PolicyConstraints, PolicyInformation, PolicyQualifier, PolicyQualifierInfo, UserNotice};
pub use raw::RawData;
pub use validity::{Time, Validity};
