//! Certificate records as listed by the NAS, and the import request that
//! replaces one of them.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Subject fields of an installed certificate.
///
/// DSM returns more fields (organisation, country, SANs); only the common
/// name is needed to identify a certificate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CertificateSubject {
    /// Subject common name.
    #[serde(default)]
    pub common_name: String,
}

/// One certificate installed on the NAS.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CertificateRecord {
    /// Opaque identifier assigned by DSM.
    pub id: String,
    /// Free-form description shown in the DSM control panel.
    #[serde(default)]
    pub desc: String,
    /// Whether this is the system default certificate.
    #[serde(default)]
    pub is_default: bool,
    /// Certificate subject.
    #[serde(default)]
    pub subject: CertificateSubject,
}

/// `data` of a successful `SYNO.Core.Certificate.CRT` list call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CertificateList {
    /// Installed certificates, in the order DSM returns them.
    #[serde(default)]
    pub certificates: Vec<CertificateRecord>,
}

impl CertificateList {
    /// First certificate whose subject common name equals `common_name`.
    ///
    /// The comparison is exact: no case folding, no wildcard expansion.
    ///
    /// # Examples
    ///
    /// ```
    /// use synocert_models::{CertificateList, CertificateRecord, CertificateSubject};
    ///
    /// let list = CertificateList {
    ///     certificates: vec![CertificateRecord {
    ///         id: "abc123".into(),
    ///         desc: "Main".into(),
    ///         is_default: true,
    ///         subject: CertificateSubject { common_name: "nas.example.com".into() },
    ///     }],
    /// };
    /// assert_eq!(list.find_by_common_name("nas.example.com").unwrap().id, "abc123");
    /// assert!(list.find_by_common_name("NAS.example.com").is_none());
    /// ```
    pub fn find_by_common_name(&self, common_name: &str) -> Option<&CertificateRecord> {
        self.certificates
            .iter()
            .find(|cert| cert.subject.common_name == common_name)
    }
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Multipart field and file names of a `SYNO.Core.Certificate` import.
pub mod import_fields {
    /// File part holding the private key.
    pub const KEY: &str = "key";
    /// File part holding the certificate (full chain).
    pub const CERT: &str = "cert";
    /// File part for a separate intermediate bundle. Never sent; the full
    /// chain already carries the intermediates.
    pub const INTER_CERT: &str = "inter_cert";
    /// Identifier of the certificate being replaced.
    pub const ID: &str = "id";
    /// Description to keep on the replaced certificate.
    pub const DESC: &str = "desc";
    /// Present (with an empty value) to make the certificate the default.
    pub const AS_DEFAULT: &str = "as_default";
    /// File name announced for the key part.
    pub const KEY_FILE_NAME: &str = "privkey.pem";
    /// File name announced for the certificate part.
    pub const CERT_FILE_NAME: &str = "fullchain.pem";
}

/// Everything needed to replace an installed certificate.
#[derive(Clone, PartialEq, Eq)]
pub struct CertificateImport {
    /// Identifier of the certificate to overwrite.
    pub id: String,
    /// Description to keep.
    pub desc: String,
    /// Re-assert default status after the import.
    pub as_default: bool,
    /// PEM private key.
    pub private_key: String,
    /// PEM full chain (leaf first).
    pub certificate: String,
}

impl CertificateImport {
    /// Build an import that overwrites `record` in place, keeping its
    /// description and default flag.
    pub fn replacing(record: &CertificateRecord, private_key: String, certificate: String) -> Self {
        Self {
            id: record.id.clone(),
            desc: record.desc.clone(),
            as_default: record.is_default,
            private_key,
            certificate,
        }
    }
}

// Key material stays out of logs.
impl fmt::Debug for CertificateImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificateImport")
            .field("id", &self.id)
            .field("desc", &self.desc)
            .field("as_default", &self.as_default)
            .field("private_key", &"<redacted>")
            .field("certificate_len", &self.certificate.len())
            .finish()
    }
}
