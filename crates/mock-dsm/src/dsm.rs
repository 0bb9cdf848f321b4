//! In-memory NAS state: open sessions and installed certificates.

use std::collections::HashSet;

use synocert_models::{
    ApiError, CertificateList, CertificateRecord, CertificateSubject, LoginData,
};
use tracing::info;

use crate::config::MockConfig;

/// Code returned when an import names a certificate that does not exist.
const NO_SUCH_CERTIFICATE: u16 = ApiError::UNKNOWN;

/// Fields of a received import request.
#[derive(Debug, Default)]
pub struct ImportRequest {
    pub id: Option<String>,
    pub desc: Option<String>,
    pub as_default: bool,
    pub key: Option<String>,
    pub cert: Option<String>,
}

/// State of the mock NAS.
#[derive(Debug)]
pub struct MockDsm {
    password: String,
    sessions: HashSet<String>,
    certificates: Vec<CertificateRecord>,
    imports: usize,
}

impl MockDsm {
    /// A NAS with the stock `synology` certificate and a default
    /// certificate for `config.common_name`.
    pub fn new(config: &MockConfig) -> Self {
        let certificates = vec![
            record("syno0001", "", false, "synology"),
            record("mock0001", "Mock default", true, &config.common_name),
        ];

        Self {
            password: config.password.clone(),
            sessions: HashSet::new(),
            certificates,
            imports: 0,
        }
    }

    pub fn login(&mut self, account: &str, passwd: &str) -> Result<LoginData, ApiError> {
        if passwd != self.password {
            info!(account, "login rejected");
            return Err(ApiError::new(ApiError::BAD_CREDENTIALS));
        }

        let sid = uuid::Uuid::new_v4().simple().to_string();
        self.sessions.insert(sid.clone());
        info!(account, "login accepted");
        Ok(LoginData { sid })
    }

    pub fn logout(&mut self, sid: &str) -> Result<(), ApiError> {
        if self.sessions.remove(sid) {
            Ok(())
        } else {
            Err(ApiError::new(ApiError::SID_NOT_FOUND))
        }
    }

    pub fn list(&self, sid: &str) -> Result<CertificateList, ApiError> {
        self.check_session(sid)?;
        Ok(CertificateList {
            certificates: self.certificates.clone(),
        })
    }

    /// Overwrite an installed certificate.
    ///
    /// The description is replaced; `as_default` moves the default flag to
    /// the imported certificate.
    pub fn import(&mut self, sid: &str, request: ImportRequest) -> Result<(), ApiError> {
        self.check_session(sid)?;

        let (Some(id), Some(_), Some(_)) = (request.id, request.key, request.cert) else {
            return Err(ApiError::new(114));
        };

        let Some(index) = self.certificates.iter().position(|cert| cert.id == id) else {
            return Err(ApiError::new(NO_SUCH_CERTIFICATE));
        };

        if request.as_default {
            for cert in &mut self.certificates {
                cert.is_default = false;
            }
        }

        let target = &mut self.certificates[index];
        target.desc = request.desc.unwrap_or_default();
        target.is_default |= request.as_default;
        self.imports += 1;

        info!(id = %id, as_default = request.as_default, "certificate imported");
        Ok(())
    }

    /// Number of successful imports so far.
    pub fn imports(&self) -> usize {
        self.imports
    }

    fn check_session(&self, sid: &str) -> Result<(), ApiError> {
        if self.sessions.contains(sid) {
            Ok(())
        } else {
            Err(ApiError::new(ApiError::SID_NOT_FOUND))
        }
    }
}

fn record(id: &str, desc: &str, is_default: bool, common_name: &str) -> CertificateRecord {
    CertificateRecord {
        id: id.to_string(),
        desc: desc.to_string(),
        is_default,
        subject: CertificateSubject {
            common_name: common_name.to_string(),
        },
    }
}
