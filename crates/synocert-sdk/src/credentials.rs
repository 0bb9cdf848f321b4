//! Account credentials presented at login.

use std::fmt;

/// Credentials for `SYNO.API.Auth` login.
///
/// * `username` – DSM account name.
/// * `password` – account password; never printed by `Debug`.
/// * `otp_code` – current 2-step verification code, for accounts that
///   require one.
#[derive(Clone)]
pub struct DsmCredentials {
    /// DSM account name.
    pub username: String,
    /// Account password.
    pub password: String,
    /// 2-step verification code.
    pub otp_code: Option<String>,
}

impl DsmCredentials {
    /// Credentials without a 2-step verification code.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            otp_code: None,
        }
    }

    /// Attach a 2-step verification code.
    pub fn with_otp_code(mut self, code: impl Into<String>) -> Self {
        self.otp_code = Some(code.into());
        self
    }
}

impl fmt::Debug for DsmCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DsmCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("otp_code", &self.otp_code.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
