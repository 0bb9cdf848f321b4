//! API names, versions and methods exposed through `entry.cgi`.
//!
//! Every DSM call goes to the same CGI endpoint and is routed by the
//! `api`, `version` and `method` query parameters.

use strum::{AsRefStr, Display, EnumString};

/// Path of the DSM Web API entry point, relative to the NAS base URL.
pub const ENTRY_PATH: &str = "/webapi/entry.cgi";

/// Session name requested at login. DSM scopes the `sid` to it.
pub const SESSION_NAME: &str = "Certificate";

/// The DSM APIs this tool talks to.
///
/// # Examples
///
/// ```
/// use synocert_models::ApiName;
///
/// assert_eq!(ApiName::Auth.to_string(), "SYNO.API.Auth");
/// assert_eq!(ApiName::Auth.version(), 3);
/// assert_eq!("SYNO.Core.Certificate".parse::<ApiName>().unwrap(), ApiName::Certificate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum ApiName {
    /// Session management (login / logout).
    #[strum(serialize = "SYNO.API.Auth")]
    Auth,
    /// Read access to the installed certificates.
    #[strum(serialize = "SYNO.Core.Certificate.CRT")]
    CertificateCrt,
    /// Certificate import / replacement.
    #[strum(serialize = "SYNO.Core.Certificate")]
    Certificate,
}

impl ApiName {
    /// API version this tool speaks for the given API.
    pub fn version(self) -> u8 {
        match self {
            Self::Auth => 3,
            Self::CertificateCrt | Self::Certificate => 1,
        }
    }
}

/// Methods invoked on the APIs above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ApiMethod {
    /// `SYNO.API.Auth` — open a session.
    Login,
    /// `SYNO.API.Auth` — close a session.
    Logout,
    /// `SYNO.Core.Certificate.CRT` — enumerate installed certificates.
    List,
    /// `SYNO.Core.Certificate` — upload key and certificate material.
    Import,
}
