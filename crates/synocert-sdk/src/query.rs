//! Canonical query strings for the DSM calls made by the SDK.
//!
//! Every request goes to `entry.cgi`; the query selects the API, its
//! version and the method. All query strings are built through
//! [`DsmQuery`] so the parameter names live in exactly one place.
//!
//! # Layout
//!
//! ```text
//! api=SYNO.API.Auth&version=3&method=login&session=Certificate&format=sid&account=..&passwd=..
//! api=SYNO.API.Auth&version=3&method=logout&sid=..
//! api=SYNO.Core.Certificate.CRT&version=1&method=list&sid=..
//! api=SYNO.Core.Certificate&version=1&method=import&sid=..
//! ```

use synocert_models::{ApiMethod, ApiName, SESSION_NAME};

use crate::credentials::DsmCredentials;

/// Ordered `(name, value)` query parameters.
pub type QueryParams = Vec<(&'static str, String)>;

/// Central authority for DSM query parameters.
///
/// # Examples
///
/// ```
/// use synocert_models::{ApiMethod, ApiName};
/// use synocert_sdk::DsmQuery;
///
/// let query = DsmQuery::with_sid(ApiName::CertificateCrt, ApiMethod::List, "SID");
/// assert_eq!(
///     query,
///     vec![
///         ("api", "SYNO.Core.Certificate.CRT".to_string()),
///         ("version", "1".to_string()),
///         ("method", "list".to_string()),
///         ("sid", "SID".to_string()),
///     ],
/// );
/// ```
pub struct DsmQuery;

impl DsmQuery {
    /// `api`, `version` and `method` for a call.
    pub fn call(api: ApiName, method: ApiMethod) -> QueryParams {
        vec![
            ("api", api.to_string()),
            ("version", api.version().to_string()),
            ("method", method.to_string()),
        ]
    }

    /// Login query, requesting a `sid` for the certificate session.
    pub fn login(creds: &DsmCredentials) -> QueryParams {
        let mut query = Self::call(ApiName::Auth, ApiMethod::Login);
        query.extend([
            ("session", SESSION_NAME.to_string()),
            ("format", "sid".to_string()),
            ("account", creds.username.clone()),
            ("passwd", creds.password.clone()),
        ]);
        if let Some(code) = &creds.otp_code {
            query.push(("otp_code", code.clone()));
        }
        query
    }

    /// Query for an authenticated call.
    pub fn with_sid(api: ApiName, method: ApiMethod, sid: &str) -> QueryParams {
        let mut query = Self::call(api, method);
        query.push(("sid", sid.to_string()));
        query
    }

    /// Logout query for `sid`.
    pub fn logout(sid: &str) -> QueryParams {
        Self::with_sid(ApiName::Auth, ApiMethod::Logout, sid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(query: &'a QueryParams, name: &str) -> Option<&'a str> {
        query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn login_query() {
        let query = DsmQuery::login(&DsmCredentials::new("admin", "secret"));
        assert_eq!(value(&query, "api"), Some("SYNO.API.Auth"));
        assert_eq!(value(&query, "version"), Some("3"));
        assert_eq!(value(&query, "method"), Some("login"));
        assert_eq!(value(&query, "session"), Some("Certificate"));
        assert_eq!(value(&query, "format"), Some("sid"));
        assert_eq!(value(&query, "account"), Some("admin"));
        assert_eq!(value(&query, "passwd"), Some("secret"));
        assert_eq!(value(&query, "otp_code"), None);
        assert_eq!(value(&query, "sid"), None);
    }

    #[test]
    fn login_query_with_otp() {
        let creds = DsmCredentials::new("admin", "secret").with_otp_code("654321");
        let query = DsmQuery::login(&creds);
        assert_eq!(value(&query, "otp_code"), Some("654321"));
    }

    #[test]
    fn logout_query() {
        let query = DsmQuery::logout("SID42");
        assert_eq!(value(&query, "api"), Some("SYNO.API.Auth"));
        assert_eq!(value(&query, "method"), Some("logout"));
        assert_eq!(value(&query, "sid"), Some("SID42"));
    }

    #[test]
    fn import_query() {
        let query = DsmQuery::with_sid(ApiName::Certificate, ApiMethod::Import, "SID42");
        assert_eq!(value(&query, "api"), Some("SYNO.Core.Certificate"));
        assert_eq!(value(&query, "version"), Some("1"));
        assert_eq!(value(&query, "method"), Some("import"));
        assert_eq!(value(&query, "sid"), Some("SID42"));
    }
}
