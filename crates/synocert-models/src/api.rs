//! Response envelope shared by every DSM Web API call.
//!
//! DSM answers each `entry.cgi` request with HTTP 200 and a JSON body of
//! the form `{"success": bool, "data": {...}, "error": {"code": n}}`.
//! Success or failure is therefore decided by the envelope, not by the HTTP
//! status.

use serde::{Deserialize, Serialize};

use crate::endpoint::ApiName;

// ---------------------------------------------------------------------------
// ApiResponse
// ---------------------------------------------------------------------------

/// JSON envelope returned by `entry.cgi`.
///
/// # Examples
///
/// ```
/// use synocert_models::{ApiResponse, LoginData};
///
/// let body = r#"{"success": true, "data": {"sid": "abc"}}"#;
/// let res: ApiResponse<LoginData> = serde_json::from_str(body).unwrap();
/// assert_eq!(res.into_result().unwrap().unwrap().sid, "abc");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Payload; absent for calls that return nothing (e.g. logout).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details, present when `success` is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A successful response without payload.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// A failed response with the given DSM error code.
    pub fn failure(code: u16) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError::new(code)),
        }
    }

    /// Convert the envelope into a `Result`.
    ///
    /// A failed response without an `error` object is reported as
    /// [`ApiError::UNKNOWN`].
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.error.unwrap_or(ApiError::new(ApiError::UNKNOWN)))
        }
    }
}

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Error object of a failed DSM call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[error("DSM error code {code}")]
pub struct ApiError {
    /// Numeric DSM error code.
    pub code: u16,
}

impl ApiError {
    /// Code DSM uses when it has nothing more specific to say.
    pub const UNKNOWN: u16 = 100;
    /// Wrong account name or password.
    pub const BAD_CREDENTIALS: u16 = 400;
    /// The session id is missing or no longer valid.
    pub const SID_NOT_FOUND: u16 = 119;

    /// Wrap a raw DSM error code.
    pub fn new(code: u16) -> Self {
        Self { code }
    }

    /// Human readable meaning of the code in the context of `api`.
    ///
    /// Codes below 400 are shared by every API. Codes from 400 upward are
    /// API specific; only the `SYNO.API.Auth` ones are documented here.
    pub fn describe(&self, api: ApiName) -> &'static str {
        match (self.code, api) {
            (100, _) => "unknown error",
            (101, _) => "no parameter of API, method or version",
            (102, _) => "the requested API does not exist",
            (103, _) => "the requested method does not exist",
            (104, _) => "the requested version does not support the functionality",
            (105, _) => "the logged in session does not have permission",
            (106, _) => "session timeout",
            (107, _) => "session interrupted by duplicate login",
            (108, _) => "failed to upload the file",
            (109..=111 | 117 | 118, _) => {
                "the network connection is unstable or the system is busy"
            }
            (114, _) => "lost parameters for this API",
            (115, _) => "not allowed to upload a file",
            (116, _) => "not allowed to perform for a demo site",
            (119, _) => "invalid session",
            (400, ApiName::Auth) => "no such account or incorrect password",
            (401, ApiName::Auth) => "disabled account",
            (402, ApiName::Auth) => "denied permission",
            (403, ApiName::Auth) => "2-step verification code required",
            (404, ApiName::Auth) => "failed to authenticate 2-step verification code",
            (406, ApiName::Auth) => "enforce to authenticate with 2-step verification code",
            (407, ApiName::Auth) => "blocked IP source",
            (408, ApiName::Auth) => "expired password cannot change",
            (409, ApiName::Auth) => "expired password",
            (410, ApiName::Auth) => "password must be changed",
            _ => "unrecognised error code",
        }
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// `data` of a successful `SYNO.API.Auth` login with `format=sid`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginData {
    /// Session identifier to attach to subsequent calls.
    pub sid: String,
}
