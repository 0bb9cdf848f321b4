//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. It separates failures reported by DSM itself
//! (a `success: false` envelope) from transport and decoding failures.

use synocert_models::{ApiError, ApiMethod, ApiName};

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid configuration (e.g. a base URL that does not parse).
    #[error("configuration error: {0}")]
    Config(String),

    /// DSM answered with `success: false`.
    #[error("{api} {method} failed with code {code}: {reason}")]
    Api {
        /// API that was called.
        api: ApiName,
        /// Method that was called.
        method: ApiMethod,
        /// DSM error code.
        code: u16,
        /// Meaning of `code` for this API.
        reason: &'static str,
    },

    /// DSM answered with a success envelope that lacks required data.
    #[error("malformed DSM response: {0}")]
    MalformedResponse(String),

    /// The work done in a session was interrupted (Ctrl-C).
    #[error("interrupted")]
    Interrupted,

    /// HTTP transport failure or non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not a DSM JSON envelope.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SdkError {
    pub(crate) fn api(api: ApiName, method: ApiMethod, err: ApiError) -> Self {
        Self::Api {
            api,
            method,
            code: err.code,
            reason: err.describe(api),
        }
    }

    /// DSM error code, when DSM itself rejected the call.
    pub fn api_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display() {
        let err = SdkError::api(ApiName::Auth, ApiMethod::Login, ApiError::new(400));
        assert_eq!(
            err.to_string(),
            "SYNO.API.Auth login failed with code 400: no such account or incorrect password"
        );
        assert_eq!(err.api_code(), Some(400));
    }

    #[test]
    fn non_api_errors_have_no_code() {
        assert_eq!(SdkError::Config("bad".into()).api_code(), None);
    }
}
