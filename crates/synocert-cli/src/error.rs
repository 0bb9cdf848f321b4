//! Error type for the certificate update workflow.
//!
//! Each variant corresponds to one step of the workflow and maps to its own
//! process exit code, so automation can tell a rejected login from a
//! missing certificate.

use synocert_sdk::SdkError;

/// Why a certificate update did not complete.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The full chain holds no usable leaf certificate.
    #[error("invalid full chain: {0}")]
    Certificate(String),

    /// The interactive password prompt failed or was cancelled.
    #[error("password prompt failed: {0}; pass --password or set SYNOLOGY_PASSWORD instead")]
    Prompt(#[from] inquire::InquireError),

    /// The DSM client could not be built (bad base URL, TLS setup).
    #[error("cannot set up DSM client: {0}")]
    Client(#[source] SdkError),

    /// Login was rejected or could not be performed.
    #[error("login failed: {0}")]
    Login(#[source] SdkError),

    /// Installed certificates could not be listed.
    #[error("could not get certificates: {0}")]
    Listing(#[source] SdkError),

    /// No installed certificate has the new certificate's common name.
    #[error("certificate not found on Synology: {common_name}")]
    NotFound {
        /// Common name that was searched for.
        common_name: String,
    },

    /// The import of the new key and certificate failed.
    #[error("updating certificate failed: {0}")]
    Upload(#[source] SdkError),

    /// Ctrl-C arrived while logged in; the session was closed.
    #[error("interrupted, logged out of DSM")]
    Interrupted,
}

impl UpdateError {
    /// Process exit code for this failure.
    ///
    /// | Code | Failure |
    /// |------|---------|
    /// | 1 | certificate, configuration or prompt |
    /// | 2 | login |
    /// | 3 | listing |
    /// | 4 | certificate not found |
    /// | 5 | upload |
    /// | 130 | interrupted |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Certificate(_) | Self::Prompt(_) | Self::Client(_) => 1,
            Self::Login(_) => 2,
            Self::Listing(_) => 3,
            Self::NotFound { .. } => 4,
            Self::Upload(_) => 5,
            Self::Interrupted => 130,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_step() {
        let cases = [
            (UpdateError::Certificate("no CN".into()), 1),
            (UpdateError::Prompt(inquire::InquireError::NotTTY), 1),
            (UpdateError::Client(SdkError::Config("bad".into())), 1),
            (UpdateError::Login(SdkError::Config("x".into())), 2),
            (UpdateError::Listing(SdkError::Config("x".into())), 3),
            (
                UpdateError::NotFound {
                    common_name: "nas.example.com".into(),
                },
                4,
            ),
            (UpdateError::Upload(SdkError::Config("x".into())), 5),
            (UpdateError::Interrupted, 130),
        ];

        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "{err}");
        }
    }

    #[test]
    fn not_found_display() {
        let err = UpdateError::NotFound {
            common_name: "nas.example.com".into(),
        };
        assert_eq!(
            err.to_string(),
            "certificate not found on Synology: nas.example.com"
        );
    }

    #[test]
    fn prompt_failure_points_to_non_interactive_options() {
        let message = UpdateError::Prompt(inquire::InquireError::NotTTY).to_string();
        assert!(message.starts_with("password prompt failed: "));
        assert!(message.contains("--password"));
        assert!(message.contains("SYNOLOGY_PASSWORD"));
    }
}
