//! The certificate replacement workflow.
//!
//! ```text
//! unauthenticated ──login──▶ authenticated ──list──▶ matched ──import──▶ replaced ─┐
//!        │                         │                                               ├─▶ logged_out
//!        ▼                         └──────────────▶ unmatched ─────────────────────┘
//!   (login failed: stop, nothing to log out)
//! ```

use synocert_models::CertificateImport;
use synocert_sdk::{DsmClient, DsmCredentials, DsmSession};
use tracing::info;

use crate::certificate::CertificateMaterial;
use crate::error::UpdateError;

/// What was replaced on the NAS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    /// Identifier of the overwritten certificate.
    pub id: String,
    /// Description kept on it.
    pub desc: String,
    /// Whether it was (and still is) the default certificate.
    pub as_default: bool,
    /// Common name that matched.
    pub common_name: String,
}

/// Log in, replace the certificate whose CN matches `material`, log out.
///
/// Nothing is logged out when login fails. Once logged in, logout is
/// attempted exactly once whatever happens next, and the error of the
/// failing step is returned as is. Ctrl-C abandons the remaining steps but
/// still logs out.
pub async fn replace_certificate(
    client: &DsmClient,
    credentials: &DsmCredentials,
    material: &CertificateMaterial,
) -> Result<UpdateReport, UpdateError> {
    let session = client.login(credentials).await.map_err(UpdateError::Login)?;

    session
        .scope(async |session| match_and_replace(session, material).await)
        .await
        .map_err(|_| UpdateError::Interrupted)?
}

async fn match_and_replace(
    session: &DsmSession,
    material: &CertificateMaterial,
) -> Result<UpdateReport, UpdateError> {
    let record = session
        .find_certificate(&material.common_name)
        .await
        .map_err(UpdateError::Listing)?
        .ok_or_else(|| UpdateError::NotFound {
            common_name: material.common_name.clone(),
        })?;

    info!(
        id = %record.id,
        desc = %record.desc,
        is_default = record.is_default,
        common_name = %material.common_name,
        "matched installed certificate"
    );

    let import = CertificateImport::replacing(
        &record,
        material.private_key.clone(),
        material.fullchain.clone(),
    );
    session
        .import_certificate(&import)
        .await
        .map_err(UpdateError::Upload)?;

    Ok(UpdateReport {
        id: import.id,
        desc: import.desc,
        as_default: import.as_default,
        common_name: material.common_name.clone(),
    })
}
