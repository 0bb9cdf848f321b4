//! Authenticated DSM session.
//!
//! A [`DsmSession`] is created by [`DsmClient::login`](crate::DsmClient::login)
//! and owns the session identifier. Logging out consumes the session, so it
//! can be closed at most once; [`DsmSession::scope`] guarantees it is closed
//! after the work done with it, whatever the outcome, including Ctrl-C.

use std::fmt;
use std::future::Future;
use std::ops::AsyncFnOnce;

use reqwest::multipart::{Form, Part};
use synocert_models::{
    ApiMethod, ApiName, CertificateImport, CertificateList, CertificateRecord, import_fields,
};
use tracing::{info, warn};

use crate::client::DsmClient;
use crate::error::SdkError;
use crate::query::DsmQuery;

/// A logged-in DSM session.
pub struct DsmSession {
    client: DsmClient,
    sid: String,
}

impl DsmSession {
    pub(crate) fn new(client: DsmClient, sid: String) -> Self {
        Self { client, sid }
    }

    // ------------------------------------------------------------------
    // Certificates
    // ------------------------------------------------------------------

    /// Every certificate installed on the NAS.
    pub async fn list_certificates(&self) -> Result<CertificateList, SdkError> {
        let request = self.client.get().query(&DsmQuery::with_sid(
            ApiName::CertificateCrt,
            ApiMethod::List,
            &self.sid,
        ));

        let list: CertificateList = self
            .client
            .send(request, ApiName::CertificateCrt, ApiMethod::List)
            .await?
            .ok_or_else(|| SdkError::MalformedResponse("certificate list has no data".into()))?;

        info!(count = list.certificates.len(), "listed installed certificates");
        Ok(list)
    }

    /// The first installed certificate whose subject CN is `common_name`.
    pub async fn find_certificate(
        &self,
        common_name: &str,
    ) -> Result<Option<CertificateRecord>, SdkError> {
        let list = self.list_certificates().await?;
        Ok(list.find_by_common_name(common_name).cloned())
    }

    /// Upload new key and certificate material over an installed
    /// certificate.
    ///
    /// The full chain goes in the `cert` part; no `inter_cert` part is
    /// sent. `as_default` is only included when requested.
    pub async fn import_certificate(&self, import: &CertificateImport) -> Result<(), SdkError> {
        let request = self
            .client
            .post()
            .query(&DsmQuery::with_sid(
                ApiName::Certificate,
                ApiMethod::Import,
                &self.sid,
            ))
            .multipart(import_form(import));

        self.client
            .send::<serde_json::Value>(request, ApiName::Certificate, ApiMethod::Import)
            .await?;

        info!(id = %import.id, as_default = import.as_default, "certificate imported");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Teardown
    // ------------------------------------------------------------------

    /// Close the session.
    pub async fn logout(self) -> Result<(), SdkError> {
        let request = self.client.get().query(&DsmQuery::logout(&self.sid));
        self.client
            .send::<serde_json::Value>(request, ApiName::Auth, ApiMethod::Logout)
            .await?;

        info!("logged out of DSM");
        Ok(())
    }

    /// Run `f` with this session, then log out.
    ///
    /// Logout is attempted exactly once, after `f` completes, whether `f`
    /// succeeded or not. The value returned by `f` is passed through
    /// unchanged; a logout failure is only logged.
    ///
    /// If Ctrl-C arrives first, `f` is abandoned, the session is still
    /// logged out and [`SdkError::Interrupted`] is returned.
    pub async fn scope<F, T>(self, f: F) -> Result<T, SdkError>
    where
        F: AsyncFnOnce(&DsmSession) -> T,
    {
        self.scope_until(ctrl_c(), f).await
    }

    /// Like [`scope`](Self::scope), abandoning `f` when `interrupt`
    /// completes first.
    pub async fn scope_until<I, F, T>(self, interrupt: I, f: F) -> Result<T, SdkError>
    where
        I: Future<Output = ()>,
        F: AsyncFnOnce(&DsmSession) -> T,
    {
        let outcome = tokio::select! {
            outcome = f(&self) => Ok(outcome),
            () = interrupt => {
                warn!("interrupted, closing the session");
                Err(SdkError::Interrupted)
            }
        };

        if let Err(err) = self.logout().await {
            warn!(error = %err, "logout failed");
        }

        outcome
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The session identifier.
    pub fn sid(&self) -> &str {
        &self.sid
    }

    /// The client this session was opened on.
    pub fn client(&self) -> &DsmClient {
        &self.client
    }
}

impl fmt::Debug for DsmSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DsmSession")
            .field("entry_url", &self.client.entry_url().as_str())
            .field("sid", &"<redacted>")
            .finish()
    }
}

/// Resolves on Ctrl-C; never, if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Multipart body of a `SYNO.Core.Certificate` import.
fn import_form(import: &CertificateImport) -> Form {
    let key = Part::text(import.private_key.clone()).file_name(import_fields::KEY_FILE_NAME);
    let cert = Part::text(import.certificate.clone()).file_name(import_fields::CERT_FILE_NAME);

    let form = Form::new()
        .text(import_fields::ID, import.id.clone())
        .text(import_fields::DESC, import.desc.clone())
        .part(import_fields::KEY, key)
        .part(import_fields::CERT, cert);

    if import.as_default {
        form.text(import_fields::AS_DEFAULT, "")
    } else {
        form
    }
}
