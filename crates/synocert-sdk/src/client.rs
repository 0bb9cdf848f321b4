//! HTTP transport bound to one NAS.
//!
//! [`DsmClient`] owns the `reqwest` client and the `entry.cgi` URL. It is
//! cheap to clone and is the only way to obtain a [`DsmSession`].
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use synocert_sdk::{DsmClient, DsmCredentials};
//!
//! # async fn run() -> Result<(), synocert_sdk::SdkError> {
//! let client = DsmClient::new("https://nas.local:5001", true)?;
//! let session = client.login(&DsmCredentials::new("admin", "secret")).await?;
//! session.logout().await?;
//! # Ok(())
//! # }
//! ```

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use synocert_models::{ApiMethod, ApiName, ApiResponse, ENTRY_PATH, LoginData};
use tracing::{debug, info, warn};

use crate::credentials::DsmCredentials;
use crate::error::SdkError;
use crate::query::DsmQuery;
use crate::session::DsmSession;

/// Connection to the DSM Web API of a single NAS.
#[derive(Debug, Clone)]
pub struct DsmClient {
    http: reqwest::Client,
    entry_url: Url,
}

impl DsmClient {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Build a client for the NAS at `base_url` (e.g. `https://nas.local:5001`).
    ///
    /// With `ssl_verification` off the client accepts any server
    /// certificate, which is what a NAS still serving a self-signed or
    /// expired certificate needs.
    pub fn new(base_url: &str, ssl_verification: bool) -> Result<Self, SdkError> {
        let entry_url = Self::entry_url_for(base_url)?;

        if !ssl_verification {
            warn!(url = %entry_url, "SSL certificate verification disabled");
        }

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!ssl_verification)
            .build()?;

        Ok(Self { http, entry_url })
    }

    /// Resolve `{base_url}/webapi/entry.cgi`, tolerating trailing slashes.
    fn entry_url_for(base_url: &str) -> Result<Url, SdkError> {
        let base = base_url.trim().trim_end_matches('/');
        let url = Url::parse(&format!("{base}{ENTRY_PATH}"))
            .map_err(|e| SdkError::Config(format!("invalid base URL \"{base_url}\": {e}")))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SdkError::Config(format!(
                "unsupported URL scheme \"{other}\" in \"{base_url}\""
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// Open a session with `SYNO.API.Auth` login.
    ///
    /// The returned [`DsmSession`] must be closed with
    /// [`DsmSession::logout`] or used through [`DsmSession::scope`].
    pub async fn login(&self, creds: &DsmCredentials) -> Result<DsmSession, SdkError> {
        let request = self.get().query(&DsmQuery::login(creds));
        let data: LoginData = self
            .send(request, ApiName::Auth, ApiMethod::Login)
            .await?
            .ok_or_else(|| SdkError::MalformedResponse("login response has no data".into()))?;

        if data.sid.is_empty() {
            return Err(SdkError::MalformedResponse("login response has an empty sid".into()));
        }

        info!(account = %creds.username, "logged in to DSM");
        Ok(DsmSession::new(self.clone(), data.sid))
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    pub(crate) fn get(&self) -> RequestBuilder {
        self.http.get(self.entry_url.clone())
    }

    pub(crate) fn post(&self) -> RequestBuilder {
        self.http.post(self.entry_url.clone())
    }

    /// Send a prepared request and unwrap the DSM envelope.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        api: ApiName,
        method: ApiMethod,
    ) -> Result<Option<T>, SdkError> {
        debug!(api = %api, method = %method, "calling DSM");

        let body = request.send().await?.error_for_status()?.text().await?;
        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;

        envelope
            .into_result()
            .map_err(|err| SdkError::api(api, method, err))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Full URL of the `entry.cgi` endpoint.
    pub fn entry_url(&self) -> &Url {
        &self.entry_url
    }
}
