//! # Synocert SDK
//!
//! Minimal client for the Synology DSM Web API, limited to what is needed
//! to replace an installed certificate.
//!
//! The SDK provides:
//!
//! * [`DsmClient`] — HTTP transport bound to one NAS; opens sessions.
//! * [`DsmSession`] — an authenticated session: list and import
//!   certificates, then log out exactly once.
//! * [`DsmCredentials`] — account, password and optional 2-step code.
//! * [`DsmQuery`] — canonical query strings for each call.
//! * [`SdkError`] — unified error type for all SDK operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use synocert_sdk::{DsmClient, DsmCredentials};
//!
//! # async fn run() -> Result<(), synocert_sdk::SdkError> {
//! let client = DsmClient::new("https://nas.local:5001", true)?;
//! let session = client.login(&DsmCredentials::new("admin", "secret")).await?;
//!
//! let found = session
//!     .scope(async |session| session.find_certificate("nas.example.com").await)
//!     .await??;
//! println!("installed: {found:?}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod query;
pub mod session;

pub use client::DsmClient;
pub use credentials::DsmCredentials;
pub use error::SdkError;
pub use query::DsmQuery;
pub use session::DsmSession;
