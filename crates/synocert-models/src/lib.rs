#![deny(missing_docs)]

//! # Synocert Models
//!
//! Wire types for the subset of the Synology DSM Web API used to replace
//! an installed certificate.
//!
//! ## Call sequence
//!
//! ```text
//! SYNO.API.Auth              login   → LoginData { sid }
//! SYNO.Core.Certificate.CRT  list    → CertificateList
//! SYNO.Core.Certificate      import  ← CertificateImport (multipart)
//! SYNO.API.Auth              logout
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`api`] | Response envelope (`ApiResponse`), error codes (`ApiError`), `LoginData` |
//! | [`endpoint`] | API names, versions and methods served by `entry.cgi` |
//! | [`certificate`] | Certificate records as listed by the NAS and the import request |

pub mod api;
pub mod certificate;
pub mod endpoint;

// Re-export all public types at crate root for convenience.
pub use api::*;
pub use certificate::*;
pub use endpoint::*;
