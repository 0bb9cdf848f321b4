//! New certificate material and the common name used to find the
//! certificate it replaces.

use x509_parser::pem::parse_x509_pem;

use crate::error::UpdateError;

/// Private key and full chain about to be installed.
pub struct CertificateMaterial {
    /// PEM private key.
    pub private_key: String,
    /// PEM full chain, leaf first.
    pub fullchain: String,
    /// Subject CN of the leaf certificate.
    pub common_name: String,
}

impl CertificateMaterial {
    /// Bundle the inputs, reading the common name from the full chain.
    pub fn new(private_key: String, fullchain: String) -> Result<Self, UpdateError> {
        let common_name = leaf_common_name(&fullchain)?;
        Ok(Self {
            private_key,
            fullchain,
            common_name,
        })
    }
}

/// Subject common name of the first certificate in a PEM bundle.
pub fn leaf_common_name(fullchain: &str) -> Result<String, UpdateError> {
    let (_, pem) = parse_x509_pem(fullchain.as_bytes())
        .map_err(|e| UpdateError::Certificate(format!("no PEM block found: {e}")))?;
    let cert = pem
        .parse_x509()
        .map_err(|e| UpdateError::Certificate(format!("leaf is not an X.509 certificate: {e}")))?;

    let common_name = cert
        .subject()
        .iter_common_name()
        .next()
        .ok_or_else(|| UpdateError::Certificate("leaf certificate has no subject CN".into()))?
        .as_str()
        .map_err(|e| UpdateError::Certificate(format!("unreadable subject CN: {e}")))?;

    Ok(common_name.to_string())
}
