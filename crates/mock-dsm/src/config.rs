//! Mock DSM configuration.
//!
//! Read once from environment variables at startup.

/// Settings of the mock NAS.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Port to listen on (default `5001`).
    pub listen_port: u16,
    /// Password accepted for any account (default `synology`).
    pub password: String,
    /// Common name of the seeded certificate (default `nas.example.com`).
    pub common_name: String,
}

impl MockConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable            | Default           | Description                          |
    /// |---------------------|-------------------|--------------------------------------|
    /// | `MOCK_DSM_PORT`     | `5001`            | HTTP listen port                     |
    /// | `MOCK_DSM_PASSWORD` | `synology`        | Password accepted at login           |
    /// | `MOCK_DSM_CN`       | `nas.example.com` | CN of the seeded default certificate |
    pub fn from_env() -> Self {
        let listen_port: u16 = std::env::var("MOCK_DSM_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5001);

        let password =
            std::env::var("MOCK_DSM_PASSWORD").unwrap_or_else(|_| "synology".to_string());
        let common_name =
            std::env::var("MOCK_DSM_CN").unwrap_or_else(|_| "nas.example.com".to_string());

        Self {
            listen_port,
            password,
            common_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listen_port() {
        let cfg = MockConfig::from_env();
        assert_eq!(cfg.listen_port, 5001);
    }

    #[test]
    fn default_common_name() {
        let cfg = MockConfig::from_env();
        assert_eq!(cfg.common_name, "nas.example.com");
    }
}
