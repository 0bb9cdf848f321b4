//! Replace the SSL certificate installed on a Synology NAS.
//!
//! Meant to run as an ACME client deploy hook: given the renewed private
//! key and full chain, it
//!
//! 1. logs in to the DSM Web API,
//! 2. finds the installed certificate with the same subject CN,
//! 3. uploads the new material over it, keeping its description and
//!    default status,
//! 4. logs out, whatever happened in between.
//!
//! ```text
//! synology-cert-update --base_url https://nas.local:5001 --username admin \
//!     --private_key /etc/letsencrypt/live/nas/privkey.pem \
//!     --fullchain /etc/letsencrypt/live/nas/fullchain.pem
//! ```

mod certificate;
mod error;
mod input;
mod workflow;

use std::process::ExitCode;

use clap::Parser;
use clap::builder::BoolishValueParser;
use synocert_sdk::{DsmClient, DsmCredentials};
use tracing::{error, info};

use crate::certificate::CertificateMaterial;
use crate::error::UpdateError;
use crate::input::PemSource;
use crate::workflow::UpdateReport;

/// Update Synology NAS SSL certificate.
#[derive(Parser, Debug)]
#[command(name = "synology-cert-update")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL for the Synology NAS (e.g. https://nas.local:5001)
    #[arg(long = "base_url")]
    base_url: String,

    /// Username for the Synology NAS
    #[arg(long = "username")]
    username: String,

    /// Password for the Synology NAS; prompted for when absent
    #[arg(long = "password", env = "SYNOLOGY_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// 2-step verification code, for accounts that require one
    #[arg(long = "otp_code")]
    otp_code: Option<String>,

    /// Path to the private key, or the private key as a string
    #[arg(long = "private_key")]
    private_key: PemSource,

    /// Path to the full chain certificate, or the full chain as a string
    #[arg(long = "fullchain")]
    fullchain: PemSource,

    /// Verify the NAS's SSL certificate
    #[arg(
        long = "ssl_verification",
        default_value_t = true,
        action = clap::ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    ssl_verification: bool,
}

impl Args {
    /// Login credentials, prompting for the password if none was given.
    fn credentials(&self) -> Result<DsmCredentials, UpdateError> {
        let password = match &self.password {
            Some(password) => password.clone(),
            None => inquire::Password::new("Password:")
                .without_confirmation()
                .prompt()?,
        };

        let credentials = DsmCredentials::new(&self.username, password);
        Ok(match &self.otp_code {
            Some(code) => credentials.with_otp_code(code),
            None => credentials,
        })
    }
}

async fn run(args: Args) -> Result<UpdateReport, UpdateError> {
    info!(private_key = %args.private_key, fullchain = %args.fullchain, "loading certificate material");
    let material = CertificateMaterial::new(args.private_key.load(), args.fullchain.load())?;
    info!(common_name = %material.common_name, "new certificate parsed");

    let credentials = args.credentials()?;
    let client = DsmClient::new(&args.base_url, args.ssl_verification).map_err(UpdateError::Client)?;

    workflow::replace_certificate(&client, &credentials, &material).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialise structured logging (controlled via RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(report) => {
            info!(
                id = %report.id,
                desc = %report.desc,
                as_default = report.as_default,
                common_name = %report.common_name,
                "certificate updated"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "certificate update failed");
            ExitCode::from(err.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    const INLINE_CERT: &str = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "synology-cert-update",
            "--base_url",
            "https://nas.local:5001",
            "--username",
            "admin",
            "--private_key",
            "/no/such/privkey.pem",
            "--fullchain",
            INLINE_CERT,
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn ssl_verification_defaults_to_true() {
        assert!(parse(&[]).ssl_verification);
    }

    #[test]
    fn ssl_verification_accepts_false() {
        assert!(!parse(&["--ssl_verification", "false"]).ssl_verification);
        assert!(!parse(&["--ssl_verification", "no"]).ssl_verification);
        assert!(parse(&["--ssl_verification", "1"]).ssl_verification);
    }

    #[test]
    fn inputs_are_classified_at_parse_time() {
        let args = parse(&[]);
        assert_eq!(
            args.private_key,
            PemSource::Inline("/no/such/privkey.pem".into())
        );
        assert_eq!(args.fullchain, PemSource::Inline(INLINE_CERT.into()));
    }

    #[test]
    fn explicit_password_skips_prompt() {
        let args = parse(&["--password", "secret", "--otp_code", "123456"]);
        let credentials = args.credentials().unwrap();
        assert_eq!(credentials.username, "admin");
        assert_eq!(credentials.password, "secret");
        assert_eq!(credentials.otp_code.as_deref(), Some("123456"));
    }

    #[test]
    fn missing_required_flag_is_rejected() {
        let result = Args::try_parse_from(["synology-cert-update", "--username", "admin"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unparseable_fullchain_fails_before_any_network_call() {
        let args = Args::try_parse_from([
            "synology-cert-update",
            "--base_url",
            "http://127.0.0.1:9",
            "--username",
            "admin",
            "--password",
            "secret",
            "--private_key",
            "key",
            "--fullchain",
            "not a certificate",
        ])
        .unwrap();

        let err = run(args).await.unwrap_err();
        assert!(matches!(err, UpdateError::Certificate(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
