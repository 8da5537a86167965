//! Runtime configuration loaded from environment variables.
//!
//! - `SENDGRID_API_KEY` - API key for the SendGrid provider
//! - `SENDGRID_EMAIL` - sender identity used as `from` on every message
//! - `SENDGRID_API_URL` - provider base URL (default: `https://api.sendgrid.com`)
//! - `TAGMAIL_PUBLIC_DIR` - directory served for static files (default: `public`)

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::mailer::{DryRunSender, EmailSender, SendGridSender, DEFAULT_SENDGRID_URL};

/// Sender identity used in dry-run mode when `SENDGRID_EMAIL` is unset.
pub const SENTINEL_SENDER: &str = "sender-not-configured@invalid";

const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub sendgrid_api_key: Option<String>,
    pub sender_email: Option<String>,
    pub sendgrid_url: String,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            sendgrid_api_key: get("SENDGRID_API_KEY"),
            sender_email: get("SENDGRID_EMAIL"),
            sendgrid_url: get("SENDGRID_API_URL").unwrap_or_else(|| DEFAULT_SENDGRID_URL.to_string()),
            public_dir: get("TAGMAIL_PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR)),
        }
    }

    /// Pick the email sender and sender identity.
    ///
    /// Live mode requires both the API key and the sender identity. Dry-run
    /// mode never contacts the provider and tolerates a missing identity.
    pub fn mailer(&self, dry_run: bool) -> Result<(Arc<dyn EmailSender>, String), ConfigError> {
        if dry_run {
            let from = match &self.sender_email {
                Some(email) => email.clone(),
                None => {
                    tracing::warn!(
                        "SENDGRID_EMAIL is not set, using placeholder sender {}",
                        SENTINEL_SENDER
                    );
                    SENTINEL_SENDER.to_string()
                }
            };
            return Ok((Arc::new(DryRunSender), from));
        }

        let api_key = self
            .sendgrid_api_key
            .clone()
            .ok_or(ConfigError::MissingEnvVar("SENDGRID_API_KEY"))?;
        let from = self
            .sender_email
            .clone()
            .ok_or(ConfigError::MissingEnvVar("SENDGRID_EMAIL"))?;

        Ok((Arc::new(SendGridSender::new(&self.sendgrid_url, api_key)), from))
    }
}
