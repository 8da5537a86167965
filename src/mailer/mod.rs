//! Outbound email delivery.
//!
//! The dispatch engine only knows the [`EmailSender`] trait. Two
//! implementations ship with the crate:
//! - [`SendGridSender`] talks to the SendGrid v3 mail API over HTTP.
//! - [`DryRunSender`] logs each message and reports success.

mod dry_run;
mod sendgrid;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dry_run::DryRunSender;
pub use sendgrid::{SendGridSender, DEFAULT_SENDGRID_URL};

/// A fully rendered plain-text message ready for the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
}

/// Why a provider refused or failed to deliver a message.
///
/// The display string is recorded verbatim in dispatch results.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider rejected message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Deliver one message. Callers await each send before issuing the next.
    async fn send(&self, email: &OutboundEmail) -> Result<(), SendError>;
}
