use async_trait::async_trait;

use super::{EmailSender, OutboundEmail, SendError};

/// Sender that only logs. Every send succeeds.
#[derive(Debug, Clone, Default)]
pub struct DryRunSender;

#[async_trait]
impl EmailSender for DryRunSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), SendError> {
        tracing::info!(
            to = %email.to,
            from = %email.from,
            subject = %email.subject,
            "Dry run: email not sent"
        );
        Ok(())
    }
}
