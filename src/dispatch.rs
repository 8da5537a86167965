//! Sequence dispatch engine.
//!
//! A dispatch resolves a sequence by id, takes the cohort of contacts carrying
//! a tag, and sends every step of the sequence to every contact. Sends are
//! strictly sequential: the next send starts only after the previous one has
//! returned. A failed send is recorded in the result and the run continues.
//! There are no retries.

use std::sync::Arc;

use thiserror::Error;

use crate::mailer::{EmailSender, OutboundEmail};
use crate::models::{Contact, DispatchFailure, DispatchResult, SequenceStep};
use crate::store::{ContactStore, SequenceStore};

/// Placeholder in step bodies replaced with the contact's name.
pub const NAME_PLACEHOLDER: &str = "{name}";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No sequence has the requested id. Raised before any send.
    #[error("Sequência não encontrada")]
    SequenceNotFound(String),
}

#[derive(Clone)]
pub struct DispatchEngine {
    contacts: ContactStore,
    sequences: SequenceStore,
    sender: Arc<dyn EmailSender>,
    from: String,
}

impl DispatchEngine {
    pub fn new(
        contacts: ContactStore,
        sequences: SequenceStore,
        sender: Arc<dyn EmailSender>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            contacts,
            sequences,
            sender,
            from: from.into(),
        }
    }

    /// Sender identity used as `from` on every message.
    pub fn from_address(&self) -> &str {
        &self.from
    }

    /// Send every step of `sequence_id` to every contact tagged `tag`.
    pub async fn dispatch(
        &self,
        tag: &str,
        sequence_id: &str,
    ) -> Result<DispatchResult, DispatchError> {
        let sequence = self
            .sequences
            .find_by_id(sequence_id)
            .ok_or_else(|| DispatchError::SequenceNotFound(sequence_id.to_string()))?;

        let cohort = self.contacts.list_by_tag(Some(tag));
        tracing::info!(
            tag,
            sequence_id,
            contacts = cohort.len(),
            steps = sequence.emails.len(),
            "Dispatching sequence"
        );

        let mut result = DispatchResult {
            total: cohort.len(),
            ..DispatchResult::default()
        };

        for contact in &cohort {
            for step in &sequence.emails {
                let email = self.compose(contact, step);
                match self.sender.send(&email).await {
                    Ok(()) => {
                        tracing::debug!(to = %email.to, subject = %email.subject, "Email sent");
                        result.sent += 1;
                    }
                    Err(e) => {
                        tracing::warn!(to = %email.to, subject = %email.subject, "Email send failed: {}", e);
                        result.errors.push(DispatchFailure {
                            email: contact.email.clone(),
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        tracing::info!(
            tag,
            sequence_id,
            total = result.total,
            sent = result.sent,
            failed = result.errors.len(),
            "Dispatch finished"
        );
        Ok(result)
    }

    fn compose(&self, contact: &Contact, step: &SequenceStep) -> OutboundEmail {
        OutboundEmail {
            to: contact.email.clone(),
            from: self.from.clone(),
            subject: step.subject.clone(),
            text: render_body(&step.body, &contact.name),
        }
    }
}

impl std::fmt::Debug for DispatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchEngine")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

/// Fill the first `{name}` placeholder in `body`. Later placeholders are left as-is.
pub fn render_body(body: &str, name: &str) -> String {
    body.replacen(NAME_PLACEHOLDER, name, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_only_the_first_placeholder() {
        assert_eq!(render_body("Hi {name}, again {name}", "Jo"), "Hi Jo, again {name}");
    }

    #[test]
    fn body_without_placeholder_is_unchanged() {
        assert_eq!(render_body("Hello there", "Jo"), "Hello there");
    }

    #[test]
    fn empty_name_removes_the_placeholder() {
        assert_eq!(render_body("Hi {name}!", ""), "Hi !");
    }

    #[test]
    fn not_found_message_is_user_facing() {
        let err = DispatchError::SequenceNotFound("42".to_string());
        assert_eq!(err.to_string(), "Sequência não encontrada");
    }
}
