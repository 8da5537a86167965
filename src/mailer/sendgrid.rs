//! SendGrid v3 client.
//!
//! See <https://docs.sendgrid.com/api-reference/mail-send/mail-send>.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{EmailSender, OutboundEmail, SendError};

/// Production API host.
pub const DEFAULT_SENDGRID_URL: &str = "https://api.sendgrid.com";

#[derive(Debug, Clone)]
pub struct SendGridSender {
    base_url: String,
    api_key: String,
    client: Client,
}

impl SendGridSender {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl EmailSender for SendGridSender {
    async fn send(&self, email: &OutboundEmail) -> Result<(), SendError> {
        let url = format!("{}/v3/mail/send", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&MailSendRequest::from(email))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(SendError::Rejected {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Collapse a SendGrid error body into one line.
///
/// SendGrid answers with `{"errors":[{"message":...}]}`; anything else is
/// passed through as-is.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.trim().to_string(),
    }
}

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

impl<'a> From<&'a OutboundEmail> for MailSendRequest<'a> {
    fn from(email: &'a OutboundEmail) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address { email: &email.to }],
            }],
            from: Address { email: &email.from },
            subject: &email.subject,
            content: [Content {
                kind: "text/plain",
                value: &email.text,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_payload_matches_v3_shape() {
        let email = OutboundEmail {
            to: "ana@example.com".to_string(),
            from: "team@example.com".to_string(),
            subject: "Welcome".to_string(),
            text: "Hi Ana".to_string(),
        };

        let json = serde_json::to_value(MailSendRequest::from(&email)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "personalizations": [{ "to": [{ "email": "ana@example.com" }] }],
                "from": { "email": "team@example.com" },
                "subject": "Welcome",
                "content": [{ "type": "text/plain", "value": "Hi Ana" }]
            })
        );
    }

    #[test]
    fn error_message_joins_provider_errors() {
        let body = r#"{"errors":[{"message":"bad from"},{"message":"bad to"}]}"#;
        assert_eq!(error_message(body), "bad from; bad to");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message(" upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let sender = SendGridSender::new("http://localhost:9000/", "key");
        assert_eq!(sender.base_url, "http://localhost:9000");
    }
}
