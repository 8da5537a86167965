use std::sync::{Arc, Mutex};

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tagmail::dispatch::DispatchEngine;
use tagmail::mailer::{EmailSender, OutboundEmail, SendError, SendGridSender};
use tagmail::models::*;
use tagmail::store::{ContactStore, SequenceStore};

/// Requests seen by the mock provider: (authorization header, JSON body).
type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

/// Mock SendGrid: accepts everything except messages addressed to `blocked@x.com`.
async fn mail_send(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .map(str::to_string);
    let to = body["personalizations"][0]["to"][0]["email"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    captured.lock().unwrap().push((auth, body));

    if to == "blocked@x.com" {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "errors": [{ "message": "Does not contain a valid address.", "field": "personalizations.0.to" }] })),
        )
    } else {
        (StatusCode::ACCEPTED, Json(Value::Null))
    }
}

async fn start_provider() -> (String, Captured) {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route("/v3/mail/send", post(mail_send))
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock provider");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock provider failed");
    });

    (format!("http://{}", addr), captured)
}

fn email(to: &str) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        from: "team@example.com".to_string(),
        subject: "Welcome".to_string(),
        text: "Hi Ana".to_string(),
    }
}

mod sendgrid {
    use super::*;

    #[tokio::test]
    async fn posts_v3_payload_with_bearer_auth() {
        let (url, captured) = start_provider().await;
        let sender = SendGridSender::new(url, "SG.test-key");

        sender.send(&email("ana@x.com")).await.expect("send failed");

        let captured = captured.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].0.as_deref(), Some("Bearer SG.test-key"));
        assert_eq!(
            captured[0].1,
            json!({
                "personalizations": [{ "to": [{ "email": "ana@x.com" }] }],
                "from": { "email": "team@example.com" },
                "subject": "Welcome",
                "content": [{ "type": "text/plain", "value": "Hi Ana" }]
            })
        );
    }

    #[tokio::test]
    async fn surfaces_provider_error_messages() {
        let (url, _captured) = start_provider().await;
        let sender = SendGridSender::new(url, "SG.test-key");

        let err = sender.send(&email("blocked@x.com")).await.unwrap_err();

        match err {
            SendError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Does not contain a valid address.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_provider_is_an_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let sender = SendGridSender::new(format!("http://{}", addr), "SG.test-key");

        let err = sender.send(&email("ana@x.com")).await.unwrap_err();

        assert!(matches!(err, SendError::Http(_)));
    }
}

mod dispatch_through_provider {
    use super::*;

    #[tokio::test]
    async fn records_rejected_recipients_and_keeps_going() {
        let (url, captured) = start_provider().await;
        let contacts = ContactStore::new();
        let sequences = SequenceStore::new();
        let engine = DispatchEngine::new(
            contacts.clone(),
            sequences.clone(),
            Arc::new(SendGridSender::new(url, "SG.test-key")),
            "team@example.com",
        );

        contacts.append(vec![
            Contact {
                name: "Ana".to_string(),
                email: "ana@x.com".to_string(),
                tags: vec!["vip".to_string()],
            },
            Contact {
                name: "Bob".to_string(),
                email: "blocked@x.com".to_string(),
                tags: vec!["vip".to_string()],
            },
        ]);
        let seq = sequences.create(
            "Welcome".to_string(),
            vec![
                SequenceStep {
                    subject: "One".to_string(),
                    body: "Hi {name}".to_string(),
                },
                SequenceStep {
                    subject: "Two".to_string(),
                    body: "Bye {name}".to_string(),
                },
            ],
        );

        let result = engine.dispatch("vip", &seq.id).await.expect("dispatch failed");

        assert_eq!(result.total, 2);
        assert_eq!(result.sent, 2);
        assert_eq!(
            result.errors,
            vec![
                DispatchFailure {
                    email: "blocked@x.com".to_string(),
                    error: "Provider rejected message (400): Does not contain a valid address.".to_string(),
                };
                2
            ]
        );
        assert_eq!(captured.lock().unwrap().len(), 4);
    }
}
