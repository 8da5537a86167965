use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::AppState;
use crate::dispatch::DispatchError;
use crate::import::{self, ImportError};
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// JSON error response: `{ "error": "<message>" }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: &self.message })).into_response()
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        tracing::warn!("Upload rejected: {}", e);
        Self::new(e.status(), e.body_text())
    }
}

impl From<DispatchError> for ApiError {
    fn from(e: DispatchError) -> Self {
        tracing::warn!("Dispatch rejected: {:?}", e);
        Self::bad_request(e.to_string())
    }
}

impl From<ImportError> for ApiError {
    fn from(e: ImportError) -> Self {
        tracing::warn!("Import rejected: {}", e);
        Self::bad_request(e.to_string())
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Contacts
// ============================================================

/// Import contacts from the CSV file in the `file` multipart field.
pub async fn import_contacts(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            upload = Some(field.bytes().await?);
            break;
        }
    }

    let upload = upload.ok_or_else(|| ApiError::bad_request("Missing file field"))?;
    let contacts = import::parse_contacts(&upload[..])?;
    let imported = contacts.len();
    state.contacts.append(contacts);

    tracing::info!(imported, "Imported contacts");
    Ok(Json(ImportSummary {
        success: true,
        imported,
    }))
}

pub async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ListContactsQuery>,
) -> Json<Vec<Contact>> {
    // `?tag=` lists everything, same as omitting it
    let tag = query.tag.as_deref().filter(|t| !t.is_empty());
    Json(state.contacts.list_by_tag(tag))
}

// ============================================================
// Sequences
// ============================================================

pub async fn create_sequence(
    State(state): State<AppState>,
    Json(input): Json<CreateSequenceInput>,
) -> Json<CreateSequenceResponse> {
    let sequence = state.sequences.create(input.name, input.emails);
    tracing::info!(id = %sequence.id, steps = sequence.emails.len(), "Created sequence");
    Json(CreateSequenceResponse {
        success: true,
        sequence,
    })
}

pub async fn list_sequences(State(state): State<AppState>) -> Json<Vec<Sequence>> {
    Json(state.sequences.list())
}

pub async fn get_sequence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Sequence>, ApiError> {
    state
        .sequences
        .find_by_id(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(DispatchError::SequenceNotFound(id).to_string()))
}

// ============================================================
// Dispatch
// ============================================================

pub async fn send_sequence(
    State(state): State<AppState>,
    Json(input): Json<DispatchInput>,
) -> Result<Json<DispatchResult>, ApiError> {
    let result = state
        .engine
        .dispatch(&input.tag, &input.sequence_id)
        .await?;
    Ok(Json(result))
}
