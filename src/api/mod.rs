mod handlers;

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::dispatch::DispatchEngine;
use crate::store::{ContactStore, SequenceStore};

/// Shared handles passed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub contacts: ContactStore,
    pub sequences: SequenceStore,
    pub engine: DispatchEngine,
}

impl AppState {
    pub fn new(contacts: ContactStore, sequences: SequenceStore, engine: DispatchEngine) -> Self {
        Self {
            contacts,
            sequences,
            engine,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    with_layers(routes(), state)
}

/// Router that also serves files from `public_dir` for any unmatched path.
pub fn create_router_with_static(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    with_layers(routes().fallback_service(ServeDir::new(public_dir)), state)
}

fn routes() -> Router<AppState> {
    Router::new()
        // Contacts; uploads are not size-capped
        .route(
            "/import-contacts",
            post(handlers::import_contacts).layer(DefaultBodyLimit::disable()),
        )
        .route("/contacts", get(handlers::list_contacts))
        // Sequences
        .route("/sequence", post(handlers::create_sequence))
        .route("/sequences", get(handlers::list_sequences))
        .route("/sequences/{id}", get(handlers::get_sequence))
        // Dispatch
        .route("/send-sequence", post(handlers::send_sequence))
        // Health
        .route("/health", get(handlers::health))
}

fn with_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
