pub mod accounts;
pub mod error;
pub mod messages;
pub mod routes;
pub mod service;

use std::sync::Arc;

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::service::SocialService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub service: SocialService,
}

impl AppStateInner {
    pub fn new(db: chatter_db::Database) -> AppState {
        Arc::new(Self {
            service: SocialService::new(db),
        })
    }
}

/// Run a blocking service call off the async runtime.
pub(crate) async fn blocking<F, T>(state: &AppState, f: F) -> Result<T, StatusCode>
where
    F: FnOnce(&SocialService) -> T + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.service))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Decode a JSON request body. The Content-Type header is not required;
/// malformed or missing bodies are plain client errors with no body.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, StatusCode> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Rejecting request body: {}", e);
        StatusCode::BAD_REQUEST
    })
}
