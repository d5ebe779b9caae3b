use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use chatter_types::api::{CreateMessageRequest, UpdateMessageRequest};

use crate::{AppState, blocking, parse_json};

// Not-found handling differs per endpoint: GET and DELETE answer 200 with an
// empty body, PUT/PATCH answer 400. Existing clients depend on both.

pub async fn create_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, StatusCode> {
    let req: CreateMessageRequest = parse_json(&body)?;
    let text = req.message_text.unwrap_or_default();

    let message = blocking(&state, move |svc| {
        svc.post_message(req.posted_by, &text, req.time_posted_epoch)
    })
    .await??;

    Ok(Json(message).into_response())
}

pub async fn get_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<Response, StatusCode> {
    let message_id = parse_id(&message_id)?;

    let message = blocking(&state, move |svc| svc.retrieve_message(message_id)).await??;

    Ok(found_or_empty(message))
}

pub async fn list_messages(State(state): State<AppState>) -> Result<Response, StatusCode> {
    let messages = blocking(&state, |svc| svc.retrieve_all_messages()).await??;
    Ok(Json(messages).into_response())
}

pub async fn list_account_messages(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Result<Response, StatusCode> {
    let account_id = parse_id(&account_id)?;

    let messages =
        blocking(&state, move |svc| svc.retrieve_messages_by_user(account_id)).await??;

    Ok(Json(messages).into_response())
}

pub async fn delete_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
) -> Result<Response, StatusCode> {
    let message_id = parse_id(&message_id)?;

    let message = blocking(&state, move |svc| svc.remove_message(message_id)).await??;

    Ok(found_or_empty(message))
}

/// Serves both PUT and PATCH.
pub async fn update_message(
    State(state): State<AppState>,
    Path(message_id): Path<String>,
    body: Bytes,
) -> Result<Response, StatusCode> {
    let message_id = parse_id(&message_id)?;
    let req: UpdateMessageRequest = parse_json(&body)?;
    let text = req.message_text.unwrap_or_default();

    let message = blocking(&state, move |svc| svc.edit_message(message_id, &text))
        .await??
        .ok_or(StatusCode::BAD_REQUEST)?;

    Ok(Json(message).into_response())
}

fn parse_id(raw: &str) -> Result<i32, StatusCode> {
    raw.parse().map_err(|_| {
        debug!("Rejecting non-integer id {:?}", raw);
        StatusCode::BAD_REQUEST
    })
}

fn found_or_empty<T: serde::Serialize>(value: Option<T>) -> Response {
    match value {
        Some(v) => Json(v).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_signed_integers_only() {
        assert_eq!(parse_id("12"), Ok(12));
        assert_eq!(parse_id("-3"), Ok(-3));
        assert_eq!(parse_id("abc"), Err(StatusCode::BAD_REQUEST));
        assert_eq!(parse_id("1.5"), Err(StatusCode::BAD_REQUEST));
        assert_eq!(parse_id(""), Err(StatusCode::BAD_REQUEST));
        assert_eq!(parse_id("99999999999"), Err(StatusCode::BAD_REQUEST));
    }
}
