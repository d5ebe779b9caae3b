use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use chatter_types::api::{LoginRequest, RegisterRequest};

use crate::{AppState, blocking, parse_json};

pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, StatusCode> {
    let req: RegisterRequest = parse_json(&body)?;
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let account = blocking(&state, move |svc| svc.register_account(&username, &password)).await??;

    Ok(Json(account).into_response())
}

pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, StatusCode> {
    let req: LoginRequest = parse_json(&body)?;
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let account = blocking(&state, move |svc| svc.login(&username, &password)).await??;

    Ok(Json(account).into_response())
}
