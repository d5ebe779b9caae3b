use axum::{
    Router,
    routing::{get, post},
};

use crate::{AppState, accounts, messages};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route(
            "/messages",
            post(messages::create_message).get(messages::list_messages),
        )
        .route(
            "/messages/{message_id}",
            get(messages::get_message)
                .delete(messages::delete_message)
                .put(messages::update_message)
                .patch(messages::update_message),
        )
        .route(
            "/accounts/{account_id}/messages",
            get(messages::list_account_messages),
        )
        .with_state(state)
}
