use serde::Deserialize;

// Request bodies accept missing or null fields so that the service layer,
// not the JSON decoder, decides what counts as invalid input. Unknown fields
// (e.g. an `account_id` sent by a client that serializes a whole Account)
// are ignored.

// -- Accounts --

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

// -- Messages --

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub posted_by: i32,
    pub message_text: Option<String>,
    #[serde(default)]
    pub time_posted_epoch: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMessageRequest {
    pub message_text: Option<String>,
}
