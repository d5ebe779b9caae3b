use serde::{Deserialize, Serialize};

/// A registered account. The password is stored and returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i32,
    pub username: String,
    pub password: String,
}

/// A short text post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i32,
    /// Account id of the author. Not checked against the account table.
    pub posted_by: i32,
    pub message_text: String,
    /// Client-supplied epoch timestamp.
    pub time_posted_epoch: i64,
}
