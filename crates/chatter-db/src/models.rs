//! Database row types. These map directly to SQLite rows and convert into
//! the chatter-types models at the crate boundary.

use chatter_types::models::{Account, Message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub account_id: i32,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub message_id: i32,
    pub posted_by: i32,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            account_id: row.account_id,
            username: row.username,
            password: row.password,
        }
    }
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            message_id: row.message_id,
            posted_by: row.posted_by,
            message_text: row.message_text,
            time_posted_epoch: row.time_posted_epoch,
        }
    }
}
