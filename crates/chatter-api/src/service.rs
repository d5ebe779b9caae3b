//! Account and message rules. Sits between the HTTP handlers and
//! [`chatter_db::Database`]; everything here is synchronous and runs on the
//! blocking pool.

use chatter_db::Database;
use chatter_types::models::{Account, Message};
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};

pub const MAX_MESSAGE_CHARS: usize = 255;
pub const MIN_PASSWORD_CHARS: usize = 5;

pub struct SocialService {
    db: Database,
}

impl SocialService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    // -- Accounts --

    /// The uniqueness check and the insert are separate round trips; a
    /// concurrent duplicate loses at the UNIQUE constraint instead.
    pub fn register_account(&self, username: &str, password: &str) -> ServiceResult<Account> {
        if username.trim().is_empty() {
            return Err(ServiceError::InvalidUsername);
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ServiceError::InvalidPassword);
        }
        if self.db.get_account_by_username(username)?.is_some() {
            return Err(ServiceError::UsernameTaken);
        }

        let row = self
            .db
            .create_account(username, password)
            .map_err(ServiceError::CreateFailed)?;
        info!("Registered account {} ({})", row.account_id, row.username);
        Ok(row.into())
    }

    /// Exact, case-sensitive comparison against the stored password.
    pub fn login(&self, username: &str, password: &str) -> ServiceResult<Account> {
        match self.db.get_account_by_username(username)? {
            Some(row) if row.password == password => Ok(row.into()),
            _ => Err(ServiceError::InvalidCredentials),
        }
    }

    // -- Messages --

    pub fn post_message(
        &self,
        posted_by: i32,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> ServiceResult<Message> {
        validate_message_text(message_text)?;

        let row = self
            .db
            .create_message(posted_by, message_text, time_posted_epoch)
            .map_err(ServiceError::CreateFailed)?;
        debug!("Message {} posted by {}", row.message_id, row.posted_by);
        Ok(row.into())
    }

    pub fn retrieve_message(&self, message_id: i32) -> ServiceResult<Option<Message>> {
        Ok(self.db.get_message_by_id(message_id)?.map(Into::into))
    }

    pub fn retrieve_all_messages(&self) -> ServiceResult<Vec<Message>> {
        Ok(self.db.get_all_messages()?.into_iter().map(Into::into).collect())
    }

    pub fn retrieve_messages_by_user(&self, account_id: i32) -> ServiceResult<Vec<Message>> {
        Ok(self
            .db
            .get_messages_by_user(account_id)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Returns the message as it was before deletion, or `None` if it did
    /// not exist or another request deleted it first.
    pub fn remove_message(&self, message_id: i32) -> ServiceResult<Option<Message>> {
        let Some(row) = self.db.get_message_by_id(message_id)? else {
            return Ok(None);
        };
        if !self.db.delete_message_by_id(message_id)? {
            return Ok(None);
        }
        debug!("Message {} deleted", message_id);
        Ok(Some(row.into()))
    }

    /// Replace the text of an existing message. `None` means no message has
    /// that id; nothing is written in that case.
    pub fn edit_message(&self, message_id: i32, new_text: &str) -> ServiceResult<Option<Message>> {
        validate_message_text(new_text)?;

        if self.db.get_message_by_id(message_id)?.is_none() {
            return Ok(None);
        }
        Ok(self
            .db
            .update_message_text(message_id, new_text)?
            .map(Into::into))
    }
}

/// Length is counted in characters, not bytes.
pub fn validate_message_text(text: &str) -> ServiceResult<()> {
    if text.trim().is_empty() {
        return Err(ServiceError::BlankMessage);
    }
    if text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ServiceError::MessageTooLong(MAX_MESSAGE_CHARS));
    }
    Ok(())
}
