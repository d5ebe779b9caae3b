use crate::Database;
use crate::models::{AccountRow, MessageRow};
use anyhow::{Context, Result};
use rusqlite::{Connection, Row};

const MESSAGE_COLUMNS: &str = "message_id, posted_by, message_text, time_posted_epoch";

impl Database {
    // -- Accounts --

    /// Insert an account. Fails on a duplicate username (UNIQUE constraint).
    pub fn create_account(&self, username: &str, password: &str) -> Result<AccountRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account (username, password) VALUES (?1, ?2)",
                (username, password),
            )?;
            Ok(AccountRow {
                account_id: last_insert_id(conn)?,
                username: username.to_string(),
                password: password.to_string(),
            })
        })
    }

    pub fn get_account_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT account_id, username, password FROM account WHERE username = ?1",
                [username],
                |row| {
                    Ok(AccountRow {
                        account_id: row.get(0)?,
                        username: row.get(1)?,
                        password: row.get(2)?,
                    })
                },
            )
            .optional()
        })
    }

    // -- Messages --

    pub fn create_message(
        &self,
        posted_by: i32,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<MessageRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (posted_by, message_text, time_posted_epoch) VALUES (?1, ?2, ?3)",
                rusqlite::params![posted_by, message_text, time_posted_epoch],
            )?;
            Ok(MessageRow {
                message_id: last_insert_id(conn)?,
                posted_by,
                message_text: message_text.to_string(),
                time_posted_epoch,
            })
        })
    }

    pub fn get_message_by_id(&self, message_id: i32) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| query_message(conn, message_id))
    }

    /// All messages in insertion order.
    pub fn get_all_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM message ORDER BY message_id"
            ))?;
            let rows = stmt
                .query_map([], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_messages_by_user(&self, posted_by: i32) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM message WHERE posted_by = ?1 ORDER BY message_id"
            ))?;
            let rows = stmt
                .query_map([posted_by], message_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Replace a message's text. Returns the updated row, or `None` when no
    /// row has that id.
    pub fn update_message_text(
        &self,
        message_id: i32,
        message_text: &str,
    ) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE message SET message_text = ?1 WHERE message_id = ?2",
                rusqlite::params![message_text, message_id],
            )?;
            if updated == 0 {
                return Ok(None);
            }
            query_message(conn, message_id)
        })
    }

    /// Returns true iff a row was removed.
    pub fn delete_message_by_id(&self, message_id: i32) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM message WHERE message_id = ?1", [message_id])?;
            Ok(deleted > 0)
        })
    }
}

fn query_message(conn: &Connection, message_id: i32) -> Result<Option<MessageRow>> {
    conn.query_row(
        &format!("SELECT {MESSAGE_COLUMNS} FROM message WHERE message_id = ?1"),
        [message_id],
        message_from_row,
    )
    .optional()
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}

fn last_insert_id(conn: &Connection) -> Result<i32> {
    let rowid = conn.last_insert_rowid();
    i32::try_from(rowid).with_context(|| format!("generated id {} out of range", rowid))
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn create_account_assigns_id_and_reads_back() {
        let db = db();
        let created = db.create_account("alice", "secret1").unwrap();
        assert!(created.account_id > 0);

        let fetched = db.get_account_by_username("alice").unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn unknown_username_is_absent() {
        let db = db();
        assert!(db.get_account_by_username("nobody").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_is_rejected_by_constraint() {
        let db = db();
        db.create_account("bob", "password").unwrap();
        assert!(db.create_account("bob", "different").is_err());
    }

    #[test]
    fn messages_come_back_in_insertion_order() {
        let db = db();
        let first = db.create_message(1, "first", 100).unwrap();
        let second = db.create_message(2, "second", 200).unwrap();
        let third = db.create_message(1, "third", 300).unwrap();

        let all = db.get_all_messages().unwrap();
        assert_eq!(all, vec![first.clone(), second, third.clone()]);

        let by_user = db.get_messages_by_user(1).unwrap();
        assert_eq!(by_user, vec![first, third]);

        assert!(db.get_messages_by_user(99).unwrap().is_empty());
    }

    #[test]
    fn get_message_by_id_round_trips() {
        let db = db();
        let created = db.create_message(4, "hello", 1669947792).unwrap();
        let fetched = db.get_message_by_id(created.message_id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(db.get_message_by_id(created.message_id + 1).unwrap().is_none());
    }

    #[test]
    fn update_replaces_text_only() {
        let db = db();
        let created = db.create_message(4, "before", 10).unwrap();

        let updated = db
            .update_message_text(created.message_id, "after")
            .unwrap()
            .unwrap();
        assert_eq!(updated.message_text, "after");
        assert_eq!(updated.posted_by, 4);
        assert_eq!(updated.time_posted_epoch, 10);
    }

    #[test]
    fn update_of_missing_row_is_absent_and_inserts_nothing() {
        let db = db();
        assert!(db.update_message_text(42, "text").unwrap().is_none());
        assert!(db.get_all_messages().unwrap().is_empty());
    }

    #[test]
    fn delete_reports_whether_a_row_was_removed() {
        let db = db();
        let created = db.create_message(1, "bye", 0).unwrap();
        assert!(db.delete_message_by_id(created.message_id).unwrap());
        assert!(!db.delete_message_by_id(created.message_id).unwrap());
        assert!(db.get_message_by_id(created.message_id).unwrap().is_none());
    }
}
