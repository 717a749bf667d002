use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

use crate::Database;
use crate::models::{AccountRow, MessageRow};

impl Database {
    // -- Accounts --

    pub fn create_account(&self, username: &str, password: &str) -> Result<AccountRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account (username, password) VALUES (?1, ?2)",
                params![username, password],
            )?;
            Ok(AccountRow {
                account_id: conn.last_insert_rowid(),
                username: username.to_string(),
                password: password.to_string(),
            })
        })
    }

    pub fn get_account_by_id(&self, id: i64) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_account(conn, "SELECT account_id, username, password FROM account WHERE account_id = ?1", params![id])
        })
    }

    pub fn get_account_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_account(conn, "SELECT account_id, username, password FROM account WHERE username = ?1", params![username])
        })
    }

    /// Exact username/password match. Plaintext comparison is intentional;
    /// see the login notes in DESIGN.md.
    pub fn get_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_account(
                conn,
                "SELECT account_id, username, password FROM account WHERE username = ?1 AND password = ?2",
                params![username, password],
            )
        })
    }

    // -- Messages --

    pub fn insert_message(
        &self,
        posted_by: i64,
        message_text: &str,
        time_posted_epoch: i64,
    ) -> Result<MessageRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (posted_by, message_text, time_posted_epoch) VALUES (?1, ?2, ?3)",
                params![posted_by, message_text, time_posted_epoch],
            )?;
            Ok(MessageRow {
                message_id: conn.last_insert_rowid(),
                posted_by,
                message_text: message_text.to_string(),
                time_posted_epoch,
            })
        })
    }

    pub fn get_message_by_id(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| query_message(conn, id))
    }

    pub fn get_all_messages(&self) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                "SELECT message_id, posted_by, message_text, time_posted_epoch
                 FROM message ORDER BY message_id",
                params![],
            )
        })
    }

    pub fn get_messages_by_account(&self, account_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            query_messages(
                conn,
                "SELECT message_id, posted_by, message_text, time_posted_epoch
                 FROM message WHERE posted_by = ?1 ORDER BY message_id",
                params![account_id],
            )
        })
    }

    /// Update a message's text and return the full updated row, or `None`
    /// if no message has that id. Update and re-read happen under the same
    /// connection lock.
    pub fn update_message_text(&self, id: i64, message_text: &str) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE message SET message_text = ?1 WHERE message_id = ?2",
                params![message_text, id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            query_message(conn, id)
        })
    }

    /// Delete a message and return the pre-deletion row, or `None` if no
    /// message has that id.
    pub fn delete_message(&self, id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let Some(row) = query_message(conn, id)? else {
                return Ok(None);
            };
            conn.execute("DELETE FROM message WHERE message_id = ?1", params![id])?;
            Ok(Some(row))
        })
    }
}

fn query_account(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Option<AccountRow>> {
    let mut stmt = conn.prepare(sql)?;

    let row = stmt
        .query_row(params, |row| {
            Ok(AccountRow {
                account_id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_message(conn: &Connection, id: i64) -> Result<Option<MessageRow>> {
    let mut stmt = conn.prepare(
        "SELECT message_id, posted_by, message_text, time_posted_epoch
         FROM message WHERE message_id = ?1",
    )?;

    let row = stmt
        .query_row(params![id], map_message_row)
        .optional()?;

    Ok(row)
}

fn query_messages(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<MessageRow>> {
    let mut stmt = conn.prepare(sql)?;

    let rows = stmt
        .query_map(params, map_message_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn map_message_row(row: &rusqlite::Row<'_>) -> std::result::Result<MessageRow, rusqlite::Error> {
    Ok(MessageRow {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
        time_posted_epoch: row.get(3)?,
    })
}
