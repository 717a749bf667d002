use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS account (
            account_id  INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE,
            password    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS message (
            message_id          INTEGER PRIMARY KEY AUTOINCREMENT,
            posted_by           INTEGER NOT NULL REFERENCES account(account_id),
            message_text        TEXT NOT NULL,
            time_posted_epoch   INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_message_posted_by
            ON message(posted_by);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
