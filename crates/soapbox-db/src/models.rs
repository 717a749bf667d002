/// Database row types — these map directly to SQLite rows.
/// Distinct from the soapbox-types wire models to keep the DB layer
/// independent.

#[derive(Debug, Clone)]
pub struct AccountRow {
    pub account_id: i64,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct MessageRow {
    pub message_id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}
