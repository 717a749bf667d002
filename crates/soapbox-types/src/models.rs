use serde::{Deserialize, Serialize};

/// A registered user identity. The id is assigned by the store on insert.
///
/// The password is stored and served verbatim. That mirrors the system this
/// replaces and is a known weakness, not an invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "account_id")]
    pub id: i64,
    pub username: String,
    pub password: String,
}

/// A text post authored by an account. Only `message_text` is ever mutated
/// after creation; the id and author are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "message_id")]
    pub id: i64,
    pub posted_by: i64,
    pub message_text: String,
    pub time_posted_epoch: i64,
}
