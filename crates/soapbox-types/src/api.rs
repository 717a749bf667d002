use serde::Deserialize;

// -- Accounts --

/// Body for both `POST /register` and `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// -- Messages --

#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub posted_by: i64,
    pub message_text: String,
    /// Client-supplied post time. Echoed back on the persisted record.
    #[serde(default)]
    pub time_posted_epoch: i64,
}

/// Body for `PATCH /messages/{id}`. Clients may send a full message object;
/// everything except `message_text` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePatch {
    pub message_text: String,
}
