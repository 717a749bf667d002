use std::sync::Arc;

use thiserror::Error;

use crate::account::AccountService;
use soapbox_db::Database;
use soapbox_db::models::MessageRow;
use soapbox_types::api::{MessagePatch, NewMessage};
use soapbox_types::models::Message;

/// Longest message text accepted, in characters.
pub const MAX_MESSAGE_LEN: usize = 254;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("message text must be between 1 and 254 characters")]
    InvalidMessageText,
    #[error("a message with that id does not exist")]
    InvalidMessageId,
    #[error("no account with id {0} exists")]
    InvalidAuthor(i64),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct MessageService {
    db: Arc<Database>,
    accounts: AccountService,
}

impl MessageService {
    /// The account service is injected so author checks share one adapter.
    pub fn new(db: Arc<Database>, accounts: AccountService) -> Self {
        Self { db, accounts }
    }

    pub fn list_all(&self) -> anyhow::Result<Vec<Message>> {
        Ok(self.db.get_all_messages()?.into_iter().map(message_from_row).collect())
    }

    /// Absence is `None`, not an error.
    pub fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Message>> {
        Ok(self.db.get_message_by_id(id)?.map(message_from_row))
    }

    /// Post a new message. Text is validated before the author check.
    pub fn post(&self, new: NewMessage) -> Result<Message, MessageError> {
        validate_text(&new.message_text)?;
        if !self.accounts.exists_by_id(new.posted_by)? {
            return Err(MessageError::InvalidAuthor(new.posted_by));
        }

        let row = self.db.insert_message(new.posted_by, &new.message_text, new.time_posted_epoch)?;
        Ok(message_from_row(row))
    }

    /// Replace a message's text, leaving every other field untouched.
    /// Text is validated first, so a bad patch against a nonexistent id
    /// still reports `InvalidMessageText`.
    pub fn patch_by_id(&self, id: i64, patch: MessagePatch) -> Result<Message, MessageError> {
        validate_text(&patch.message_text)?;

        self.db
            .update_message_text(id, &patch.message_text)?
            .map(message_from_row)
            .ok_or(MessageError::InvalidMessageId)
    }

    /// Remove a message and return its pre-deletion record. Deleting an id
    /// that does not exist is a no-op returning `None`, not an error.
    pub fn delete_by_id(&self, id: i64) -> anyhow::Result<Option<Message>> {
        Ok(self.db.delete_message(id)?.map(message_from_row))
    }

    pub fn list_by_author(&self, author_id: i64) -> anyhow::Result<Vec<Message>> {
        Ok(self
            .db
            .get_messages_by_account(author_id)?
            .into_iter()
            .map(message_from_row)
            .collect())
    }

    pub fn exists(&self, id: i64) -> anyhow::Result<bool> {
        Ok(self.db.get_message_by_id(id)?.is_some())
    }
}

fn validate_text(text: &str) -> Result<(), MessageError> {
    let len = text.chars().count();
    if len == 0 || len > MAX_MESSAGE_LEN {
        return Err(MessageError::InvalidMessageText);
    }
    Ok(())
}

fn message_from_row(row: MessageRow) -> Message {
    Message {
        id: row.message_id,
        posted_by: row.posted_by,
        message_text: row.message_text,
        time_posted_epoch: row.time_posted_epoch,
    }
}
