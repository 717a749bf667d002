//! The decision core: account and message validation and orchestration.
//! Handlers above are thin status-code mapping; soapbox-db below is thin SQL.

pub mod account;
pub mod message;

pub use account::{AccountError, AccountService};
pub use message::{MessageError, MessageService};
