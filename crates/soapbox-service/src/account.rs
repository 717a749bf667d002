use std::sync::Arc;

use thiserror::Error;

use soapbox_db::Database;
use soapbox_db::models::AccountRow;
use soapbox_types::api::Credentials;
use soapbox_types::models::Account;

pub const MIN_PASSWORD_LEN: usize = 4;

/// Expected registration/login outcomes. These are business results, not
/// exceptional conditions; only `Storage` indicates something actually broke.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username must not be blank")]
    InvalidUsername,
    #[error("password must be at least 4 characters long")]
    InvalidPassword,
    #[error("a user with that username already exists")]
    UserAlreadyExists,
    #[error("no account matches that username and password")]
    InvalidLogin,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct AccountService {
    db: Arc<Database>,
}

impl AccountService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Register a new account. Checks run in order — username, password,
    /// uniqueness — and the first failure wins with no side effects.
    pub fn register(&self, credentials: Credentials) -> Result<Account, AccountError> {
        if credentials.username.is_empty() {
            return Err(AccountError::InvalidUsername);
        }
        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountError::InvalidPassword);
        }
        if self.exists_by_username(&credentials.username)? {
            return Err(AccountError::UserAlreadyExists);
        }

        match self.db.create_account(&credentials.username, &credentials.password) {
            Ok(row) => Ok(account_from_row(row)),
            // Two registrations can race past the existence check; the
            // UNIQUE constraint on username decides the winner.
            Err(e) if soapbox_db::is_unique_violation(&e) => Err(AccountError::UserAlreadyExists),
            Err(e) => Err(AccountError::Storage(e)),
        }
    }

    /// Exact username/password match against the store. Returns the stored
    /// account, not the submitted credentials. Comparison is plaintext for
    /// parity with the system this replaces.
    pub fn login(&self, credentials: Credentials) -> Result<Account, AccountError> {
        self.db
            .get_account_by_credentials(&credentials.username, &credentials.password)?
            .map(account_from_row)
            .ok_or(AccountError::InvalidLogin)
    }

    /// Used by the message service to verify authors.
    pub fn exists_by_id(&self, id: i64) -> anyhow::Result<bool> {
        Ok(self.db.get_account_by_id(id)?.is_some())
    }

    pub fn exists_by_username(&self, username: &str) -> anyhow::Result<bool> {
        Ok(self.db.get_account_by_username(username)?.is_some())
    }
}

fn account_from_row(row: AccountRow) -> Account {
    Account {
        id: row.account_id,
        username: row.username,
        password: row.password,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AccountService {
        AccountService::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn register_rejects_blank_username() {
        let accounts = service();
        // Username is checked before the password, so even a good password
        // does not get that far.
        let err = accounts.register(creds("", "password")).unwrap_err();
        assert!(matches!(err, AccountError::InvalidUsername));
    }

    #[test]
    fn register_rejects_short_passwords() {
        let accounts = service();
        for password in ["", "a", "ab", "abc"] {
            let err = accounts.register(creds("bob", password)).unwrap_err();
            assert!(matches!(err, AccountError::InvalidPassword), "password {password:?}");
        }
    }

    #[test]
    fn register_accepts_minimum_password() {
        let accounts = service();
        let account = accounts.register(creds("bob", "pass")).unwrap();
        assert!(account.id > 0);
        assert_eq!(account.username, "bob");
    }

    #[test]
    fn register_rejects_taken_username() {
        let accounts = service();
        accounts.register(creds("bob", "pass1")).unwrap();
        let err = accounts.register(creds("bob", "other-pass")).unwrap_err();
        assert!(matches!(err, AccountError::UserAlreadyExists));
    }

    #[test]
    fn login_returns_stored_account() {
        let accounts = service();
        let registered = accounts.register(creds("bob", "pass1")).unwrap();
        let logged_in = accounts.login(creds("bob", "pass1")).unwrap();
        assert_eq!(logged_in, registered);
    }

    #[test]
    fn login_rejects_any_mismatch() {
        let accounts = service();
        accounts.register(creds("bob", "pass1")).unwrap();
        for (username, password) in [("bob", "wrong"), ("alice", "pass1"), ("", "")] {
            let err = accounts.login(creds(username, password)).unwrap_err();
            assert!(matches!(err, AccountError::InvalidLogin), "{username:?}/{password:?}");
        }
    }

    #[test]
    fn existence_checks() {
        let accounts = service();
        let bob = accounts.register(creds("bob", "pass1")).unwrap();
        assert!(accounts.exists_by_id(bob.id).unwrap());
        assert!(!accounts.exists_by_id(bob.id + 1).unwrap());
        assert!(accounts.exists_by_username("bob").unwrap());
        assert!(!accounts.exists_by_username("alice").unwrap());
    }
}
