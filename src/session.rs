//! Session
//!
//! At most one logged-in account per running instance. Held in memory only;
//! a restart requires logging in again.

use crate::storage::{Account, Store};
use thiserror::Error;
use uuid::Uuid;

/// Login failure. Deliberately does not say which check failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Access denied. Please check credentials.")]
    AccessDenied,
}

/// The currently authenticated account, if any
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<Account>,
    token: Option<Uuid>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log in as the verified account matching `email` and `password`
    pub fn login(&mut self, store: &Store, email: &str, password: &str) -> Result<&Account, AuthError> {
        let Some(account) = store.authenticate(email, password) else {
            tracing::warn!("Login denied for {}", email);
            return Err(AuthError::AccessDenied);
        };

        let token = Uuid::new_v4();
        tracing::info!(session = %token, "Logged in as {} ({})", account.email, account.role);
        self.token = Some(token);
        Ok(self.current.insert(account.clone()))
    }

    pub fn logout(&mut self) {
        if let (Some(account), Some(token)) = (&self.current, self.token) {
            tracing::info!(session = %token, "Logged out {}", account.email);
        }
        self.current = None;
        self.token = None;
    }

    pub fn current(&self) -> Option<&Account> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().map(Account::is_admin).unwrap_or(false)
    }

    /// Per-login token, used to correlate log lines
    pub fn token(&self) -> Option<Uuid> {
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryBackend, Role, DEFAULT_STORAGE_KEY};

    fn create_test_store() -> Store {
        let mut store = Store::load(MemoryBackend::new(), DEFAULT_STORAGE_KEY).unwrap();
        store
            .add_account(Account::new("Bob", "Builder", "bob@x.com", "hunter2").verified(true))
            .unwrap();
        store
            .add_account(Account::new("Una", "Verified", "una@x.com", "pw"))
            .unwrap();
        store
    }

    #[test]
    fn test_admin_login() {
        let store = create_test_store();
        let mut session = Session::new();

        let account = session
            .login(&store, "admin@example.com", "Password123!")
            .unwrap();
        assert_eq!(account.role, Role::Admin);
        assert!(session.is_admin());
        assert!(session.token().is_some());
    }

    #[test]
    fn test_failed_logins_leave_session_empty() {
        let store = create_test_store();
        let mut session = Session::new();

        for (email, password) in [
            ("admin@example.com", "wrong"),
            ("nobody@x.com", "Password123!"),
            ("una@x.com", "pw"),
        ] {
            let err = session.login(&store, email, password).unwrap_err();
            assert_eq!(err, AuthError::AccessDenied);
            assert!(session.current().is_none());
        }
    }

    #[test]
    fn test_failed_login_keeps_previous_session() {
        let store = create_test_store();
        let mut session = Session::new();
        session.login(&store, "bob@x.com", "hunter2").unwrap();

        assert!(session.login(&store, "bob@x.com", "nope").is_err());
        assert_eq!(session.current().unwrap().email, "bob@x.com");
    }

    #[test]
    fn test_logout() {
        let store = create_test_store();
        let mut session = Session::new();
        session.login(&store, "bob@x.com", "hunter2").unwrap();
        assert!(!session.is_admin());

        session.logout();
        assert!(!session.is_logged_in());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_access_denied_message_is_generic() {
        assert_eq!(
            AuthError::AccessDenied.to_string(),
            "Access denied. Please check credentials."
        );
    }
}
