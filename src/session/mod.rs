//! Session Management
//!
//! The authenticated token/user pair held by the client, plus the durable
//! store that persists it between runs. All session reads and writes go
//! through [`SessionStore`]; nothing else in the crate touches the
//! persisted values.

mod store;

pub use store::{KvStore, SessionStore, TOKEN_KEY, USER_KEY};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user record as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The token/user pair for the current session.
///
/// Invariant: the session is authenticated iff both the token and the
/// user record are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

/// Snapshot of the persisted session returned by
/// [`SessionStore::auth_state`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl AuthState {
    fn from_session(session: Session) -> Self {
        let is_authenticated = session.is_authenticated();
        Self {
            token: session.token,
            user: session.user,
            is_authenticated,
        }
    }
}

/// Errors that can occur while persisting or reading the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session storage: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Failed to encode user record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "1".into(),
            email: "dev@example.com".into(),
            name: Some("Development User".into()),
        }
    }

    #[test]
    fn session_requires_both_token_and_user() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session.token = Some("tok".into());
        assert!(!session.is_authenticated());

        session.user = Some(user());
        assert!(session.is_authenticated());

        session.token = None;
        assert!(!session.is_authenticated());
    }

    #[test]
    fn auth_state_mirrors_session() {
        let state = AuthState::from_session(Session {
            token: Some("tok".into()),
            user: Some(user()),
        });
        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("tok"));
    }

    #[test]
    fn user_name_is_optional_in_json() {
        let parsed: User =
            serde_json::from_str(r#"{"id":"1","email":"dev@example.com"}"#).unwrap();
        assert!(parsed.name.is_none());
    }
}
