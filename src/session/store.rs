//! Durable Session Store
//!
//! Persists the session as two keyed string values, one file per key,
//! under the configured session directory. This is the native analog of
//! the key-value storage the hosted platform's web client uses, so the
//! keys keep their original names.

use super::{AuthState, Session, SessionError, User};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage key for the session token.
pub const TOKEN_KEY: &str = "pm_buddy_auth_token";
/// Storage key for the serialized user record.
pub const USER_KEY: &str = "pm_buddy_user";

/// Minimal durable key-value store: one file per key.
#[derive(Debug)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Read the value for `key`, or `None` if it was never set.
    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    /// Write the value for `key`.
    pub fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        fs::write(self.dir.join(key), value)?;
        Ok(())
    }

    /// Remove `key`. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.dir.join(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The single boundary through which the session is read and written.
///
/// Holds the key-value store behind a lock so concurrent tasks sharing a
/// client observe session updates atomically.
#[derive(Debug)]
pub struct SessionStore {
    kv: RwLock<KvStore>,
}

impl SessionStore {
    /// Open the session store under `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SessionError> {
        Ok(Self {
            kv: RwLock::new(KvStore::open(dir.as_ref().to_path_buf())?),
        })
    }

    /// Persist a new session after a successful login or registration.
    pub fn set_auth(&self, token: &str, user: &User) -> Result<(), SessionError> {
        let kv = self.kv.write().unwrap_or_else(|e| e.into_inner());
        kv.set(TOKEN_KEY, token)?;
        kv.set(USER_KEY, &serde_json::to_string(user)?)?;
        tracing::debug!(user_id = %user.id, "Session stored");
        Ok(())
    }

    /// Destroy the persisted session (logout).
    pub fn clear_auth(&self) -> Result<(), SessionError> {
        let kv = self.kv.write().unwrap_or_else(|e| e.into_inner());
        kv.remove(TOKEN_KEY)?;
        kv.remove(USER_KEY)?;
        tracing::debug!("Session cleared");
        Ok(())
    }

    /// Read the current session state.
    ///
    /// A malformed persisted user record clears the store and yields an
    /// unauthenticated state rather than an error.
    pub fn auth_state(&self) -> AuthState {
        let kv = self.kv.write().unwrap_or_else(|e| e.into_inner());
        let token = kv.get(TOKEN_KEY);
        let user = match kv.get(USER_KEY) {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Malformed persisted user record, clearing session");
                    if let Err(e) = kv.remove(TOKEN_KEY).and_then(|()| kv.remove(USER_KEY)) {
                        tracing::warn!(error = %e, "Failed to clear session storage");
                    }
                    return AuthState::default();
                }
            },
            None => None,
        };

        AuthState::from_session(Session { token, user })
    }

    /// Authorization header value for the current session, if any.
    pub fn auth_header(&self) -> Option<String> {
        self.auth_state().token.map(|token| format!("Bearer {token}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn user() -> User {
        User {
            id: "42".into(),
            email: "pm@example.com".into(),
            name: None,
        }
    }

    #[test]
    fn stored_session_is_authenticated() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        store.set_auth("tok-123", &user()).unwrap();

        let state = store.auth_state();
        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("tok-123"));
        assert_eq!(state.user.unwrap().id, "42");
    }

    #[test]
    fn missing_token_is_unauthenticated() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        let kv = KvStore::open(dir.path()).unwrap();
        kv.set(USER_KEY, &serde_json::to_string(&user()).unwrap())
            .unwrap();

        assert!(!store.auth_state().is_authenticated);
    }

    #[test]
    fn clear_auth_yields_empty_state() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        store.set_auth("tok", &user()).unwrap();
        store.clear_auth().unwrap();

        let state = store.auth_state();
        assert_eq!(state.token, None);
        assert_eq!(state.user, None);
        assert!(!state.is_authenticated);
    }

    #[test]
    fn malformed_user_record_clears_storage() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        store.set_auth("tok", &user()).unwrap();

        // Corrupt the persisted record out from under the store.
        let kv = KvStore::open(dir.path()).unwrap();
        kv.set(USER_KEY, "{not valid json").unwrap();

        let state = store.auth_state();
        assert!(!state.is_authenticated);
        assert_eq!(state.token, None);

        // Both keys are gone, not just the bad one.
        assert_eq!(kv.get(TOKEN_KEY), None);
        assert_eq!(kv.get(USER_KEY), None);
    }

    #[test]
    fn auth_header_uses_bearer_scheme() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        assert_eq!(store.auth_header(), None);

        store.set_auth("tok-abc", &user()).unwrap();
        assert_eq!(store.auth_header().as_deref(), Some("Bearer tok-abc"));
    }

    #[test]
    fn session_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = SessionStore::open(dir.path()).unwrap();
            store.set_auth("tok", &user()).unwrap();
        }

        let store = SessionStore::open(dir.path()).unwrap();
        assert!(store.auth_state().is_authenticated);
    }
}
