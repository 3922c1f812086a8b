//! # Persisted session
//!
//! The session is the only auth state that survives a reload. It is stored as
//! JSON under a namespaced key (`"<prefix>.session"`) and carries its own
//! expiry, so a stale token is never presented to the backend.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`SessionStore::load`] | Reads the session; absent, malformed and expired entries all read as `None` (the latter two are also removed). |
//! | [`SessionStore::save`] | Writes a session. |
//! | [`SessionStore::clear`] | Removes it on logout or when the backend rejects the token. |

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::kv::{current_timestamp, namespaced, KeyValueStore};
use crate::models::Role;

pub const SESSION_KEY: &str = "session";

/// Errors reading a persisted session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session entry is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("session expired at {expires_at}")]
    Expired { expires_at: i64 },
}

/// Bearer token plus what the guards need to know before `/me` answers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub role: Option<Role>,
    /// Unix timestamp (seconds) after which the session is discarded.
    pub expires_at: i64,
}

impl Session {
    /// A session for `token` that expires `ttl_secs` from now.
    pub fn new(token: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            token: token.into(),
            user_id: None,
            role: None,
            expires_at: current_timestamp().saturating_add(ttl_secs),
        }
    }

    pub fn with_user(mut self, user_id: i64, role: Role) -> Self {
        self.user_id = Some(user_id);
        self.role = Some(role);
        self
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.expires_at
    }

    /// Parses a stored entry, rejecting it if it is expired at `now`.
    pub fn decode(raw: &str, now: i64) -> Result<Self, SessionError> {
        let session: Session = serde_json::from_str(raw)?;
        if session.is_expired_at(now) {
            return Err(SessionError::Expired {
                expires_at: session.expires_at,
            });
        }
        Ok(session)
    }
}

/// Reads and writes the session in a [`KeyValueStore`] under a namespaced key.
#[derive(Clone, Debug)]
pub struct SessionStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S, prefix: &str) -> Self {
        Self {
            storage,
            key: namespaced(prefix, SESSION_KEY),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load(&self) -> Option<Session> {
        self.load_at(current_timestamp())
    }

    pub fn load_at(&self, now: i64) -> Option<Session> {
        let raw = self.storage.get(&self.key)?;
        match Session::decode(&raw, now) {
            Ok(session) => Some(session),
            Err(e) => {
                match e {
                    SessionError::Expired { .. } => debug!("Discarding session: {e}"),
                    SessionError::Malformed(_) => warn!("Discarding session: {e}"),
                }
                self.storage.remove(&self.key);
                None
            }
        }
    }

    pub fn save(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(raw) => self.storage.set(&self.key, &raw),
            Err(e) => warn!("Failed to encode session: {e}"),
        }
    }

    pub fn clear(&self) {
        self.storage.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let sessions = SessionStore::new(storage.clone(), "vm");
        let session = Session::new("tok", 3600).with_user(4, Role::Organization);

        sessions.save(&session);
        assert!(storage.get("vm.session").is_some());
        assert_eq!(sessions.load(), Some(session));

        sessions.clear();
        assert_eq!(sessions.load(), None);
    }

    #[test]
    fn test_expired_session_is_removed() {
        let storage = MemoryStorage::new();
        let sessions = SessionStore::new(storage.clone(), "vm");
        let session = Session {
            token: "tok".to_string(),
            user_id: None,
            role: None,
            expires_at: 100,
        };
        sessions.save(&session);

        assert_eq!(sessions.load_at(99), Some(session));
        assert_eq!(sessions.load_at(100), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_malformed_session_is_removed() {
        let storage = MemoryStorage::with_entries([("vm.session", "true")]);
        let sessions = SessionStore::new(storage.clone(), "vm");
        assert_eq!(sessions.load(), None);
        assert!(storage.get("vm.session").is_none());
    }

    #[test]
    fn test_prefix_isolates_sessions() {
        let storage = MemoryStorage::new();
        SessionStore::new(&storage, "a").save(&Session::new("tok", 60));
        assert_eq!(SessionStore::new(&storage, "b").load(), None);
        assert!(SessionStore::new(&storage, "a").load().is_some());
    }

    #[test]
    fn test_decode_reports_expiry() {
        let raw = r#"{"token":"t","expires_at":10}"#;
        assert!(matches!(
            Session::decode(raw, 11),
            Err(SessionError::Expired { expires_at: 10 })
        ));
        assert!(Session::decode(raw, 5).is_ok());
    }
}
