// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Server-side session store.
//!
//! Sessions are keyed by an opaque uuid and hold the serialized principal.
//! A session that cannot be read back (expired, corrupt, unknown id) is
//! indistinguishable from no session: `resolve` returns `None` and the
//! caller lands on the sign-in flow, never on an error page.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use uuid::Uuid;

use portal_core::Principal;

/// An opaque session identifier.
pub type SessionId = String;

// =============================================================================
// SessionStore
// =============================================================================

/// In-process session store with TTL expiry.
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<SessionId, StoredSession>>,
}

#[derive(Debug, Clone)]
struct StoredSession {
    payload: String,
    expires_at: Instant,
}

impl SessionStore {
    /// Creates a store whose sessions expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a session for `principal` and returns its id.
    pub fn create(&self, principal: &Principal) -> SessionId {
        let id = Uuid::now_v7().to_string();
        let payload = serde_json::to_string(principal).unwrap_or_default();
        self.sessions.write().insert(
            id.clone(),
            StoredSession {
                payload,
                expires_at: Instant::now() + self.ttl,
            },
        );
        tracing::debug!(email = %principal.email, "session created");
        id
    }

    /// Resolves a session id to its principal.
    ///
    /// Unknown ids, expired sessions and corrupt payloads all yield `None`;
    /// expired and corrupt entries are dropped on the way out.
    pub fn resolve(&self, id: &str) -> Option<Principal> {
        let session = self.sessions.read().get(id).cloned()?;

        if session.expires_at <= Instant::now() {
            self.sessions.write().remove(id);
            tracing::debug!("session expired");
            return None;
        }

        match serde_json::from_str(&session.payload) {
            Ok(principal) => Some(principal),
            Err(e) => {
                self.sessions.write().remove(id);
                tracing::warn!(error = %e, "discarding corrupt session payload");
                None
            }
        }
    }

    /// Replaces the principal stored under an existing session id.
    ///
    /// Used after a profile update so the session reflects the new record.
    /// A stale or unknown id is a no-op.
    pub fn refresh(&self, id: &str, principal: &Principal) {
        let mut sessions = self.sessions.write();
        if let Some(session) = sessions.get_mut(id) {
            session.payload = serde_json::to_string(principal).unwrap_or_default();
        }
    }

    /// Removes a session. Removing an absent session is fine.
    pub fn remove(&self, id: &str) {
        self.sessions.write().remove(id);
    }

    /// Number of live sessions (expired entries may still be counted until
    /// their next resolve).
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns `true` if no sessions are stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Stores a raw payload under a fresh id, bypassing serialization.
    ///
    /// Test hook for exercising the corrupt-payload path.
    pub fn store_raw(&self, payload: impl Into<String>) -> SessionId {
        let id = Uuid::now_v7().to_string();
        self.sessions.write().insert(
            id.clone(),
            StoredSession {
                payload: payload.into(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        id
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::Role;

    fn principal() -> Principal {
        Principal {
            id: "m-001".to_string(),
            name: "Ana Silva".to_string(),
            email: "ana@infobiojr.com.br".to_string(),
            department: "Projects".to_string(),
            role: Role::Member,
            status: "Ativo".to_string(),
            photo_url: None,
            dob: None,
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(3600))
    }

    #[test]
    fn test_create_and_resolve() {
        let store = store();
        let id = store.create(&principal());
        let resolved = store.resolve(&id).unwrap();
        assert_eq!(resolved.email, "ana@infobiojr.com.br");
    }

    #[test]
    fn test_unknown_id_resolves_to_none() {
        assert!(store().resolve("no-such-session").is_none());
    }

    #[test]
    fn test_corrupt_payload_is_silently_dropped() {
        let store = store();
        let id = store.store_raw("{not json");
        assert!(store.resolve(&id).is_none());
        // The broken entry is gone, a retry stays None rather than erroring.
        assert!(store.resolve(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_expired_session() {
        let store = SessionStore::new(Duration::ZERO);
        let id = store.create(&principal());
        assert!(store.resolve(&id).is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = store();
        let id = store.create(&principal());
        store.remove(&id);
        store.remove(&id);
        assert!(store.resolve(&id).is_none());
    }

    #[test]
    fn test_refresh_updates_principal() {
        let store = store();
        let id = store.create(&principal());

        let mut updated = principal();
        updated.dob = Some("1999-03-14".to_string());
        store.refresh(&id, &updated);

        assert_eq!(store.resolve(&id).unwrap().dob.as_deref(), Some("1999-03-14"));
    }
}
