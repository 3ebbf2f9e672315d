//! In-memory credential store backed by a `Mutex<Option<AuthSession>>`.

use async_trait::async_trait;
use dwello_types::{AuthSession, CredentialStore, StoreResult};
use std::sync::Mutex;

/// An in-memory [`CredentialStore`] implementation for testing and ephemeral use.
pub struct MemoryCredentialStore {
    session: Mutex<Option<AuthSession>>,
}

impl MemoryCredentialStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
        }
    }

    /// Creates a store pre-seeded with a session.
    #[must_use]
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> StoreResult<Option<AuthSession>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn save(&self, session: &AuthSession) -> StoreResult<()> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
