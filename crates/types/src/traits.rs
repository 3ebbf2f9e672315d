//! Async traits shared across the dwello crates.

use crate::error::StoreError;
use crate::session::AuthSession;
use async_trait::async_trait;

/// Convenience alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistent storage for the authenticated session.
///
/// The session (token pair plus cached user record) is the unit of
/// persistence: `save` writes it whole and `clear` removes it whole, so the
/// store can never hold a partial credential state.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Loads the stored session, if any.
    async fn load(&self) -> StoreResult<Option<AuthSession>>;

    /// Persists the session, replacing any previous one.
    async fn save(&self, session: &AuthSession) -> StoreResult<()>;

    /// Removes the stored session entirely.
    async fn clear(&self) -> StoreResult<()>;
}
