//! SQLite-backed credential store using sqlx.
//!
//! Schema: a single-row `session(id, session_json, updated_at)` table with
//! `id` fixed at 1, so saving is an upsert and clearing is a delete.

use async_trait::async_trait;
use dwello_types::{AuthSession, CredentialStore, StoreResult};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;

/// A persistent [`CredentialStore`] backed by `SQLite`.
pub struct SqliteCredentialStore {
    pool: SqlitePool,
}

impl SqliteCredentialStore {
    /// Connects to a `SQLite` database (e.g. `"sqlite:./session.db"` or
    /// `"sqlite::memory:"`).
    ///
    /// Automatically creates the database file if it does not exist and runs
    /// the schema migration.
    ///
    /// # Errors
    ///
    /// Returns a [`sqlx::Error`] if the connection or table creation fails.
    pub async fn new(database_url: &str) -> std::result::Result<Self, sqlx::Error> {
        let opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Single connection: an in-memory database lives per-connection, and
        // the store only ever holds one row anyway.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// Creates the `session` table if it does not exist (idempotent).
    async fn migrate(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS session (
                id           INTEGER PRIMARY KEY CHECK (id = 1),
                session_json TEXT    NOT NULL,
                updated_at   INTEGER NOT NULL DEFAULT (unixepoch())
            )",
        )
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn load(&self) -> StoreResult<Option<AuthSession>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT session_json FROM session WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;

        match row {
            None => Ok(None),
            Some((json,)) => {
                let session: AuthSession = serde_json::from_str(&json)?;
                Ok(Some(session))
            }
        }
    }

    async fn save(&self, session: &AuthSession) -> StoreResult<()> {
        let json = serde_json::to_string(session)?;
        sqlx::query(
            "INSERT INTO session (id, session_json) VALUES (1, ?)
             ON CONFLICT(id) DO UPDATE SET
                 session_json = excluded.session_json,
                 updated_at = unixepoch()",
        )
        .bind(&json)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        sqlx::query("DELETE FROM session")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwello_types::{TokenPair, User};

    async fn make_store() -> SqliteCredentialStore {
        SqliteCredentialStore::new("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_load_empty() {
        let store = make_store().await;
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_with_user() {
        let store = make_store().await;
        let user: User = serde_json::from_str(r#"{"id": "u-1", "city": "Pune"}"#).unwrap();
        let session = AuthSession::new(TokenPair::new("a1", "r1")).with_user(user);
        store.save(&session).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.tokens.access_token, "a1");
        assert_eq!(loaded.user.unwrap().id, "u-1");
    }

    #[tokio::test]
    async fn test_save_replaces_previous_session() {
        let store = make_store().await;
        store
            .save(&AuthSession::new(TokenPair::new("a1", "r1")))
            .await
            .unwrap();
        store
            .save(&AuthSession::new(TokenPair::new("a2", "r2")))
            .await
            .unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.tokens.refresh_token, "r2");
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = make_store().await;
        let user: User = serde_json::from_str(r#"{"id": "u-1"}"#).unwrap();
        store
            .save(&AuthSession::new(TokenPair::new("a1", "r1")).with_user(user))
            .await
            .unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_on_empty_store_is_ok() {
        let store = make_store().await;
        store.clear().await.unwrap();
    }
}
