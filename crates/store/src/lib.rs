//! Credential storage backends for the authenticated session.
//!
//! Provides an in-memory store for testing and a SQLite-backed store for
//! durable on-device persistence.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryCredentialStore;
pub use sqlite::SqliteCredentialStore;
