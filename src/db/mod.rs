//! Persistence seams. Handlers and services only see these traits; the
//! Postgres implementation is wired up in `main`, the in-memory one in tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::journal_entry::{JournalEntry, NewJournalEntry};
use crate::models::user::{NewUser, User};

#[cfg(test)]
pub mod memory;
pub mod pool;
pub mod postgres;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("An entry already exists for {0}")]
    DuplicateEntry(NaiveDate),

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Committed entries for `user_id`, oldest first.
    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, StoreError>;

    /// Fails with [`StoreError::DuplicateEntry`] if the user already has an
    /// entry on that date.
    async fn save_entry(&self, entry: NewJournalEntry) -> Result<JournalEntry, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}
