use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EntryStore, StoreError, UserStore};
use crate::models::journal_entry::{JournalEntry, NewJournalEntry};
use crate::models::user::{NewUser, User};

/// In-process store with the same uniqueness rules as the Postgres schema.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    entries: RwLock<Vec<JournalEntry>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the database were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, StoreError> {
        self.check_online()?;
        let mut entries: Vec<JournalEntry> = self
            .entries
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.entry_date);
        Ok(entries)
    }

    async fn save_entry(&self, entry: NewJournalEntry) -> Result<JournalEntry, StoreError> {
        self.check_online()?;
        let mut entries = self.entries.write().await;
        if entries
            .iter()
            .any(|e| e.user_id == entry.user_id && e.entry_date == entry.entry_date)
        {
            return Err(StoreError::DuplicateEntry(entry.entry_date));
        }
        let saved = JournalEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            entry_date: entry.entry_date,
            raw_text: entry.raw_text,
            mood_rating: entry.mood_rating,
            sentiment_score: entry.sentiment_score,
            stress_level: entry.stress_level,
            created_at: Utc::now(),
        };
        entries.push(saved.clone());
        Ok(saved)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.check_online()?;
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername);
        }
        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.check_online()?;
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.check_online()?;
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::analysis::stress::StressLevel;

    fn new_entry(user_id: Uuid, day: u32, mood: i32) -> NewJournalEntry {
        NewJournalEntry {
            user_id,
            entry_date: NaiveDate::from_ymd_opt(2026, 5, day).unwrap(),
            raw_text: "text".into(),
            mood_rating: mood,
            sentiment_score: 0.1,
            stress_level: StressLevel::Low,
        }
    }

    #[tokio::test]
    async fn test_list_is_per_user_and_date_ordered() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        store.save_entry(new_entry(alice, 3, 6)).await.unwrap();
        store.save_entry(new_entry(alice, 1, 7)).await.unwrap();
        store.save_entry(new_entry(bob, 2, 8)).await.unwrap();

        let entries = store.list_entries(alice).await.unwrap();
        let days: Vec<u32> = entries.iter().map(|e| chrono::Datelike::day(&e.entry_date)).collect();
        assert_eq!(days, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_duplicate_date_rejected() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        store.save_entry(new_entry(user, 1, 6)).await.unwrap();
        let err = store.save_entry(new_entry(user, 1, 2)).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEntry(_)));
        assert_eq!(store.list_entries(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        let user = NewUser {
            username: "casey".into(),
            password_hash: "h".into(),
        };
        store.create_user(user.clone()).await.unwrap();
        let err = store.create_user(user).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUsername));
    }

    #[tokio::test]
    async fn test_offline_store_errors() {
        let store = MemoryStore::new();
        store.set_offline(true);
        assert!(store.health_check().await.is_err());
        assert!(store.list_entries(Uuid::new_v4()).await.is_err());
    }
}
