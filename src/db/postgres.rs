use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{EntryStore, StoreError, UserStore};
use crate::models::journal_entry::{JournalEntry, NewJournalEntry};
use crate::models::user::{NewUser, User};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryStore for PgStore {
    async fn list_entries(&self, user_id: Uuid) -> Result<Vec<JournalEntry>, StoreError> {
        let entries = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT * FROM journal_entries
            WHERE user_id = $1
            ORDER BY entry_date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn save_entry(&self, entry: NewJournalEntry) -> Result<JournalEntry, StoreError> {
        // Unique (user_id, entry_date): a conflict returns no row.
        sqlx::query_as::<_, JournalEntry>(
            r#"
            INSERT INTO journal_entries
                (id, user_id, entry_date, raw_text, mood_rating, sentiment_score, stress_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, entry_date) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(entry.entry_date)
        .bind(&entry.raw_text)
        .bind(entry.mood_rating)
        .bind(entry.sentiment_score)
        .bind(entry.stress_level)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::DuplicateEntry(entry.entry_date))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::DuplicateUsername)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
