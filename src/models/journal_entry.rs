use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::analysis::sentiment::SentimentScore;
use crate::analysis::stress::StressLevel;
use crate::analysis::suggestions::SuggestionSource;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub raw_text: String,
    pub mood_rating: i32,
    pub sentiment_score: SentimentScore,
    pub stress_level: StressLevel,
    pub created_at: DateTime<Utc>,
}

/// Everything the store needs to persist an analysed entry.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub raw_text: String,
    pub mood_rating: i32,
    pub sentiment_score: SentimentScore,
    pub stress_level: StressLevel,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntryRequest {
    pub entry_date: Option<NaiveDate>,

    #[validate(range(min = 1, max = 10, message = "Mood must be between 1 and 10"))]
    pub mood_rating: i32,

    #[validate(length(max = 10000, message = "Entry must be under 10000 characters"))]
    #[validate(custom = "not_blank")]
    pub text: String,
}

fn not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Please write something in your journal entry before saving".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct EntryAnalysisResponse {
    pub entry: JournalEntry,
    pub suggestions: Vec<String>,
    pub suggestion_source: SuggestionSource,
}

#[cfg(test)]
impl JournalEntry {
    /// Entry on 2026-01-01 plus `day` days, with a score consistent with `level`.
    pub fn fixture(day: i64, mood_rating: i32, stress_level: StressLevel) -> Self {
        let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let sentiment_score = match stress_level {
            StressLevel::High => -0.6,
            StressLevel::Medium => -0.1,
            StressLevel::Low => 0.4,
        };
        Self {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            entry_date: base + chrono::Duration::days(day),
            raw_text: format!("entry {}", day),
            mood_rating,
            sentiment_score,
            stress_level,
            created_at: Utc::now(),
        }
    }
}
