use chrono::NaiveDate;
use uuid::Uuid;

use crate::analysis::sentiment::{SentimentAnalyzer, SentimentScore};
use crate::analysis::stress::StressLevel;
use crate::analysis::suggestions::{SuggestionEngine, SuggestionSet};
use crate::analysis::trends::HistorySeries;
use crate::db::{EntryStore, StoreError};
use crate::models::journal_entry::{JournalEntry, NewJournalEntry};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub sentiment_score: SentimentScore,
    pub stress_level: StressLevel,
}

#[derive(Debug, Clone)]
pub struct RecordedEntry {
    pub entry: JournalEntry,
    pub suggestions: SuggestionSet,
}

/// Scores, classifies and persists journal entries. Built once in `main` and
/// shared through `AppState`.
pub struct JournalService {
    sentiment: SentimentAnalyzer,
    suggestions: SuggestionEngine,
}

impl JournalService {
    pub fn new(sentiment: SentimentAnalyzer, suggestions: SuggestionEngine) -> Self {
        Self {
            sentiment,
            suggestions,
        }
    }

    pub fn suggestions(&self) -> &SuggestionEngine {
        &self.suggestions
    }

    pub fn assess(&self, text: &str, mood_rating: i32) -> Assessment {
        let sentiment_score = self.sentiment.score(text);
        Assessment {
            sentiment_score,
            stress_level: StressLevel::classify(sentiment_score, mood_rating),
        }
    }

    /// History is read before the new entry is written so the entry does not
    /// feed into its own trend alerts.
    pub async fn record_entry(
        &self,
        store: &dyn EntryStore,
        user_id: Uuid,
        entry_date: NaiveDate,
        raw_text: &str,
        mood_rating: i32,
    ) -> Result<RecordedEntry, StoreError> {
        let assessment = self.assess(raw_text, mood_rating);
        let history = HistorySeries::new(store.list_entries(user_id).await?);

        let suggestions = self
            .suggestions
            .suggest(
                assessment.sentiment_score,
                assessment.stress_level,
                raw_text,
                &history,
            )
            .await;

        let entry = store
            .save_entry(NewJournalEntry {
                user_id,
                entry_date,
                raw_text: raw_text.to_string(),
                mood_rating,
                sentiment_score: assessment.sentiment_score,
                stress_level: assessment.stress_level,
            })
            .await?;

        tracing::info!(
            user_id = %user_id,
            entry_date = %entry_date,
            stress_level = %entry.stress_level,
            source = ?suggestions.source,
            "Journal entry saved"
        );

        Ok(RecordedEntry { entry, suggestions })
    }
}
