use axum::{extract::State, Extension, Json};
use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::sentiment::SentimentScore;
use crate::analysis::stress::StressLevel;
use crate::analysis::trends::{HistorySeries, TrendAlert, TrendAnalyzer};
use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::AppState;

const EMPTY_HINT: &str = "Log your first journal entry to see your dashboard!";

#[derive(Debug, Serialize)]
pub struct MoodPoint {
    pub date: NaiveDate,
    pub mood_rating: i32,
    pub sentiment_score: SentimentScore,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StressCount {
    pub level: StressLevel,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub entry_count: usize,
    pub mood_series: Vec<MoodPoint>,
    /// Always Low, Medium, High in that order.
    pub stress_distribution: Vec<StressCount>,
    pub trend_alerts: Vec<TrendAlert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<DashboardResponse>> {
    let history = HistorySeries::new(state.entries.list_entries(auth_user.id).await?);
    let trends = state.journal.suggestions().trends();
    Ok(Json(build_dashboard(&history, trends)))
}

pub fn build_dashboard(history: &HistorySeries, trends: &TrendAnalyzer) -> DashboardResponse {
    let mood_series = history
        .entries()
        .iter()
        .map(|e| MoodPoint {
            date: e.entry_date,
            mood_rating: e.mood_rating,
            sentiment_score: e.sentiment_score,
        })
        .collect();

    let stress_distribution = StressLevel::ALL
        .iter()
        .map(|&level| StressCount {
            level,
            count: history
                .entries()
                .iter()
                .filter(|e| e.stress_level == level)
                .count(),
        })
        .collect();

    DashboardResponse {
        entry_count: history.len(),
        mood_series,
        stress_distribution,
        trend_alerts: trends.analyze(history),
        hint: history.is_empty().then(|| EMPTY_HINT.to_string()),
    }
}
