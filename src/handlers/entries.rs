use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::journal_entry::{CreateEntryRequest, EntryAnalysisResponse, JournalEntry};
use crate::AppState;

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateEntryRequest>,
) -> AppResult<(StatusCode, Json<EntryAnalysisResponse>)> {
    body.validate()?;

    let entry_date = body.entry_date.unwrap_or_else(|| Utc::now().date_naive());
    tracing::debug!(
        user_id = %auth_user.id,
        username = %auth_user.username,
        %entry_date,
        "Recording journal entry"
    );

    let recorded = state
        .journal
        .record_entry(
            state.entries.as_ref(),
            auth_user.id,
            entry_date,
            &body.text,
            body.mood_rating,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EntryAnalysisResponse {
            entry: recorded.entry,
            suggestions: recorded.suggestions.items,
            suggestion_source: recorded.suggestions.source,
        }),
    ))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<JournalEntry>>> {
    let entries = state.entries.list_entries(auth_user.id).await?;
    Ok(Json(entries))
}
