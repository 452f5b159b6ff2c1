use axum::{extract::State, http::StatusCode, Extension, Json};
use validator::Validate;

use crate::auth::{
    jwt::{create_access_token, AccessToken},
    middleware::AuthUser,
    password::{hash_password, verify_password},
};
use crate::error::{AppError, AppResult};
use crate::models::user::{LoginRequest, NewUser, RegisterRequest, UserProfile};
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AccessToken>)> {
    body.validate()?;

    let username = body.username.trim().to_string();
    let password_hash = hash_password(&body.password)?;

    let user = state
        .users
        .create_user(NewUser {
            username,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = %user.id, "Account created");

    let token = create_access_token(user.id, &user.username, &state.config)?;
    Ok((StatusCode::CREATED, Json(token)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<AccessToken>> {
    body.validate()?;

    // Same error for unknown user and wrong password.
    let user = state
        .users
        .find_user_by_username(body.username.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(&body.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = create_access_token(user.id, &user.username, &state.config)?;
    Ok(Json(token))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let user = state
        .users
        .find_user_by_id(auth_user.id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    let entry_count = state.entries.list_entries(user.id).await?.len();
    Ok(Json(UserProfile::new(user, entry_count)))
}
