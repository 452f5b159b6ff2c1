use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub entry_count: usize,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user: User, entry_count: usize) -> Self {
        Self {
            id: user.id,
            username: user.username,
            entry_count,
            created_at: user.created_at,
        }
    }
}

/// POST /api/auth/register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom = "username_length")]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,
}

/// Usernames are stored trimmed, so the bounds apply to the trimmed form.
fn username_length(username: &str) -> Result<(), ValidationError> {
    let len = username.trim().chars().count();
    if !(3..=50).contains(&len) {
        let mut err = ValidationError::new("length");
        err.message = Some("Username must be 3-50 characters".into());
        return Err(err);
    }
    Ok(())
}

/// POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}
