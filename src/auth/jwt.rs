use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

pub fn create_access_token(user_id: Uuid, username: &str, config: &Config) -> AppResult<AccessToken> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: (now + Duration::seconds(config.jwt_access_ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };

    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create access token: {}", e)))?;

    Ok(AccessToken {
        access_token,
        token_type: "Bearer",
        expires_in: config.jwt_access_ttl_secs,
    })
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_carries_identity() {
        let config = Config::for_tests();
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, "casey", &config).unwrap();
        assert_eq!(token.expires_in, config.jwt_access_ttl_secs);

        let data = verify_token(&token.access_token, &config).unwrap();
        assert_eq!(data.claims.sub, user_id);
        assert_eq!(data.claims.username, "casey");
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let config = Config::for_tests();
        let token = create_access_token(Uuid::new_v4(), "casey", &config).unwrap();

        let mut other = Config::for_tests();
        other.jwt_secret = "a-completely-different-secret-value".into();
        assert!(matches!(
            verify_token(&token.access_token, &other),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = Config::for_tests();
        config.jwt_access_ttl_secs = -3600;
        let token = create_access_token(Uuid::new_v4(), "casey", &config).unwrap();
        assert!(verify_token(&token.access_token, &config).is_err());
    }
}
