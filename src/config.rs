use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,
    pub jwt_access_ttl_secs: i64,

    pub claude_api_key: String,
    pub claude_model: String,
    pub suggestion_generation_enabled: bool,
    pub generation_timeout_secs: u64,

    pub auth_rate_limit_max: u32,
    pub auth_rate_limit_window_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 20)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_access_ttl_secs: parse_or("JWT_ACCESS_TTL_SECS", 86_400)?,

            claude_api_key: env::var("CLAUDE_API_KEY").unwrap_or_default(),
            claude_model: env::var("CLAUDE_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".into()),
            suggestion_generation_enabled: parse_or("SUGGESTION_GENERATION_ENABLED", true)?,
            generation_timeout_secs: parse_or("GENERATION_TIMEOUT_SECS", 30)?,

            auth_rate_limit_max: parse_or("AUTH_RATE_LIMIT_MAX", 5)?,
            auth_rate_limit_window_secs: parse_or("AUTH_RATE_LIMIT_WINDOW_SECS", 60)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Generation needs both the switch and a key.
    pub fn generation_configured(&self) -> bool {
        self.suggestion_generation_enabled && !self.claude_api_key.is_empty()
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            database_url: String::new(),
            database_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            jwt_secret: "test-secret-test-secret-test-secret".into(),
            jwt_access_ttl_secs: 900,
            claude_api_key: String::new(),
            claude_model: "test-model".into(),
            suggestion_generation_enabled: false,
            generation_timeout_secs: 1,
            auth_rate_limit_max: 100,
            auth_rate_limit_window_secs: 60,
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_requires_key_and_switch() {
        let mut config = Config::for_tests();
        assert!(!config.generation_configured());

        config.suggestion_generation_enabled = true;
        assert!(!config.generation_configured());

        config.claude_api_key = "sk-test".into();
        assert!(config.generation_configured());

        config.suggestion_generation_enabled = false;
        assert!(!config.generation_configured());
    }

    #[test]
    fn test_parse_or_rejects_unparseable_flag() {
        let key = "WELLNESS_TEST_GENERATION_FLAG";
        env::set_var(key, "yes");
        let err = parse_or(key, true).unwrap_err();
        assert!(err.to_string().contains(key));

        env::set_var(key, "false");
        assert!(!parse_or(key, true).unwrap());

        env::remove_var(key);
        assert!(parse_or(key, true).unwrap());
    }

    #[test]
    fn test_listen_addr() {
        let config = Config::for_tests();
        assert_eq!(config.listen_addr(), "127.0.0.1:0");
    }
}
