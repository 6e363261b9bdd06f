use serde::Deserialize;

/// Names of the two cookies carrying the session claims.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub identity_cookie: String,
    pub token_cookie: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let session = SessionConfig {
            identity_cookie: std::env::var("SESSION_ID_COOKIE")
                .unwrap_or_else(|_| "account_id".into()),
            token_cookie: std::env::var("SESSION_TOKEN_COOKIE")
                .unwrap_or_else(|_| "session_token".into()),
        };
        Ok(Self {
            database_url,
            session,
        })
    }
}
