use std::env;

const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60 * 24;

/// Ten years. Keeps token expiry well inside chrono's representable range.
pub const MAX_TOKEN_TTL_MINUTES: i64 = 525_600 * 10;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:./data/shanyrak.db?mode=rwc".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "development-secret-change-in-production".to_string()),
            token_ttl_minutes: parse_token_ttl(env::var("TOKEN_TTL_MINUTES").ok()),
        }
    }
}

fn parse_token_ttl(raw: Option<String>) -> i64 {
    raw.and_then(|t| t.trim().parse().ok())
        .filter(|t: &i64| (1..=MAX_TOKEN_TTL_MINUTES).contains(t))
        .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES)
}
