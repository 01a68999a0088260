use anyhow::{Context, Result};

const DEFAULT_UNSPLASH_API_URL: &str = "https://api.unsplash.com";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub unsplash_access_key: String,
    pub unsplash_api_url: String,
    /// Number of posts requested per batch (initial load and every "load more").
    pub batch_limit: u32,
    pub photo_query: String,
    /// Viewport width used to pick the column count before any client reports one.
    pub viewport_width: u32,
    pub image_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            unsplash_access_key: require_env("UNSPLASH_ACCESS_KEY")?,
            unsplash_api_url: std::env::var("UNSPLASH_API_URL")
                .unwrap_or_else(|_| DEFAULT_UNSPLASH_API_URL.to_string()),
            batch_limit: parse_env_or("BATCH_LIMIT", 20)?,
            photo_query: std::env::var("PHOTO_QUERY").unwrap_or_default(),
            viewport_width: parse_env_or("VIEWPORT_WIDTH", 1280)?,
            image_timeout_secs: parse_env_or("IMAGE_TIMEOUT_SECS", 15)?,
            port: parse_env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid number, got '{raw}'"))
}
