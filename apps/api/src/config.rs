use anyhow::{Context, Result};

const DEFAULT_LLM_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_LLM_MODEL: &str = "claude-sonnet-4-5";

/// Application configuration loaded from environment variables.
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset the service falls back to in-memory stores.
    pub database_url: Option<String>,
    pub llm: LlmConfig,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

/// Completion backend settings: endpoint, credential and request shape.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            llm: LlmConfig {
                api_url: env_or("LLM_API_URL", DEFAULT_LLM_API_URL),
                api_key: require_env("ANTHROPIC_API_KEY")?,
                model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
                max_tokens: parse_env("LLM_MAX_TOKENS", 1024)?,
                timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            },
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
