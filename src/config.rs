use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use url::Url;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    /// Absent keys are reported per request, not at startup.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let gemini_base_url = match env::var("GEMINI_BASE_URL").ok() {
            Some(raw) => parse_url("GEMINI_BASE_URL", &raw)?,
            None => DEFAULT_GEMINI_BASE_URL.to_string(),
        };

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            gemini_api_key: get_env_opt("GEMINI_API_KEY"),
            gemini_base_url,
            gemini_model: get_env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            gemini_api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

fn get_env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn get_env_or(name: &str, default: &str) -> String {
    get_env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Validates a base URL and strips the trailing slash so paths can be appended.
pub fn parse_url(name: &str, raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_url_strips_trailing_slash() {
        assert_eq!(
            parse_url("X", "http://127.0.0.1:8080/v1beta/").unwrap(),
            "http://127.0.0.1:8080/v1beta"
        );
        assert_eq!(
            parse_url("X", "http://localhost:3000").unwrap(),
            "http://localhost:3000"
        );
    }

    #[test]
    fn parse_url_rejects_garbage() {
        let err = parse_url("GEMINI_BASE_URL", "not a url").unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("GEMINI_BASE_URL")));
    }
}
