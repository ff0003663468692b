use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};

const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:5173,http://localhost:3000,http://127.0.0.1:5173";

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub llm_model: String,
    pub port: u16,
    pub rust_log: String,
    /// CORS origins allowed to call the API (the web front-end).
    pub allowed_origins: Vec<String>,
    /// Minimum resume length, in characters after trimming.
    pub min_resume_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY")
                .filter(|v| !v.trim().is_empty())
                .context("Required environment variable 'ANTHROPIC_API_KEY' is not set")?,
            anthropic_api_url: var("ANTHROPIC_API_URL", DEFAULT_API_URL),
            llm_model: var("LLM_MODEL", DEFAULT_MODEL),
            port: var("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            allowed_origins: parse_origins(&var("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)),
            min_resume_chars: var("MIN_RESUME_CHARS", "10")
                .parse::<usize>()
                .context("MIN_RESUME_CHARS must be a non-negative integer")?,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_apply() {
        let config = load(&[("ANTHROPIC_API_KEY", "sk-test")]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.llm_model, DEFAULT_MODEL);
        assert_eq!(config.min_resume_chars, 10);
        assert_eq!(config.allowed_origins.len(), 3);
    }

    #[test]
    fn test_missing_api_key_fails() {
        assert!(load(&[]).is_err());
        assert!(load(&[("ANTHROPIC_API_KEY", "  ")]).is_err());
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = load(&[("ANTHROPIC_API_KEY", "k"), ("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_parse_origins_trims_and_drops_blanks() {
        assert_eq!(
            parse_origins(" https://app.example.com/ ,, http://localhost:5173"),
            vec!["https://app.example.com", "http://localhost:5173"]
        );
    }
}
