use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values; everything has a development default
/// except the OpenAI key, whose absence only disables recommendations.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub data_dir: PathBuf,
    pub careers_file: Option<PathBuf>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_model: optional_env("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            data_dir: PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| ".".to_string())),
            careers_file: optional_env("CAREERS_FILE").map(PathBuf::from),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    pub fn roadmaps_file(&self) -> PathBuf {
        self.data_dir.join("roadmaps.json")
    }
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_files_live_in_data_dir() {
        let config = Config {
            port: 5000,
            jwt_secret: "s".to_string(),
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            data_dir: PathBuf::from("/var/lib/roadmap"),
            careers_file: None,
            rust_log: "info".to_string(),
        };
        assert_eq!(config.users_file(), PathBuf::from("/var/lib/roadmap/users.json"));
        assert_eq!(config.roadmaps_file(), PathBuf::from("/var/lib/roadmap/roadmaps.json"));
        assert!(!config.uses_default_jwt_secret());
    }
}
