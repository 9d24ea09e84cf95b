use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::services::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:3001,http://127.0.0.1:3000,*";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0}")]
    InvalidPort(String),
    #[error("Required .env file not found")]
    MissingEnvFile,
    #[error("Failed to read .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Process configuration, built once at startup and shared with handlers
/// through `AppState`.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `None` when `AI_API_KEY` is unset or empty.
    pub api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_key: None,
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            gemini_model: DEFAULT_MODEL.to_string(),
            cors_allowed_origins: parse_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::from_vars(|key| env::var(key).ok())?;

        if config.api_key.is_none() {
            tracing::warn!("AI_API_KEY not set, /summarize will fail until it is configured");
        }

        Ok(config)
    }

    /// Builds a config from an arbitrary variable lookup. Empty values are
    /// treated the same as missing ones.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port: u16 = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            api_key: var("AI_API_KEY"),
            gemini_base_url: var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            gemini_model: var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.cors_allowed_origins),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Loads `.env` into the process environment. A missing file is only an
/// error when `REQUIRE_ENV_FILE` is truthy.
pub fn load_env_file() -> Result<Option<PathBuf>, ConfigError> {
    let required = env::var("REQUIRE_ENV_FILE")
        .map(|v| is_truthy(&v))
        .unwrap_or(false);

    resolve_env_file(dotenvy::dotenv(), required)
}

/// `Ok(None)` means the file was absent and that is allowed.
pub fn resolve_env_file(
    loaded: Result<PathBuf, dotenvy::Error>,
    required: bool,
) -> Result<Option<PathBuf>, ConfigError> {
    match loaded {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => {
            if required {
                Err(ConfigError::MissingEnvFile)
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(e.into()),
    }
}

pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
