//! Configuration management for the mock server

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use yol_api::MockConfig;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server host (default: 0.0.0.0)
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 3333)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (comma-separated). If empty, any origin is allowed.
    pub cors_allowed_origins: Option<String>,

    /// Log output: "text" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Dataset sizes, seed and mock credentials
    #[serde(default)]
    pub mock: MockConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3333
}

fn default_log_format() -> String {
    "text".to_string()
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup; unset or unparsable keys keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = MockConfig::default();

        let host = lookup("YOL_HOST").unwrap_or_else(default_host);
        let port = parsed(&lookup, "YOL_PORT").unwrap_or_else(default_port);
        let cors_allowed_origins = lookup("YOL_CORS_ALLOWED_ORIGINS");
        let log_format = lookup("LOG_FORMAT").unwrap_or_else(default_log_format);
        match log_format.to_lowercase().as_str() {
            "text" | "json" => {}
            other => anyhow::bail!("Invalid LOG_FORMAT '{}'. Must be one of: text, json", other),
        }

        let mock = MockConfig {
            folders: parsed(&lookup, "YOL_FOLDERS").unwrap_or(defaults.folders),
            tasks: parsed(&lookup, "YOL_TASKS").unwrap_or(defaults.tasks),
            users: parsed(&lookup, "YOL_USERS").unwrap_or(defaults.users),
            clients: parsed(&lookup, "YOL_CLIENTS").unwrap_or(defaults.clients),
            seed: parsed(&lookup, "YOL_SEED"),
            fixture_folder_id: defaults.fixture_folder_id,
            auth_email: lookup("YOL_AUTH_EMAIL").unwrap_or(defaults.auth_email),
            auth_password: lookup("YOL_AUTH_PASSWORD").unwrap_or(defaults.auth_password),
            reset_token: lookup("YOL_RESET_TOKEN").unwrap_or(defaults.reset_token),
        };

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            log_format,
            mock,
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file")?;
        Ok(config)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Configured CORS origins, blanks dropped
    pub fn allowed_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_allowed_origins: None,
            log_format: default_log_format(),
            mock: MockConfig::default(),
        }
    }
}
