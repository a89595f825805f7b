//! Process configuration, resolved once at startup and injected into the
//! components that need it.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.lexoffice.io";

const LOG_FILE_NAME: &str = "lexware-office-mcp.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("LEXWARE_OFFICE_API_KEY environment variable is required")]
    MissingApiKey,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the Lexware Office API.
    pub api_key: String,
    /// Upstream origin without a trailing slash.
    pub base_url: String,
    /// Append-only log file path.
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_empty_var("LEXWARE_OFFICE_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let base_url = non_empty_var("LEXWARE_OFFICE_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let log_file = non_empty_var("LEXWARE_OFFICE_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_log_file);

        Ok(Self {
            api_key,
            base_url,
            log_file,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// The log file lives next to the executable, falling back to the working
/// directory when the executable path cannot be resolved.
fn default_log_file() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(LOG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-wide, so everything touching them
    // runs inside a single test.
    #[test]
    fn test_from_env() {
        env::remove_var("LEXWARE_OFFICE_API_KEY");
        env::remove_var("LEXWARE_OFFICE_BASE_URL");
        env::remove_var("LEXWARE_OFFICE_LOG_FILE");

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::MissingApiKey)
        ));

        env::set_var("LEXWARE_OFFICE_API_KEY", "   ");
        assert!(Config::from_env().is_err(), "blank key must not count");

        env::set_var("LEXWARE_OFFICE_API_KEY", "test-key");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        env::set_var("LEXWARE_OFFICE_BASE_URL", "http://localhost:9999/");
        env::set_var("LEXWARE_OFFICE_LOG_FILE", "/tmp/test.log");
        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:9999");
        assert_eq!(config.log_file, PathBuf::from("/tmp/test.log"));

        env::remove_var("LEXWARE_OFFICE_API_KEY");
        env::remove_var("LEXWARE_OFFICE_BASE_URL");
        env::remove_var("LEXWARE_OFFICE_LOG_FILE");
    }

    #[test]
    fn test_default_log_file_name() {
        let path = default_log_file();
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some(LOG_FILE_NAME)
        );
    }
}
