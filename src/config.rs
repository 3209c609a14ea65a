//! Configuration module for threadboard.

use serde::Deserialize;
use std::path::Path;

use crate::{BoardError, Result};

/// Environment variable that overrides `database.url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string for the relational store.
    #[serde(default = "default_db_url")]
    pub url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_url() -> String {
    "sqlite://data/threadboard.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            max_connections: default_max_connections(),
        }
    }
}

/// Upload size ceilings for image attachments.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Maximum post image size in megabytes.
    #[serde(default = "default_max_post_image")]
    pub max_post_image_mb: u64,
    /// Maximum comment image size in megabytes.
    #[serde(default = "default_max_comment_image")]
    pub max_comment_image_mb: u64,
}

/// Largest accepted upload ceiling, in megabytes.
pub const MAX_UPLOAD_CEILING_MB: u64 = 1024;

fn default_max_post_image() -> u64 {
    10
}

fn default_max_comment_image() -> u64 {
    5
}

impl UploadConfig {
    /// Post image ceiling in bytes.
    pub fn max_post_image_bytes(&self) -> usize {
        mb_to_bytes(self.max_post_image_mb)
    }

    /// Comment image ceiling in bytes.
    pub fn max_comment_image_bytes(&self) -> usize {
        mb_to_bytes(self.max_comment_image_mb)
    }
}

fn mb_to_bytes(mb: u64) -> usize {
    usize::try_from(mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_post_image_mb: default_max_post_image(),
            max_comment_image_mb: default_max_comment_image(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/threadboard.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Upload limits.
    #[serde(default)]
    pub uploads: UploadConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BoardError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BoardError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DATABASE_URL`: Override the database connection string
    ///
    /// An unset or empty variable leaves the configured value in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.is_empty() {
                self.database.url = url;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(BoardError::Config("database.url must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(BoardError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.uploads.max_post_image_mb == 0 || self.uploads.max_comment_image_mb == 0 {
            return Err(BoardError::Config(
                "upload ceilings must be at least 1 MB".to_string(),
            ));
        }
        if self.uploads.max_post_image_mb > MAX_UPLOAD_CEILING_MB
            || self.uploads.max_comment_image_mb > MAX_UPLOAD_CEILING_MB
        {
            return Err(BoardError::Config(format!(
                "upload ceilings must not exceed {} MB",
                MAX_UPLOAD_CEILING_MB
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);

        assert_eq!(config.database.url, "sqlite://data/threadboard.db");
        assert_eq!(config.database.max_connections, 5);

        assert_eq!(config.uploads.max_post_image_mb, 10);
        assert_eq!(config.uploads.max_comment_image_mb, 5);
        assert_eq!(config.uploads.max_post_image_bytes(), 10 * 1024 * 1024);
        assert_eq!(config.uploads.max_comment_image_bytes(), 5 * 1024 * 1024);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/threadboard.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000

[database]
url = "sqlite://custom/board.db"
max_connections = 12

[uploads]
max_post_image_mb = 20
max_comment_image_mb = 2

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite://custom/board.db");
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.uploads.max_post_image_mb, 20);
        assert_eq!(config.uploads.max_comment_image_mb, 2);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 9000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "sqlite://data/threadboard.db");
        assert_eq!(config.uploads.max_comment_image_mb, 5);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(BoardError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");
        assert!(matches!(result, Err(BoardError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database]\nurl = \"sqlite::memory:\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
    }

    // Both cases live in one test because the process environment is shared
    // between concurrently running tests.
    #[test]
    fn test_apply_env_overrides_database_url() {
        let original = std::env::var(DATABASE_URL_ENV).ok();

        std::env::set_var(DATABASE_URL_ENV, "sqlite://env/override.db");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.database.url, "sqlite://env/override.db");

        std::env::set_var(DATABASE_URL_ENV, "");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.database.url, "sqlite://data/threadboard.db");

        if let Some(val) = original {
            std::env::set_var(DATABASE_URL_ENV, val);
        } else {
            std::env::remove_var(DATABASE_URL_ENV);
        }
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_url() {
        let mut config = Config::default();
        config.database.url = "  ".to_string();

        let result = config.validate();
        assert!(matches!(result, Err(BoardError::Config(msg)) if msg.contains("database.url")));
    }

    #[test]
    fn test_validate_zero_upload_ceiling() {
        let mut config = Config::default();
        config.uploads.max_comment_image_mb = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_oversized_upload_ceiling() {
        let mut config = Config::default();
        config.uploads.max_post_image_mb = MAX_UPLOAD_CEILING_MB;
        assert!(config.validate().is_ok());

        config.uploads.max_post_image_mb = MAX_UPLOAD_CEILING_MB + 1;
        let result = config.validate();
        assert!(matches!(result, Err(BoardError::Config(msg)) if msg.contains("exceed")));
    }

    #[test]
    fn test_upload_bytes_saturate() {
        let uploads = UploadConfig {
            max_post_image_mb: u64::MAX,
            max_comment_image_mb: u64::MAX / 2,
        };
        assert_eq!(uploads.max_post_image_bytes(), usize::MAX);
        assert_eq!(uploads.max_comment_image_bytes(), usize::MAX);
    }
}
