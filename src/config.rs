use std::env;
use std::sync::OnceLock;
use thiserror::Error;

/// Default number of sentences kept in a summary.
pub const DEFAULT_SUMMARY_SENTENCE_COUNT: usize = 3;
/// Default request body limit (25 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the summarization server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub server_host: String,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Number of top-ranked sentences returned in a summary.
    pub summary_sentence_count: usize,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
    /// Report every failure as a 200 response with an `error` body.
    pub legacy_error_responses: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: None,
            summary_sentence_count: DEFAULT_SUMMARY_SENTENCE_COUNT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            legacy_error_responses: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let summary_sentence_count = parse_optional("SUMMARY_SENTENCE_COUNT")?
            .unwrap_or(DEFAULT_SUMMARY_SENTENCE_COUNT);
        if summary_sentence_count == 0 {
            return Err(ConfigError::InvalidValue("SUMMARY_SENTENCE_COUNT".into()));
        }

        Ok(Self {
            server_host: load_env_optional("SERVER_HOST")
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_optional("SERVER_PORT")?,
            summary_sentence_count,
            max_upload_bytes: parse_optional("MAX_UPLOAD_BYTES")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            legacy_error_responses: load_env_optional("LEGACY_ERROR_RESPONSES")
                .map(|value| {
                    parse_flag(&value)
                        .ok_or_else(|| ConfigError::InvalidValue("LEGACY_ERROR_RESPONSES".into()))
                })
                .transpose()?
                .unwrap_or(false),
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_optional<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    load_env_optional(key)
        .map(|value| parse_value(key, &value))
        .transpose()
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Global configuration cache populated during process start.
pub static CONFIG: OnceLock<Config> = OnceLock::new();

/// Retrieve the loaded configuration, falling back to defaults when initialization was skipped.
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

/// Load configuration from the environment and install it in the global cache.
pub fn init_config() -> Result<(), ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        host = %config.server_host,
        server_port = ?config.server_port,
        summary_sentence_count = config.summary_sentence_count,
        max_upload_bytes = config.max_upload_bytes,
        legacy_error_responses = config.legacy_error_responses,
        "Loaded configuration"
    );
    if CONFIG.set(config).is_err() {
        tracing::warn!("Configuration already initialized; keeping existing values");
    }
    Ok(())
}
