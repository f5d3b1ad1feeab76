//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally via a `.env` file), defaults, and the
//! command line.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::tools::definitions::DEFAULT_BASE_URL;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Mercury API access.
    pub mercury: MercuryConfig,

    /// Problems found while loading, reported once logging is up.
    #[serde(skip)]
    warnings: Vec<String>,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Mercury API access configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct MercuryConfig {
    /// Bearer token for the Mercury API.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Root URL every endpoint path is appended to.
    pub base_url: String,

    /// Per-request timeout in seconds. Unset means no timeout.
    pub timeout_secs: Option<u64>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for MercuryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MercuryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for MercuryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl MercuryConfig {
    /// The API key, or a configuration error if none was provided.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::config(
                "No Mercury API key provided. Pass it as the first argument or set MERCURY_API_KEY.",
            )
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mercury".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            mercury: MercuryConfig::default(),
            warnings: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...). Mercury settings use
    /// `MERCURY_API_KEY`, `MERCURY_API_BASE_URL` and
    /// `MERCURY_HTTP_TIMEOUT_SECS`.
    ///
    /// Nothing is logged here since the subscriber is not installed yet;
    /// call [`Config::report`] once it is.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.mercury.api_key = non_empty_var("MERCURY_API_KEY");

        if let Some(base_url) = non_empty_var("MERCURY_API_BASE_URL") {
            config.mercury.base_url = base_url;
        }

        if let Some(timeout) = non_empty_var("MERCURY_HTTP_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(0) => config.mercury.timeout_secs = None,
                Ok(secs) => config.mercury.timeout_secs = Some(secs),
                Err(_) => config.warnings.push(format!(
                    "Ignoring invalid MERCURY_HTTP_TIMEOUT_SECS value {:?}; requests will not time out",
                    timeout
                )),
            }
        }

        config
    }

    /// Fall back to an API key given on the command line.
    ///
    /// A non-empty `MERCURY_API_KEY` always wins.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if self.mercury.api_key.is_none() {
            self.mercury.api_key = api_key.filter(|k| !k.is_empty());
        }
        self
    }

    /// Override the log level with one given on the command line.
    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.logging.level = level;
        }
        self
    }

    /// Problems found while loading the configuration.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Log the effective Mercury settings and any loading warnings.
    pub fn report(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
        if self.mercury.base_url != DEFAULT_BASE_URL {
            info!("Using Mercury API base URL: {}", self.mercury.base_url);
        }
        if let Some(secs) = self.mercury.timeout_secs {
            info!("Mercury request timeout: {}s", secs);
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_mercury_env() {
        unsafe {
            std::env::remove_var("MERCURY_API_KEY");
            std::env::remove_var("MERCURY_API_BASE_URL");
            std::env::remove_var("MERCURY_HTTP_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_mercury_settings_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_mercury_env();
        unsafe {
            std::env::set_var("MERCURY_API_KEY", "secret-token:abc");
            std::env::set_var("MERCURY_API_BASE_URL", "https://sandbox.mercury.test/api/v1");
            std::env::set_var("MERCURY_HTTP_TIMEOUT_SECS", "30");
        }

        let config = Config::from_env();

        assert_eq!(config.mercury.api_key.as_deref(), Some("secret-token:abc"));
        assert_eq!(config.mercury.base_url, "https://sandbox.mercury.test/api/v1");
        assert_eq!(config.mercury.timeout(), Some(Duration::from_secs(30)));
        clear_mercury_env();
    }

    #[test]
    fn test_defaults_without_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_mercury_env();

        let config = Config::from_env();

        assert!(config.mercury.api_key.is_none());
        assert_eq!(config.mercury.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.mercury.timeout(), None);
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_mercury_env();
        unsafe {
            std::env::set_var("MERCURY_HTTP_TIMEOUT_SECS", "soon");
        }

        let config = Config::from_env();

        assert_eq!(config.mercury.timeout_secs, None);
        assert_eq!(config.warnings().len(), 1);
        assert!(config.warnings()[0].contains("MERCURY_HTTP_TIMEOUT_SECS"));
        assert!(config.warnings()[0].contains("\"soon\""));
        clear_mercury_env();
    }

    #[test]
    fn test_valid_env_has_no_warnings() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_mercury_env();
        unsafe {
            std::env::set_var("MERCURY_HTTP_TIMEOUT_SECS", "0");
        }

        let config = Config::from_env();

        assert!(config.warnings().is_empty());
        assert_eq!(config.mercury.timeout(), None);
        clear_mercury_env();
    }

    #[test]
    fn test_env_api_key_wins_over_cli() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_mercury_env();
        unsafe {
            std::env::set_var("MERCURY_API_KEY", "from-env");
        }

        let config = Config::from_env().with_api_key(Some("from-cli".to_string()));
        assert_eq!(config.mercury.require_api_key().unwrap(), "from-env");

        unsafe {
            std::env::set_var("MERCURY_API_KEY", "");
        }
        let config = Config::from_env().with_api_key(Some("from-cli".to_string()));
        assert_eq!(config.mercury.require_api_key().unwrap(), "from-cli");

        clear_mercury_env();
        let config = Config::from_env().with_api_key(Some(String::new()));
        assert!(config.mercury.require_api_key().is_err());
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let config = Config::default();
        let err = config.mercury.require_api_key().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("MERCURY_API_KEY"));
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let config = Config::default().with_api_key(Some("super_secret_key".to_string()));
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = Config::default().with_api_key(Some("super_secret_key".to_string()));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super_secret_key"));
    }

    #[test]
    fn test_log_level_override() {
        let config = Config::default().with_log_level(Some("debug".to_string()));
        assert_eq!(config.logging.level, "debug");
        let config = Config::default().with_log_level(None);
        assert_eq!(config.logging.level, "info");
    }
}
