//! Configuration management for the MCP server.
//!
//! A centralized configuration structure populated from environment
//! variables (with `.env` support via dotenvy) or defaults. The registry is
//! built from this configuration once at startup and injected into the
//! server; there are no ambient globals.

use serde::{Deserialize, Serialize};

use super::transport::TransportConfig;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials.
    pub credentials: CredentialsConfig,

    /// Cloud Run inventory scanner configuration.
    pub cloud_run: CloudRunConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// Human-readable description reported by the `server_meta` tool.
    pub description: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// SerpApi key used by the flight and hotel search tools.
    /// Get a key at: https://serpapi.com/manage-api-key
    pub serp_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "serp_api_key",
                &self.serp_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Configuration for the Cloud Run inventory scanner tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudRunConfig {
    /// Default Google Cloud project, used when a call omits `project`.
    pub project: Option<String>,

    /// Default Cloud Run region.
    pub region: String,

    /// gcloud binary to invoke.
    pub gcloud_bin: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self { serp_api_key: None }
    }
}

impl Default for CloudRunConfig {
    fn default() -> Self {
        Self {
            project: None,
            region: "europe-west1".to_string(),
            gcloud_bin: "gcloud".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "serper-travel-agent".to_string(),
                description: "MCP server for Serper API travel searches".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            cloud_run: CloudRunConfig::default(),
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
    /// Server-level variables use the `MCP_` prefix; credentials keep their
    /// conventional names (`SERP_API_KEY`, `GOOGLE_CLOUD_PROJECT`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(api_key) = std::env::var("SERP_API_KEY") {
            config.credentials.serp_api_key = Some(api_key);
        }

        if let Ok(project) = std::env::var("GOOGLE_CLOUD_PROJECT") {
            config.cloud_run.project = Some(project);
        }

        if let Ok(region) = std::env::var("MCP_CLOUD_RUN_REGION") {
            config.cloud_run.region = region;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_serp_key_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("SERP_API_KEY", "test_key_12345");
        }
        let config = Config::from_env();
        assert_eq!(
            config.credentials.serp_api_key.as_deref(),
            Some("test_key_12345")
        );
        unsafe {
            std::env::remove_var("SERP_API_KEY");
        }
    }

    #[test]
    fn test_serp_key_absent_by_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("SERP_API_KEY");
        }
        let config = Config::from_env();
        assert!(config.credentials.serp_api_key.is_none());
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            serp_api_key: Some("super_secret_key".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_cloud_run_defaults() {
        let config = Config::default();
        assert_eq!(config.cloud_run.gcloud_bin, "gcloud");
        assert!(config.cloud_run.project.is_none());
    }
}
