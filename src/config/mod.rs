//! Configuration management
//!
//! This module handles loading and parsing configuration for the school backend.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Signing key used when none is configured. Only suitable for local development.
pub const DEV_JWT_SECRET: &str = "maktab-development-secret-change-me";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Load the demo school and demo accounts into empty stores at startup
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            seed_demo_data: true,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin, `*` for any
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_true() -> bool {
    true
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing key for session tokens. `None` falls back to `DEV_JWT_SECRET`.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u32,
    /// Require tokens and roles on the record routes
    #[serde(default = "default_true")]
    pub enforce: bool,
    /// List the demo logins on the root endpoint
    #[serde(default)]
    pub expose_demo_credentials: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_hours: default_token_ttl_hours(),
            enforce: true,
            expose_demo_credentials: false,
        }
    }
}

fn default_token_ttl_hours() -> u32 {
    24
}

/// Longest accepted token lifetime (100 years)
pub const MAX_TOKEN_TTL_HOURS: u32 = 8760 * 100;

impl AuthConfig {
    /// The configured signing key, or the development key
    pub fn secret(&self) -> &str {
        self.jwt_secret.as_deref().unwrap_or(DEV_JWT_SECRET)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret.is_none()
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.token_ttl_hours))
    }
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            }
        })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - MAKTAB_SERVER_HOST
    /// - MAKTAB_SERVER_PORT
    /// - MAKTAB_SERVER_CORS_ORIGIN
    /// - MAKTAB_AUTH_JWT_SECRET
    /// - MAKTAB_AUTH_TOKEN_TTL_HOURS
    /// - MAKTAB_AUTH_ENFORCE
    /// - MAKTAB_AUTH_EXPOSE_DEMO_CREDENTIALS
    /// - MAKTAB_SEED_DEMO_DATA
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    /// Values that do not parse are ignored.
    fn apply_env_overrides(&mut self) {
        // Server configuration
        if let Ok(host) = std::env::var("MAKTAB_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("MAKTAB_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("MAKTAB_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        // Auth configuration
        if let Ok(secret) = std::env::var("MAKTAB_AUTH_JWT_SECRET") {
            self.auth.jwt_secret = Some(secret);
        }
        if let Ok(ttl) = std::env::var("MAKTAB_AUTH_TOKEN_TTL_HOURS") {
            if let Ok(ttl) = ttl.parse::<u32>() {
                self.auth.token_ttl_hours = ttl;
            }
        }
        if let Some(enforce) = env_flag("MAKTAB_AUTH_ENFORCE") {
            self.auth.enforce = enforce;
        }
        if let Some(expose) = env_flag("MAKTAB_AUTH_EXPOSE_DEMO_CREDENTIALS") {
            self.auth.expose_demo_credentials = expose;
        }

        if let Some(seed) = env_flag("MAKTAB_SEED_DEMO_DATA") {
            self.seed_demo_data = seed;
        }
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.auth.jwt_secret.as_deref(), Some(s) if s.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "auth.jwt_secret must not be empty".to_string(),
            ));
        }
        if self.auth.token_ttl_hours == 0 {
            return Err(ConfigError::ValidationError(
                "auth.token_ttl_hours must be greater than zero".to_string(),
            ));
        }
        if self.auth.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::ValidationError(format!(
                "auth.token_ttl_hours must be at most {}",
                MAX_TOKEN_TTL_HOURS
            )));
        }
        Ok(())
    }
}

fn env_flag(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
const ENV_KEYS: [&str; 8] = [
    "MAKTAB_SERVER_HOST",
    "MAKTAB_SERVER_PORT",
    "MAKTAB_SERVER_CORS_ORIGIN",
    "MAKTAB_AUTH_JWT_SECRET",
    "MAKTAB_AUTH_TOKEN_TTL_HOURS",
    "MAKTAB_AUTH_ENFORCE",
    "MAKTAB_AUTH_EXPOSE_DEMO_CREDENTIALS",
    "MAKTAB_SEED_DEMO_DATA",
];

#[cfg(test)]
fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}


/// Property-based tests for configuration parsing
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn valid_host_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
                .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d)),
            Just("localhost".to_string()),
            Just("0.0.0.0".to_string()),
            "[a-z][a-z0-9]{0,10}".prop_map(|s| s),
        ]
    }

    fn valid_config_strategy() -> impl Strategy<Value = Config> {
        (
            valid_host_strategy(),
            1u16..=65535,
            prop::option::of("[a-zA-Z0-9_-]{8,32}"),
            1u32..=720,
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(host, port, jwt_secret, token_ttl_hours, enforce, expose, seed)| Config {
                server: ServerConfig {
                    host,
                    port,
                    cors_origin: "*".to_string(),
                },
                auth: AuthConfig {
                    jwt_secret,
                    token_ttl_hours,
                    enforce,
                    expose_demo_credentials: expose,
                },
                seed_demo_data: seed,
            })
    }

    /// YAML that is either syntactically broken or has wrong field types
    fn malformed_yaml_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("server:\n  port: not_a_number".to_string()),
            Just("server:\n  port: true".to_string()),
            Just("server:\n  port: 99999999999999999999".to_string()),
            Just("auth:\n  token_ttl_hours: -3".to_string()),
            Just("auth:\n  enforce: [1, 2]".to_string()),
            Just("auth: \"just_a_string\"".to_string()),
            Just("server: [invalid, list]".to_string()),
            Just("seed_demo_data: {key: value}".to_string()),
            Just("server:\n  host: [unclosed".to_string()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// Serializing a config to YAML and loading it back yields the same values.
        #[test]
        fn property_config_roundtrip(config in valid_config_strategy()) {
            let yaml = serde_yaml::to_string(&config).expect("Failed to serialize config");

            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let parsed = Config::load(file.path()).expect("Failed to parse config");

            prop_assert_eq!(config.server.host, parsed.server.host);
            prop_assert_eq!(config.server.port, parsed.server.port);
            prop_assert_eq!(config.auth.jwt_secret, parsed.auth.jwt_secret);
            prop_assert_eq!(config.auth.token_ttl_hours, parsed.auth.token_ttl_hours);
            prop_assert_eq!(config.auth.enforce, parsed.auth.enforce);
            prop_assert_eq!(config.auth.expose_demo_credentials, parsed.auth.expose_demo_credentials);
            prop_assert_eq!(config.seed_demo_data, parsed.seed_demo_data);
        }

        /// Malformed files produce a descriptive error instead of defaults.
        #[test]
        fn property_invalid_config_error(yaml in malformed_yaml_strategy()) {
            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let result = Config::load(file.path());
            prop_assert!(result.is_err(), "Malformed YAML should produce an error");

            let err_msg = result.unwrap_err().to_string();
            prop_assert!(err_msg.len() > 10, "Error message should be descriptive: {}", err_msg);
        }

        /// Any valid port or TTL in the environment overrides the file value.
        #[test]
        fn property_env_override(port in 1u16..=65535, ttl in 1u32..=720) {
            let _guard = lock_env();
            clear_env();

            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "server:\n  port: 1234\nauth:\n  token_ttl_hours: 3\n")
                .expect("Failed to write config");

            std::env::set_var("MAKTAB_SERVER_PORT", port.to_string());
            std::env::set_var("MAKTAB_AUTH_TOKEN_TTL_HOURS", ttl.to_string());

            let config = Config::load_with_env(file.path()).expect("Failed to load config");
            clear_env();

            prop_assert_eq!(config.server.port, port);
            prop_assert_eq!(config.auth.token_ttl_hours, ttl);
        }
    }
}
