//! Environment-driven application configuration.
//!
//! Every setting has a default, so the service starts with no environment
//! at all. Values that fail to parse are reported with the variable name.

use std::env;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default prefix under which the HTTP routes are mounted.
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Default application name reported by the health endpoint.
pub const DEFAULT_APP_NAME: &str = "TaskFlow API";

/// Configuration error type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    /// A variable is set to a value that cannot be parsed.
    #[error("failed to parse environment variable '{key}': {details}")]
    ParseError {
        /// Variable name.
        key: String,
        /// Parser message.
        details: String,
    },
}

/// Deployment environment selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    /// Local development. Human-readable logs.
    #[default]
    Development,
    /// Deployed service. JSON logs.
    Production,
}

impl Environment {
    /// Reads `APP_ENV`. Anything other than `production` (in any case)
    /// selects development.
    #[must_use]
    pub fn from_env() -> Self {
        let app_env = env_or_default("APP_ENV", "development");
        if app_env.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// Returns `true` for [`Environment::Production`].
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Returns `true` for [`Environment::Development`].
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Returns the lower-case environment name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

/// Configuration that can be loaded from environment variables.
pub trait FromEnv: Sized {
    /// Loads the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is missing or malformed.
    fn from_env() -> Result<Self, ConfigError>;
}

/// Returns the variable's value, or `default` when it is unset.
#[must_use]
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Returns the variable's value.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnvVar`] when the variable is unset.
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind, `HOST`.
    pub host: String,
    /// Port to bind, `PORT`.
    pub port: u16,
}

impl ServerConfig {
    /// Returns the listener address as `host:port`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_or_default("PORT", &DEFAULT_PORT.to_string())
            .parse()
            .map_err(|err: std::num::ParseIntError| ConfigError::ParseError {
                key: "PORT".to_owned(),
                details: err.to_string(),
            })?;
        Ok(Self { host, port })
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// HTTP listener.
    pub server: ServerConfig,
    /// Route prefix, `API_PREFIX`.
    pub api_prefix: String,
    /// Name reported by the health endpoint, `APP_NAME`.
    pub app_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
            app_name: DEFAULT_APP_NAME.to_owned(),
        }
    }
}

impl FromEnv for AppConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            api_prefix: normalize_prefix(&env_or_default("API_PREFIX", DEFAULT_API_PREFIX)),
            app_name: env_or_default("APP_NAME", DEFAULT_APP_NAME),
        })
    }
}

/// Ensures a leading slash and strips trailing slashes. An empty prefix
/// mounts routes at the root.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}
