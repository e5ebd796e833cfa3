// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use portal_core::error::{ConfigError, ConfigResult};
use portal_core::ActiveStatusSet;

// =============================================================================
// ApiConfig
// =============================================================================

/// Configuration for the API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host address.
    pub host: IpAddr,
    /// Server port.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Member directory configuration.
    pub directory: DirectoryConfig,
    /// Request timeout.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Graceful shutdown timeout.
    #[serde(with = "humantime_serde")]
    pub shutdown_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8080,
            cors: CorsConfig::default(),
            auth: AuthConfig::default(),
            directory: DirectoryConfig::default(),
            request_timeout: Duration::from_secs(30),
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the directory endpoint.
    pub fn with_directory_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.directory.endpoint = endpoint.into();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.directory.endpoint.trim().is_empty() {
            return Err(ConfigError::missing_field("directory.endpoint"));
        }
        if !self.directory.endpoint.starts_with("http") {
            return Err(ConfigError::validation(
                "directory.endpoint",
                "must be an http(s) URL",
            ));
        }
        if self.auth.allowed_domain.trim().is_empty() {
            return Err(ConfigError::missing_field("auth.allowed_domain"));
        }
        if self.auth.allowed_domain.contains('@') {
            return Err(ConfigError::validation(
                "auth.allowed_domain",
                "must be a bare domain, without '@'",
            ));
        }
        if self.auth.active_statuses.is_empty() {
            return Err(ConfigError::validation(
                "auth.active_statuses",
                "must not be empty",
            ));
        }
        if self.auth.session_ttl < Duration::from_secs(60) {
            return Err(ConfigError::validation(
                "auth.session_ttl",
                "must be at least 60s",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// AuthConfig
// =============================================================================

/// Authentication and session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// The organization e-mail domain; sign-ins from any other domain are
    /// rejected.
    pub allowed_domain: String,
    /// Status spellings accepted as "active member".
    pub active_statuses: Vec<String>,
    /// Assertion issuers the portal trusts.
    pub trusted_issuers: Vec<String>,
    /// How long a session stays valid.
    #[serde(with = "humantime_serde")]
    pub session_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allowed_domain: "infobiojr.com.br".to_string(),
            active_statuses: ActiveStatusSet::default()
                .spellings()
                .to_vec(),
            trusted_issuers: vec![
                "https://accounts.google.com".to_string(),
                "accounts.google.com".to_string(),
            ],
            session_ttl: Duration::from_secs(8 * 60 * 60),
        }
    }
}

impl AuthConfig {
    /// The active-status predicate for this configuration.
    pub fn status_set(&self) -> ActiveStatusSet {
        ActiveStatusSet::new(self.active_statuses.iter().cloned())
    }
}

// =============================================================================
// DirectoryConfig
// =============================================================================

/// Member directory endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// The directory endpoint URL.
    pub endpoint: String,
    /// Request timeout for directory calls.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout: Duration::from_secs(15),
        }
    }
}

// =============================================================================
// CorsConfig
// =============================================================================

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins.
    pub allowed_origins: Vec<String>,
    /// Allowed methods.
    pub allowed_methods: Vec<String>,
    /// Max age for preflight cache (seconds).
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec![
                "GET".to_string(),
                "POST".to_string(),
                "PATCH".to_string(),
                "OPTIONS".to_string(),
            ],
            max_age: 3600,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_config() -> ApiConfig {
        ApiConfig::default().with_directory_endpoint("https://script.example/exec")
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.allowed_domain, "infobiojr.com.br");
        assert!(config.auth.status_set().matches("ativo"));
    }

    #[test]
    fn test_validate_requires_endpoint() {
        let config = ApiConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { .. })
        ));
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_at_sign_in_domain() {
        let mut config = valid_config();
        config.auth.allowed_domain = "@infobiojr.com.br".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_session_ttl() {
        let mut config = valid_config();
        config.auth.session_ttl = Duration::from_secs(5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port: 9090\ndirectory:\n  endpoint: https://script.example/exec\n"
        )
        .unwrap();

        let config = ApiConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.directory.endpoint, "https://script.example/exec");
        // Unspecified sections keep their defaults.
        assert_eq!(config.auth.allowed_domain, "infobiojr.com.br");
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port: [not a number").unwrap();
        assert!(matches!(
            ApiConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
