//! Server configuration parsing.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use tower_http::cors::{Any, CorsLayer};

/// Server configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server bind settings.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1" or "0.0.0.0").
    pub bind: String,
    pub port: u16,
}

/// Where the history database lives.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Path to the fjall database directory. Created if missing.
    pub path: String,
}

/// Cross-origin settings. Disabled unless configured.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    /// `"*"` allows any origin.
    pub allow_origins: Vec<String>,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds.
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allow_origins: Vec::new(),
            allow_methods: ["GET", "POST", "DELETE"].map(String::from).to_vec(),
            allow_headers: vec!["content-type".to_string()],
            allow_credentials: false,
            max_age: 3600,
        }
    }
}

impl CorsConfig {
    /// Build the tower-http layer. A disabled config denies cross-origin requests.
    pub fn layer(&self) -> CorsLayer {
        if !self.enabled {
            return CorsLayer::new();
        }

        let wildcard = self.allow_origins.iter().any(|o| o == "*");
        let cors = if wildcard {
            CorsLayer::new().allow_origin(Any)
        } else {
            CorsLayer::new().allow_origin(parse_all::<axum::http::HeaderValue>(&self.allow_origins))
        };

        let cors = cors
            .allow_methods(parse_all::<axum::http::Method>(&self.allow_methods))
            .allow_headers(parse_all::<axum::http::HeaderName>(&self.allow_headers))
            .max_age(Duration::from_secs(self.max_age));

        // tower-http rejects credentials combined with a wildcard origin.
        if self.allow_credentials && !wildcard {
            cors.allow_credentials(true)
        } else {
            cors
        }
    }
}

// Entries that fail to parse are skipped.
fn parse_all<T: std::str::FromStr>(values: &[String]) -> Vec<T> {
    values.iter().filter_map(|v| v.parse().ok()).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info,persona_quiz=debug"`.
    pub level: String,
    pub format: LogFormat,
    /// `"stdout"`, `"stderr"`, or a file path to append to.
    pub output: String,
    pub color: bool,
    /// Include the event target (module path).
    pub target: bool,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            color: true,
            target: false,
            timestamps: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Get the socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(String, std::io::Error),
    /// TOML parse error.
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read config file '{}': {}", path, e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[server]
bind = "127.0.0.1"
port = 8080

[store]
path = ".persona-quiz"

[cors]
enabled = true
allow_origins = ["*"]

[logging]
level = "debug"
format = "json"
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.store.path, ".persona-quiz");
        assert!(config.cors.enabled);
        assert_eq!(config.cors.allow_origins, vec!["*"]);
        assert_eq!(config.cors.max_age, 3600);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.output, "stderr");
    }

    #[test]
    fn test_optional_sections_default() {
        let toml = r#"
[server]
bind = "0.0.0.0"
port = 3000

[store]
path = "/var/lib/persona-quiz"
"#;
        let config = Config::parse(toml).unwrap();
        assert!(!config.cors.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_sample_config_parses() {
        let config = Config::parse(include_str!("../../persona-quiz-server.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cors.allow_methods.len(), 3);
    }

    #[test]
    fn test_cors_layer_with_credentials_and_wildcard() {
        let cors = CorsConfig {
            enabled: true,
            allow_origins: vec!["*".into()],
            allow_credentials: true,
            ..CorsConfig::default()
        };
        let _layer = cors.layer();
    }

    #[test]
    fn test_missing_store_is_an_error() {
        let toml = r#"
[server]
bind = "0.0.0.0"
port = 3000
"#;
        assert!(matches!(Config::parse(toml), Err(ConfigError::Parse(_))));
    }
}
