use serde::{Deserialize, Serialize};
use std::fmt;

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}
fn default_timeout_ms() -> u64 {
    30_000
}

/// Deployment environment the client targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL (defaults to the local development server).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds (defaults to 30 000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Target environment (defaults to `development`).
    #[serde(default)]
    pub environment: Environment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads configuration from a file path, merged with defaults, with
    /// `DWELLO_`-prefixed environment variables taking precedence.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &std::path::Path) -> Result<Self, figment::Error> {
        use figment::{
            Figment,
            providers::{Env, Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("DWELLO_"))
            .extract()
    }

    /// Loads configuration from `DWELLO_`-prefixed environment variables
    /// alone, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if a variable fails to parse.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self, figment::Error> {
        use figment::{Figment, providers::Env, providers::Serialized};
        Figment::from(Serialized::defaults(ClientConfig::default()))
            .merge(Env::prefixed("DWELLO_"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_YAML: &str = r#"
base_url: "https://api.dwello.app"
timeout_ms: 10000
environment: production
"#;

    #[test]
    fn test_default_config() {
        let c = ClientConfig::default();
        assert_eq!(c.base_url, "http://127.0.0.1:3000");
        assert_eq!(c.timeout_ms, 30_000);
        assert_eq!(c.environment, Environment::Development);
    }

    #[test]
    fn test_from_yaml_full() {
        let c = ClientConfig::from_yaml(SAMPLE_YAML).unwrap();
        assert_eq!(c.base_url, "https://api.dwello.app");
        assert_eq!(c.timeout_ms, 10_000);
        assert_eq!(c.environment, Environment::Production);
    }

    #[test]
    fn test_from_yaml_defaults_applied() {
        let c = ClientConfig::from_yaml("base_url: \"https://staging.dwello.app\"").unwrap();
        assert_eq!(c.base_url, "https://staging.dwello.app");
        assert_eq!(c.timeout_ms, 30_000); // default preserved
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Staging.to_string(), "staging");
    }
}
