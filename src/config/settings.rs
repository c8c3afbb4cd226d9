//! Settings structures for searchfront configuration

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub engine: EngineSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that cannot be used as-is, such as durations out of range
    pub fn validate(&self) -> Result<()> {
        seconds("engine.retry_delay", self.engine.retry_delay)?;
        seconds("outgoing.request_timeout", self.outgoing.request_timeout)?;
        Ok(())
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        self.merge_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any variable source. Split out of `merge_env`
    /// so tests don't have to mutate the process environment.
    pub fn merge_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("SEARCHFRONT_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("ELASTIC_NODE") {
            self.engine.node = val;
        }
        if let Some(val) = lookup("ELASTIC_INDEX") {
            self.engine.index = val;
        }
        if let Some(val) = lookup("ELASTIC_API_KEY") {
            self.engine.api_key = Some(val);
        }
        if let Some(val) = lookup("PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("BIND_ADDRESS") {
            self.server.bind_address = val;
        }
    }
}

/// A duration given in seconds. Negative, NaN, infinite and overflowing
/// values are errors.
pub fn seconds(name: &str, value: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|e| anyhow!("invalid {}: {} ({})", name, value, e))
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
    /// Instance name reported in logs and the health payload
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "searchfront".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

/// Search engine connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Base URL of the engine node
    pub node: String,
    /// Index holding the catalog documents
    pub index: String,
    /// Probe attempts made at startup before giving up
    pub connect_attempts: u32,
    /// Seconds to wait between startup probe attempts
    pub retry_delay: f64,
    /// Probe attempts made per /health request
    pub health_attempts: u32,
    /// API key sent as `Authorization: ApiKey <key>`
    pub api_key: Option<String>,
    /// Basic auth username
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
}

impl EngineSettings {
    /// Delay between probe attempts; zero if the configured value is unusable
    pub fn retry_delay(&self) -> Duration {
        seconds("engine.retry_delay", self.retry_delay).unwrap_or_default()
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            node: "http://localhost:9200".to_string(),
            index: "documents".to_string(),
            connect_attempts: 5,
            retry_delay: 5.0,
            health_attempts: 1,
            api_key: None,
            username: None,
            password: None,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds
    pub request_timeout: f64,
    /// Idle connections kept per host
    pub pool_maxsize: usize,
    /// Verify TLS certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.engine.index, "documents");
        assert_eq!(settings.engine.connect_attempts, 5);
        assert_eq!(settings.engine.retry_delay(), Duration::from_secs(5));
        assert!(!settings.general.debug);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "engine:\n  node: http://es:9200\nserver:\n  port: 8080\n";
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.engine.node, "http://es:9200");
        assert_eq!(settings.engine.index, "documents");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.bind_address, "0.0.0.0");
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| match key {
            "ELASTIC_NODE" => Some("http://search:9200".to_string()),
            "PORT" => Some("4000".to_string()),
            "SEARCHFRONT_DEBUG" => Some("true".to_string()),
            _ => None,
        });
        assert_eq!(settings.engine.node, "http://search:9200");
        assert_eq!(settings.server.port, 4000);
        assert!(settings.general.debug);
    }

    #[test]
    fn test_out_of_range_durations_are_rejected() {
        for yaml in [
            "engine:\n  retry_delay: 1.0e30\n",
            "engine:\n  retry_delay: -1.0\n",
            "outgoing:\n  request_timeout: .inf\n",
            "outgoing:\n  request_timeout: .nan\n",
        ] {
            let err = Settings::from_yaml(yaml).unwrap_err();
            assert!(err.to_string().starts_with("invalid "), "{yaml}: {err}");
        }
    }

    #[test]
    fn test_retry_delay_accessor_never_panics() {
        let engine = EngineSettings {
            retry_delay: 1.0e30,
            ..Default::default()
        };
        assert_eq!(engine.retry_delay(), Duration::ZERO);

        let engine = EngineSettings {
            retry_delay: 0.25,
            ..Default::default()
        };
        assert_eq!(engine.retry_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_port_is_ignored() {
        let mut settings = Settings::default();
        settings.merge_vars(|key| (key == "PORT").then(|| "not-a-port".to_string()));
        assert_eq!(settings.server.port, 3000);
    }
}
