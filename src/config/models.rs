// src/config/models.rs
use anyhow::{bail, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub checks: ChecksConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChecksConfig {
    pub interval_secs: u64,
    pub timeout_secs: u64,
    pub mongo_command: String,
    pub redis_command: String,
    pub app_status_url: Url,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            timeout_secs: 5,
            mongo_command: r#"mongosh --quiet --eval "db.runCommand({ping: 1}).ok""#.to_string(),
            redis_command: "redis-cli -h 127.0.0.1 -p 6379 ping".to_string(),
            app_status_url: Url::parse("http://127.0.0.1:80/status")
                .expect("default status URL is valid"),
        }
    }
}

impl ChecksConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.checks.interval_secs == 0 {
            bail!("checks.interval_secs must be greater than zero");
        }
        if self.checks.timeout_secs == 0 {
            bail!("checks.timeout_secs must be greater than zero");
        }
        if self.checks.mongo_command.trim().is_empty() {
            bail!("checks.mongo_command must not be empty");
        }
        if self.checks.redis_command.trim().is_empty() {
            bail!("checks.redis_command must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_deployment() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.checks.interval(), Duration::from_secs(10));
        assert_eq!(config.checks.app_status_url.as_str(), "http://127.0.0.1:80/status");
        config.validate().unwrap();
    }

    #[test]
    fn parses_partial_yaml_over_defaults() {
        let yaml = r#"
server:
  port: 8081
checks:
  interval_secs: 3
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.checks.interval_secs, 3);
        // Untouched fields keep their defaults
        assert_eq!(config.checks.timeout_secs, 5);
        assert_eq!(config.checks.redis_command, "redis-cli -h 127.0.0.1 -p 6379 ping");
    }

    #[test]
    fn rejects_zero_interval() {
        let mut config = Config::default();
        config.checks.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_probe_command() {
        let mut config = Config::default();
        config.checks.mongo_command = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
