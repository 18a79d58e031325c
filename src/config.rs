use crate::submit::{DelaySubmitPort, HttpSubmitPort, SubmitPort};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const ENV_CMS_URL: &str = "RELIEF_CMS_URL";
pub const ENV_CMS_TOKEN: &str = "RELIEF_CMS_TOKEN";
pub const ENV_SUBMIT_DELAY_MS: &str = "RELIEF_SUBMIT_DELAY_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("{name} must be a whole number of milliseconds, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    pub base_url: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitConfig {
    /// Artificial wait used when no content service is configured.
    pub delay_ms: u64,
    pub timeout_ms: u64,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1_000,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cms: CmsConfig,
    pub submit: SubmitConfig,
    pub log: LogConfig,
}

impl Config {
    /// Defaults, then the YAML file if given, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_yaml_str(&source)?
            }
            None => Self::default(),
        };

        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_CMS_URL).filter(|v| !v.is_empty()) {
            self.cms.base_url = Some(url);
        }
        if let Some(token) = lookup(ENV_CMS_TOKEN).filter(|v| !v.is_empty()) {
            self.cms.access_token = Some(token);
        }
        if let Some(delay) = lookup(ENV_SUBMIT_DELAY_MS) {
            self.submit.delay_ms =
                delay
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        name: ENV_SUBMIT_DELAY_MS,
                        value: delay.clone(),
                    })?;
        }
        Ok(())
    }

    /// The real content service when one is configured, the fixed-delay
    /// stand-in otherwise.
    pub fn submit_port(&self) -> Arc<dyn SubmitPort> {
        match self.cms.base_url.as_deref().filter(|url| !url.is_empty()) {
            Some(base_url) => Arc::new(
                HttpSubmitPort::new(base_url, Duration::from_millis(self.submit.timeout_ms.max(1)))
                    .with_access_token(self.cms.access_token.clone()),
            ),
            None => Arc::new(DelaySubmitPort::new(Duration::from_millis(self.submit.delay_ms))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError, ENV_CMS_TOKEN, ENV_CMS_URL, ENV_SUBMIT_DELAY_MS};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_use_one_second_delay() {
        let config = Config::from_yaml_str("").expect("empty config");
        assert_eq!(config.submit.delay_ms, 1_000);
        assert_eq!(config.cms.base_url, None);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml_str(
            r#"
cms:
  base_url: http://localhost:1337
submit:
  delay_ms: 250
"#,
        )
        .expect("config");

        assert_eq!(config.cms.base_url.as_deref(), Some("http://localhost:1337"));
        assert_eq!(config.submit.delay_ms, 250);
        assert_eq!(config.submit.timeout_ms, 10_000);
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = Config::from_yaml_str("cms:\n  base_url: http://file\n").expect("config");
        config
            .apply_env(env(&[
                (ENV_CMS_URL, "http://env"),
                (ENV_CMS_TOKEN, "secret"),
                (ENV_SUBMIT_DELAY_MS, "5"),
            ]))
            .expect("env");

        assert_eq!(config.cms.base_url.as_deref(), Some("http://env"));
        assert_eq!(config.cms.access_token.as_deref(), Some("secret"));
        assert_eq!(config.submit.delay_ms, 5);
    }

    #[test]
    fn bad_delay_is_reported() {
        let mut config = Config::default();
        let err = config
            .apply_env(env(&[(ENV_SUBMIT_DELAY_MS, "soon")]))
            .expect_err("should reject");
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn unknown_yaml_shape_is_an_error() {
        assert!(Config::from_yaml_str("submit: later").is_err());
    }
}
