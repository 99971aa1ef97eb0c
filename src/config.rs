// src/config.rs
// =============================================================================
// Settings for a checking run.
//
// Three layers, later ones win:
// 1. built-in defaults (Config::default)
// 2. an optional TOML file passed with --config
// 3. command-line flags (applied by the binary with Config::override_with)
//
// Every key in the file is optional:
//
//   concurrency = 5
//   timeout_ms = 8000
//   max_redirects = 10
//   user_agent = "linkpulse/0.1.0"
// =============================================================================

use crate::checker::{CheckOptions, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Checker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum probes in flight at once
    pub concurrency: usize,
    /// Deadline for each HEAD and each GET, in milliseconds
    pub timeout_ms: u64,
    /// Redirect hops followed before giving up
    pub max_redirects: usize,
    /// User-Agent header sent with every probe
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            max_redirects: 10,
            user_agent: concat!("linkpulse/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Values given on the command line; `None` keeps the lower layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub concurrency: Option<usize>,
    pub timeout_ms: Option<u64>,
}

impl Config {
    /// Loads `path` if given, otherwise returns the defaults. Validates
    /// the result either way.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Applies command-line values on top of this config and validates.
    pub fn override_with(mut self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(concurrency) = overrides.concurrency {
            self.concurrency = concurrency;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid("concurrency must be at least 1".into()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be greater than 0".into()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".into()));
        }
        Ok(())
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            concurrency: self.concurrency,
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.timeout_ms, 8000);
        assert!(config.user_agent.starts_with("linkpulse/"));
        assert_eq!(config.check_options(), CheckOptions::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("timeout_ms = 2500\n").unwrap();
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.max_redirects, 10);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(Config::from_toml("concurency = 3\n").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let overrides = ConfigOverrides {
            concurrency: Some(2),
            timeout_ms: None,
        };
        let config = Config::from_toml("concurrency = 8\ntimeout_ms = 100\n")
            .unwrap()
            .override_with(&overrides)
            .unwrap();
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.timeout_ms, 100);
    }

    #[test]
    fn test_zero_concurrency_is_invalid() {
        let overrides = ConfigOverrides {
            concurrency: Some(0),
            timeout_ms: None,
        };
        let err = Config::default().override_with(&overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
