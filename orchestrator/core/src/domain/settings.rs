// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Host Settings
//
// Where the game service lives, which key to use and where recordings go.
// Loaded from YAML with discovery, then overridden from the environment so
// container deployments and `.env` files keep working.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::config::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_host")]
    pub host: String,

    /// Omitted from the root URL when it is the scheme's default port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Sent as `X-API-Key` on every request
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_recordings_dir")]
    pub recordings_dir: PathBuf,

    /// Tags added to every scorecard in addition to the CLI ones
    #[serde(default)]
    pub default_tags: Vec<String>,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_host() -> String {
    "three.arcprize.org".to_string()
}

fn default_port() -> u16 {
    443
}

fn default_recordings_dir() -> PathBuf {
    PathBuf::from("recordings")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            api_key: String::new(),
            recordings_dir: default_recordings_dir(),
            default_tags: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.display().to_string(),
            error,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Discover a settings file using precedence order
    /// 1. ARCSWARM_CONFIG_PATH environment variable
    /// 2. ./arcswarm.yaml (working directory)
    /// 3. ~/.arcswarm/config.yaml (user home)
    pub fn discover() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("ARCSWARM_CONFIG_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        let cwd = PathBuf::from("./arcswarm.yaml");
        if cwd.exists() {
            return Some(cwd);
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".arcswarm").join("config.yaml");
            if user_config.exists() {
                return Some(user_config);
            }
        }

        None
    }

    /// Load with discovery, falling back to defaults. An explicit path must exist.
    pub fn load_or_default(cli_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut settings = if let Some(path) = cli_path {
            tracing::info!("Loading settings from explicit path: {:?}", path);
            Self::from_yaml_file(&path)?
        } else if let Some(path) = Self::discover() {
            tracing::info!("Loading settings from discovered path: {:?}", path);
            Self::from_yaml_file(path)?
        } else {
            tracing::debug!("No settings file found, using defaults");
            Self::default()
        };

        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the process environment in
    /// production).
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("ARC_API_KEY") {
            self.api_key = key;
        }
        if let Some(scheme) = lookup("SCHEME") {
            self.scheme = scheme;
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Invalid value for PORT: '{}'. Ignoring.", port),
            }
        }
        if let Some(dir) = lookup("RECORDINGS_DIR") {
            self.recordings_dir = PathBuf::from(dir);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scheme != "http" && self.scheme != "https" {
            return Err(ConfigError::Invalid(format!(
                "scheme must be 'http' or 'https', got '{}'",
                self.scheme
            )));
        }
        if self.host.is_empty() {
            return Err(ConfigError::Invalid("host cannot be empty".into()));
        }
        Ok(())
    }

    pub fn root_url(&self) -> String {
        let default_port = match self.scheme.as_str() {
            "http" => 80,
            _ => 443,
        };
        if self.port == default_port {
            format!("{}://{}", self.scheme, self.host)
        } else {
            format!("{}://{}:{}", self.scheme, self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.root_url(), "https://three.arcprize.org");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial() {
        let settings = Settings::from_yaml_str(
            "scheme: http\nhost: localhost\nport: 8001\ndefault_tags: [nightly]\n",
        )
        .unwrap();
        assert_eq!(settings.root_url(), "http://localhost:8001");
        assert_eq!(settings.default_tags, vec!["nightly".to_string()]);
        assert_eq!(settings.recordings_dir, PathBuf::from("recordings"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("ARC_API_KEY", "secret"),
            ("SCHEME", "http"),
            ("HOST", "127.0.0.1"),
            ("PORT", "not-a-port"),
            ("RECORDINGS_DIR", "/tmp/rec"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_overrides_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(settings.api_key, "secret");
        assert_eq!(settings.port, 443);
        assert_eq!(settings.root_url(), "http://127.0.0.1:443");
        assert_eq!(settings.recordings_dir, PathBuf::from("/tmp/rec"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            Settings::load_or_default(Some(missing)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_invalid_scheme() {
        let settings = Settings::from_yaml_str("scheme: ftp\n").unwrap();
        assert!(settings.validate().is_err());
    }
}
