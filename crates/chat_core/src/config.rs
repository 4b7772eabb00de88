use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::config_json_path;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
/// Characters revealed per second by the typing effect.
pub const DEFAULT_REVEAL_RATE: u32 = 45;

const CONFIG_FILE_PATH: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the answering service.
    pub api_base: String,
    pub reveal_rate: u32,
    /// Reveal successful answers incrementally.
    pub typing_effect: bool,
    pub http_proxy: String,
    pub https_proxy: String,
}

fn parse_bool_env(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            reveal_rate: DEFAULT_REVEAL_RATE,
            typing_effect: true,
            http_proxy: String::new(),
            https_proxy: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from `~/.legalmind/config.json`, falling back to
    /// `./config.toml`, then apply environment overrides. Unreadable files are
    /// skipped with a warning.
    pub fn load() -> Self {
        let mut config = Config::default();

        let json_path = config_json_path();
        let toml_path = Path::new(CONFIG_FILE_PATH);
        for path in [json_path.as_path(), toml_path] {
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(file_config) => {
                    config = file_config;
                    break;
                }
                Err(e) => tracing::warn!("Ignoring config file: {}", e),
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Read a configuration file; the format is chosen by extension.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Override fields from environment lookups.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_base) = lookup("LEGALMIND_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(rate) = lookup("LEGALMIND_REVEAL_RATE") {
            match rate.trim().parse::<u32>() {
                Ok(rate) if rate > 0 => self.reveal_rate = rate,
                _ => tracing::warn!("Ignoring invalid LEGALMIND_REVEAL_RATE {:?}", rate),
            }
        }
        if let Some(typing) = lookup("LEGALMIND_TYPING") {
            self.typing_effect = parse_bool_env(&typing);
        }
        if let Some(http_proxy) = lookup("HTTP_PROXY") {
            self.http_proxy = http_proxy;
        }
        if let Some(https_proxy) = lookup("HTTPS_PROXY") {
            self.https_proxy = https_proxy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parse_bool_env_true_values() {
        for value in ["1", "true", "TRUE", " yes ", "Y", "on"] {
            assert!(parse_bool_env(value), "value {value:?} should be true");
        }
    }

    #[test]
    fn parse_bool_env_false_values() {
        for value in ["0", "false", "no", "off", "", "  "] {
            assert!(!parse_bool_env(value), "value {value:?} should be false");
        }
    }

    #[test]
    fn env_overrides_fields() {
        let env: HashMap<&str, &str> = [
            ("LEGALMIND_API_BASE", "http://example.test:9000"),
            ("LEGALMIND_REVEAL_RATE", "12"),
            ("LEGALMIND_TYPING", "off"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_base, "http://example.test:9000");
        assert_eq!(config.reveal_rate, 12);
        assert!(!config.typing_effect);
    }

    #[test]
    fn invalid_reveal_rate_is_ignored() {
        let mut config = Config::default();
        config.apply_env(|key| (key == "LEGALMIND_REVEAL_RATE").then(|| "0".to_string()));
        assert_eq!(config.reveal_rate, DEFAULT_REVEAL_RATE);
    }

    #[test]
    fn reads_partial_toml_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_base = \"http://127.0.0.1:8001\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:8001");
        assert_eq!(config.reveal_rate, DEFAULT_REVEAL_RATE);
        assert!(config.typing_effect);
    }

    #[test]
    fn reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"reveal_rate": 90, "typing_effect": false}"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.reveal_rate, 90);
        assert!(!config.typing_effect);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api_base: x").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "yaml"
        ));
    }
}
