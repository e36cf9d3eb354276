//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the Claude API key.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Personal OS configuration.
///
/// Every field is optional in the file; a missing file yields the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub claude: ClaudeConfig,
    #[serde(default)]
    pub dialogue: DialogueConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaudeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// Maximum number of Claude replies before giving up on the conversation.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// Seconds to wait for a single Claude reply.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl DialogueConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

const fn default_max_tokens() -> u32 {
    2000
}

const fn default_max_turns() -> usize {
    20
}

const fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when the file does not exist, then apply the environment.
    pub fn load() -> Result<Self> {
        let path = config_path();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            Self::parse(&contents)?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_api_key(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    /// Save configuration to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).with_context(|| "Failed to parse config.toml")
    }

    /// Override the API key with a value from the environment, if non-empty.
    pub fn apply_api_key(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.claude.api_key = Some(key);
        }
    }
}

/// Get the Personal OS config directory (~/.personal-os).
pub fn config_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("./.personal-os"),
        |d| d.home_dir().join(".personal-os"),
    )
}

/// Get the config file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.claude.api_key.is_none());
        assert_eq!(config.claude.max_tokens, 2000);
        assert_eq!(config.dialogue.max_turns, 20);
        assert_eq!(config.dialogue.request_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
[claude]
api_key = "sk-ant-test"

[dialogue]
max_turns = 5
"#,
        )
        .unwrap();

        assert_eq!(config.claude.api_key.as_deref(), Some("sk-ant-test"));
        assert_eq!(config.claude.model, default_model());
        assert_eq!(config.dialogue.max_turns, 5);
        assert_eq!(config.dialogue.request_timeout_secs, 120);
    }

    #[test]
    fn environment_key_overrides_file() {
        let mut config = Config::parse("[claude]\napi_key = \"from-file\"").unwrap();
        config.apply_api_key(Some("from-env".to_string()));
        assert_eq!(config.claude.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn blank_environment_key_is_ignored() {
        let mut config = Config::parse("[claude]\napi_key = \"from-file\"").unwrap();
        config.apply_api_key(Some("   ".to_string()));
        assert_eq!(config.claude.api_key.as_deref(), Some("from-file"));

        config.apply_api_key(None);
        assert_eq!(config.claude.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn defaults_round_trip_without_api_key() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!text.contains("api_key"));
        let parsed = Config::parse(&text).unwrap();
        assert_eq!(parsed.dialogue.max_turns, 20);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::parse("[claude\nmodel = 1").is_err());
    }
}
