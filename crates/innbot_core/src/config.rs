//! Bot configuration.
//!
//! # Responsibility
//! - Load settings from a TOML file with defaults for every optional field.
//! - Apply the token environment override and validate the result.
//!
//! # Invariants
//! - The bot token is only required by the chat loop (`require_token`).
//! - Timeouts are non-zero after `validate()`.

use crate::registry::egrul_client::DEFAULT_REGISTRY_URL;
use crate::transport::telegram::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `telegram.token`.
pub const TOKEN_ENV_VAR: &str = "INNBOT_TOKEN";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    MissingToken,
    ZeroTimeout(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
            Self::MissingToken => write!(
                f,
                "bot token is not set; use `telegram.token` or {TOKEN_ENV_VAR}"
            ),
            Self::ZeroTimeout(field) => write!(f, "`{field}` must be greater than zero"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::MissingToken | Self::ZeroTimeout(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub token: String,
    pub api_base: String,
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            poll_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Logging settings; `None` fields fall back to build defaults / stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub dir: Option<String>,
}

impl BotConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Loads `path` (defaults when `None`), applies `INNBOT_TOKEN`, validates.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_token = std::env::var(TOKEN_ENV_VAR).ok();
        Self::load_with_token_override(path, env_token)
    }

    /// Same as [`BotConfig::load`] with an explicit token override.
    pub fn load_with_token_override(
        path: Option<&Path>,
        token_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };
        if let Some(token) = token_override.filter(|token| !token.trim().is_empty()) {
            config.telegram.token = token;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.telegram.poll_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("telegram.poll_timeout_secs"));
        }
        if self.registry.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("registry.timeout_secs"));
        }
        Ok(())
    }

    /// Returns the trimmed bot token.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        let token = self.telegram.token.trim();
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(token)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.telegram.poll_timeout_secs)
    }

    pub fn registry_timeout(&self) -> Duration {
        Duration::from_secs(self.registry.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::{BotConfig, ConfigError};
    use crate::registry::egrul_client::DEFAULT_REGISTRY_URL;

    #[test]
    fn empty_document_uses_defaults() {
        let config = BotConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(config, BotConfig::default());
        assert_eq!(config.registry.base_url, DEFAULT_REGISTRY_URL);
        assert_eq!(config.telegram.poll_timeout_secs, 30);
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = BotConfig::from_toml_str(
            r#"
            [registry]
            timeout_secs = 5

            [logging]
            level = "debug"
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(config.registry.timeout_secs, 5);
        assert_eq!(config.registry.base_url, DEFAULT_REGISTRY_URL);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = BotConfig::from_toml_str("[telegram]\npoll_timeout_secs = 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroTimeout("telegram.poll_timeout_secs"))
        ));
    }

    #[test]
    fn missing_token_is_reported_only_on_demand() {
        let config = BotConfig::default();
        assert!(config.validate().is_ok());
        assert!(matches!(
            config.require_token(),
            Err(ConfigError::MissingToken)
        ));
    }
}
