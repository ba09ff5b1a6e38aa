//! Configuration loading for the Ferrite runtime.
//!
//! Configuration is layered with figment; later sources override
//! earlier ones:
//!
//! 1. Built-in defaults
//! 2. `ferrite.toml` in the working directory
//! 3. Environment variables (`FERRITE_*`, `__` as section separator,
//!    e.g. `FERRITE_BOT__TOKEN=...` → `bot.token`)
//!
//! ```rust,ignore
//! let config = FerriteConfig::load()?;
//! ```

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Default config file searched in the working directory.
pub const CONFIG_FILE: &str = "ferrite.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FerriteConfig {
    /// Bot API credentials and endpoint.
    #[serde(default)]
    pub bot: BotConfig,

    /// Long-polling behavior.
    #[serde(default)]
    pub polling: PollingConfig,

    /// Ephemeral private-message cleanup.
    #[serde(default)]
    pub ephemeral: EphemeralConfig,

    /// Logging setup.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bot API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Bot API token. Required; there is no sensible default.
    #[serde(default)]
    pub token: String,

    /// Base URL of the bot API server.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request HTTP timeout in seconds.
    ///
    /// Must exceed the long-poll timeout or every `getUpdates` call
    /// aborts early; validation enforces this.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_request_timeout_secs() -> u64 {
    40
}

/// Long-polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Long-poll hold time in seconds, passed to `getUpdates`.
    #[serde(default = "default_poll_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum updates per batch (platform caps this at 100).
    #[serde(default = "default_poll_limit")]
    pub limit: u8,

    /// Update kinds to receive; empty means everything except the
    /// kinds the platform excludes by default.
    #[serde(default)]
    pub allowed_updates: Vec<String>,

    /// Initial retry delay after a failed poll, in milliseconds.
    #[serde(default = "default_backoff_initial_ms")]
    pub backoff_initial_ms: u64,

    /// Upper bound on the retry delay, in milliseconds.
    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_poll_timeout_secs(),
            limit: default_poll_limit(),
            allowed_updates: Vec::new(),
            backoff_initial_ms: default_backoff_initial_ms(),
            backoff_max_ms: default_backoff_max_ms(),
        }
    }
}

fn default_poll_timeout_secs() -> u64 {
    30
}

fn default_poll_limit() -> u8 {
    100
}

fn default_backoff_initial_ms() -> u64 {
    1000
}

fn default_backoff_max_ms() -> u64 {
    30000
}

/// Ephemeral-message cleanup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EphemeralConfig {
    /// Whether private messages are deleted after handling.
    #[serde(default)]
    pub enabled: bool,

    /// Delay before deletion, in seconds.
    #[serde(default = "default_ephemeral_delay_secs")]
    pub delay_secs: u64,
}

impl Default for EphemeralConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_secs: default_ephemeral_delay_secs(),
        }
    }
}

fn default_ephemeral_delay_secs() -> u64 {
    60
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error).
    ///
    /// `RUST_LOG` overrides this when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Include the emitting module path in log lines.
    #[serde(default = "default_true")]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            with_target: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl FerriteConfig {
    /// Loads configuration from the default file and environment.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Loads configuration from a specific TOML file plus environment.
    pub fn load_from(path: &str) -> ConfigResult<Self> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("FERRITE_").split("__"))
            .extract()?;
        config.validate()?;
        debug!(api_url = %config.bot.api_url, "configuration loaded");
        Ok(config)
    }

    /// Checks cross-field constraints figment cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.bot.token.is_empty() {
            return Err(ConfigError::validation(
                "bot.token is required (set FERRITE_BOT__TOKEN or ferrite.toml)",
            ));
        }
        if !self.bot.api_url.starts_with("http://") && !self.bot.api_url.starts_with("https://") {
            return Err(ConfigError::validation(format!(
                "bot.api_url must be an http(s) URL, got '{}'",
                self.bot.api_url
            )));
        }
        if self.polling.limit == 0 || self.polling.limit > 100 {
            return Err(ConfigError::validation(
                "polling.limit must be between 1 and 100",
            ));
        }
        if self.bot.request_timeout_secs <= self.polling.timeout_secs {
            return Err(ConfigError::validation(
                "bot.request_timeout_secs must exceed polling.timeout_secs",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_need_only_a_token() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("FERRITE_BOT__TOKEN", "123:abc");
            let config = FerriteConfig::load().expect("load");
            assert_eq!(config.bot.token, "123:abc");
            assert_eq!(config.bot.api_url, "https://api.telegram.org");
            assert_eq!(config.polling.timeout_secs, 30);
            assert_eq!(config.polling.limit, 100);
            assert!(!config.ephemeral.enabled);
            Ok(())
        });
    }

    #[test]
    fn file_values_are_overridden_by_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    [bot]
                    token = "from-file"
                    api_url = "http://localhost:8081"

                    [ephemeral]
                    enabled = true
                    delay_secs = 5
                "#,
            )?;
            jail.set_env("FERRITE_BOT__TOKEN", "from-env");
            let config = FerriteConfig::load().expect("load");
            assert_eq!(config.bot.token, "from-env");
            assert_eq!(config.bot.api_url, "http://localhost:8081");
            assert!(config.ephemeral.enabled);
            assert_eq!(config.ephemeral.delay_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn missing_token_fails_validation() {
        figment::Jail::expect_with(|jail| {
            jail.clear_env();
            let err = FerriteConfig::load().unwrap_err();
            assert!(matches!(err, ConfigError::Validation { .. }));
            Ok(())
        });
    }

    #[test]
    fn poll_limit_is_bounded() {
        let mut config = FerriteConfig {
            bot: BotConfig {
                token: "t".into(),
                ..BotConfig::default()
            },
            ..FerriteConfig::default()
        };
        config.polling.limit = 0;
        assert!(config.validate().is_err());
        config.polling.limit = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn request_timeout_must_cover_long_poll() {
        let mut config = FerriteConfig {
            bot: BotConfig {
                token: "t".into(),
                ..BotConfig::default()
            },
            ..FerriteConfig::default()
        };
        config.bot.request_timeout_secs = 30;
        config.polling.timeout_secs = 30;
        assert!(config.validate().is_err());
    }
}
