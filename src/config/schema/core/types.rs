use super::super::{LimitsConfig, TelegramConfig};
use crate::error::ConfigError;
use crate::messages::Messages;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default = "default_locale")]
    pub locale: String,

    /// Directory for per-request scratch files. Defaults to the OS temp dir.
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

fn default_locale() -> String {
    "en".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            locale: default_locale(),
            temp_dir: None,
            telegram: TelegramConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn scratch_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Reply catalog for the detected locale.
    #[must_use]
    pub fn messages(&self) -> Messages {
        Messages::new(self.resolve_locale())
    }

    /// Check limits always; check the bot token only when the bot is about to
    /// connect (offline CLI commands run without one).
    pub fn validate(&self, require_token: bool) -> Result<(), ConfigError> {
        if require_token && self.telegram.bot_token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "telegram.bot_token is empty; set LINKCAP_BOT_TOKEN or add it to config.toml"
                    .into(),
            ));
        }

        if self.limits.max_links_per_row == 0 {
            return Err(ConfigError::Validation(
                "limits.max_links_per_row must be at least 1".into(),
            ));
        }

        let min_budget = self.messages().longest_notice_chars();
        if self.limits.message_budget < min_budget {
            return Err(ConfigError::Validation(format!(
                "limits.message_budget must be at least {min_budget} characters"
            )));
        }

        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::Validation(
                "limits.max_file_size_mb must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
