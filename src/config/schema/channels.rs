use crate::channels::telegram::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from @BotFather. Usually supplied through `LINKCAP_BOT_TOKEN`.
    #[serde(default)]
    pub bot_token: String,
    /// Usernames or numeric user ids allowed to talk to the bot. `"*"` allows everyone.
    #[serde(default = "default_allowed_users")]
    pub allowed_users: Vec<String>,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Long-poll timeout passed to `getUpdates`.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

fn default_allowed_users() -> Vec<String> {
    vec!["*".into()]
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.into()
}

fn default_poll_timeout_secs() -> u64 {
    30
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            allowed_users: default_allowed_users(),
            api_base: default_api_base(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("allowed_users", &self.allowed_users)
            .field("api_base", &self.api_base)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}
