use super::Config;
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) =
            std::env::var("LINKCAP_BOT_TOKEN").or_else(|_| std::env::var("TELEGRAM_BOT_TOKEN"))
            && !token.trim().is_empty()
        {
            self.telegram.bot_token = token.trim().to_string();
        }

        if let Ok(lang) = std::env::var(super::locale::LANG_ENV)
            && !lang.trim().is_empty()
        {
            self.locale = lang.trim().to_string();
        }

        if let Ok(limit_str) = std::env::var("LINKCAP_MAX_LINKS")
            && let Ok(limit) = limit_str.trim().parse::<usize>()
            && limit > 0
        {
            self.limits.max_links_per_row = limit;
        }

        if let Ok(budget_str) = std::env::var("LINKCAP_MESSAGE_BUDGET")
            && let Ok(budget) = budget_str.trim().parse::<usize>()
        {
            self.limits.message_budget = budget;
        }

        if let Ok(dir) = std::env::var("LINKCAP_TEMP_DIR")
            && !dir.is_empty()
        {
            self.temp_dir = Some(PathBuf::from(dir));
        }
    }
}
