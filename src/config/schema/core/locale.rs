use super::Config;
use crate::messages::Locale;

pub(crate) const LANG_ENV: &str = "LINKCAP_LANG";

/// Detect locale: `LINKCAP_LANG` env -> config value -> `"en"`.
fn detect_locale(config_locale: &str) -> Locale {
    if let Ok(lang) = std::env::var(LANG_ENV)
        && !lang.trim().is_empty()
    {
        return Locale::from_tag(&lang);
    }

    Locale::from_tag(config_locale)
}

impl Config {
    #[must_use]
    pub fn resolve_locale(&self) -> Locale {
        detect_locale(&self.locale)
    }
}
