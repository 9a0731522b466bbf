//! User-facing reply texts.
//!
//! Every string the bot sends lives here so the router and row processor stay
//! free of wording. The catalog is a plain value handed to whoever needs it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    /// Parse a language tag such as `"ru"`, `"ru_RU.UTF-8"` or `"EN-us"`.
    /// Unknown languages fall back to English.
    #[must_use]
    pub fn from_tag(raw: &str) -> Self {
        match normalise_locale(raw).as_str() {
            "ru" => Self::Ru,
            _ => Self::En,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }
}

/// Normalise `"ru_RU.UTF-8"` -> `"ru"`, `"en-US"` -> `"en"`, passthrough `"ru"`.
pub(crate) fn normalise_locale(raw: &str) -> String {
    let raw = raw.trim().to_lowercase();
    let base = raw.split('.').next().unwrap_or(&raw);
    let lang = base.split(['_', '-']).next().unwrap_or(base);
    lang.to_string()
}

#[derive(Debug, Clone, Copy)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn usage(&self) -> &'static str {
        match self.locale {
            Locale::En => {
                "Hi! Send me a line of comma-separated links or an Excel file (.xlsx).\n\
                 I will send back the first 10 links for every row."
            }
            Locale::Ru => {
                "Привет! Отправь строку с ссылками (через запятую) или Excel-файл (.xlsx).\n\
                 Я верну тебе первые 10 ссылок по каждой строке."
            }
        }
    }

    pub fn links_header(&self) -> &'static str {
        match self.locale {
            Locale::En => "First 10 links:",
            Locale::Ru => "Первые 10 ссылок:",
        }
    }

    pub fn no_valid_links(&self) -> &'static str {
        match self.locale {
            Locale::En => "No valid links found.",
            Locale::Ru => "Не найдено валидных ссылок.",
        }
    }

    pub fn row_with_links(&self, index: usize, count: usize) -> String {
        match self.locale {
            Locale::En => format!("Row {index}: {count} links"),
            Locale::Ru => format!("Строка {index}: {count} ссылок"),
        }
    }

    pub fn row_without_links(&self, index: usize) -> String {
        match self.locale {
            Locale::En => format!("Row {index}: no valid links"),
            Locale::Ru => format!("Строка {index}: нет валидных ссылок"),
        }
    }

    pub fn no_rows_with_links(&self) -> &'static str {
        match self.locale {
            Locale::En => "No rows with valid links were found in the file.",
            Locale::Ru => "В файле не найдено ни одной строки с валидными ссылками.",
        }
    }

    pub fn wrong_format(&self) -> &'static str {
        match self.locale {
            Locale::En => "Please send an Excel file with the .xlsx extension.",
            Locale::Ru => "Пожалуйста, отправь Excel-файл с расширением .xlsx",
        }
    }

    pub fn file_too_large(&self, max_mb: u64) -> String {
        match self.locale {
            Locale::En => format!("The file is too large. The limit is {max_mb} MB."),
            Locale::Ru => format!("Файл слишком большой. Максимум {max_mb} МБ."),
        }
    }

    pub fn processing_failed(&self) -> &'static str {
        match self.locale {
            Locale::En => "Something went wrong while reading the file.",
            Locale::Ru => "Произошла ошибка при чтении файла.",
        }
    }

    pub fn result_caption(&self) -> &'static str {
        match self.locale {
            Locale::En => "Processed links file",
            Locale::Ru => "Обработанный файл с ссылками",
        }
    }

    /// Longest fixed notice, in characters. A message budget below this
    /// could not carry the bot's own replies.
    pub fn longest_notice_chars(&self) -> usize {
        [
            self.usage(),
            self.no_valid_links(),
            self.no_rows_with_links(),
            self.wrong_format(),
            self.processing_failed(),
        ]
        .iter()
        .map(|text| text.chars().count())
        .max()
        .unwrap_or(0)
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
