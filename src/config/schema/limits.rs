use crate::channels::chunker::DEFAULT_MESSAGE_BUDGET;
use crate::links::DEFAULT_LINK_LIMIT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Links kept per text message or spreadsheet row.
    #[serde(default = "default_max_links")]
    pub max_links_per_row: usize,
    /// Character budget for one summary reply.
    #[serde(default = "default_message_budget")]
    pub message_budget: usize,
    /// Uploads above this size are refused before download.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
}

fn default_max_links() -> usize {
    DEFAULT_LINK_LIMIT
}

fn default_message_budget() -> usize {
    DEFAULT_MESSAGE_BUDGET
}

// Bot API downloads are capped at 20 MB.
fn default_max_file_size_mb() -> u64 {
    20
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_links_per_row: default_max_links(),
            message_budget: default_message_budget(),
            max_file_size_mb: default_max_file_size_mb(),
        }
    }
}

impl LimitsConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1_024 * 1_024)
    }
}
