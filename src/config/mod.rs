pub mod schema;

pub use schema::{Config, LimitsConfig, TelegramConfig};
