mod channels;
mod core;
mod limits;

pub use channels::TelegramConfig;
pub use core::Config;
pub use limits::LimitsConfig;
