pub mod chunker;
pub mod telegram;
pub mod traits;

pub use chunker::{BLOCK_SEPARATOR, DEFAULT_MESSAGE_BUDGET, batch_messages, split_for_transport};
pub use telegram::TelegramChannel;
pub use traits::{Channel, IncomingDocument, IncomingMessage};
