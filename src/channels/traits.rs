use async_trait::async_trait;

/// Document attached to an inbound message, as announced by the platform.
/// The bytes are not fetched until the router asks for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingDocument {
    pub file_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
}

/// A message received from a channel.
///
/// `chat_id` is where replies go; `sender` identifies the user (username or
/// numeric id as a string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub id: String,
    pub chat_id: String,
    pub sender: String,
    pub text: Option<String>,
    pub document: Option<IncomingDocument>,
    pub timestamp: u64,
}

/// A messaging platform the bot can listen on and reply through.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name
    fn name(&self) -> &str;

    /// Send a plain-text message
    async fn send(&self, message: &str, recipient: &str) -> anyhow::Result<()>;

    /// Upload a file as a document reply
    async fn send_document(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        caption: Option<&str>,
        recipient: &str,
    ) -> anyhow::Result<()>;

    /// Fetch the bytes of a previously announced document
    async fn download_file(&self, file_id: &str) -> anyhow::Result<Vec<u8>>;

    /// Start listening for incoming messages (long-running)
    async fn listen(&self, tx: tokio::sync::mpsc::Sender<IncomingMessage>) -> anyhow::Result<()>;

    /// Check if channel is healthy
    async fn health_check(&self) -> bool {
        true
    }

    fn max_message_length(&self) -> usize {
        usize::MAX
    }

    /// Send text that may exceed the platform cap, splitting it on line breaks.
    async fn send_chunked(&self, message: &str, recipient: &str) -> anyhow::Result<()> {
        let chunks = super::chunker::split_for_transport(message, self.max_message_length());
        for chunk in chunks {
            self.send(&chunk, recipient).await?;
        }
        Ok(())
    }
}
