//! Dispatches inbound messages to the link extractor or the spreadsheet
//! pipeline and sends the replies.

mod pipeline;

use crate::channels::traits::{Channel, IncomingDocument, IncomingMessage};
use crate::commands::{is_command, parse_command};
use crate::config::{Config, LimitsConfig};
use crate::links::{extract_links, format_link_reply};
use crate::messages::Messages;
use crate::spreadsheet::{XLSX_EXTENSION, XLSX_MIME};
use std::path::{Path, PathBuf};

/// What an inbound message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/start` or `/help`.
    Usage,
    /// Free text to scan for links.
    Links(&'a str),
    /// An xlsx upload.
    Spreadsheet(&'a IncomingDocument),
    /// Any other upload.
    UnsupportedDocument,
    /// Commands meant for someone else, empty messages.
    Ignore,
}

#[must_use]
pub fn classify(message: &IncomingMessage) -> Route<'_> {
    if let Some(document) = &message.document {
        return if is_spreadsheet(document) {
            Route::Spreadsheet(document)
        } else {
            Route::UnsupportedDocument
        };
    }

    let Some(text) = message.text.as_deref() else {
        return Route::Ignore;
    };

    if is_command(text) {
        return match parse_command(text) {
            Some(_) => Route::Usage,
            None => Route::Ignore,
        };
    }

    Route::Links(text)
}

/// Both the declared MIME type and the `.xlsx` extension must match.
fn is_spreadsheet(document: &IncomingDocument) -> bool {
    let mime_matches = document.mime_type.as_deref() == Some(XLSX_MIME);
    let extension_matches = document.file_name.as_deref().is_some_and(|name| {
        Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(XLSX_EXTENSION))
    });
    mime_matches && extension_matches
}

pub struct Router {
    messages: Messages,
    limits: LimitsConfig,
    scratch_dir: PathBuf,
}

impl Router {
    pub fn new(messages: Messages, limits: LimitsConfig, scratch_dir: PathBuf) -> Self {
        Self {
            messages,
            limits,
            scratch_dir,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.messages(), config.limits.clone(), config.scratch_dir())
    }

    /// Handle one inbound message end to end.
    ///
    /// Processing failures are reported to the user and logged here; an error
    /// is only returned when a reply itself could not be delivered.
    pub async fn handle(
        &self,
        channel: &dyn Channel,
        message: &IncomingMessage,
    ) -> anyhow::Result<()> {
        let chat_id = message.chat_id.as_str();

        match classify(message) {
            Route::Usage => channel.send(self.messages.usage(), chat_id).await,
            Route::Links(text) => self.reply_with_links(channel, chat_id, text).await,
            Route::Spreadsheet(document) => {
                self.handle_spreadsheet(channel, &message.id, chat_id, document)
                    .await
            }
            Route::UnsupportedDocument => {
                tracing::info!(
                    chat_id,
                    file_name = message
                        .document
                        .as_ref()
                        .and_then(|d| d.file_name.as_deref())
                        .unwrap_or("unnamed"),
                    "rejected non-xlsx upload"
                );
                channel.send(self.messages.wrong_format(), chat_id).await
            }
            Route::Ignore => Ok(()),
        }
    }

    async fn reply_with_links(
        &self,
        channel: &dyn Channel,
        chat_id: &str,
        text: &str,
    ) -> anyhow::Result<()> {
        let links = extract_links(text, self.limits.max_links_per_row);
        match format_link_reply(&links, &self.messages) {
            Some(reply) => channel.send_chunked(&reply, chat_id).await,
            None => channel.send(self.messages.no_valid_links(), chat_id).await,
        }
    }

    async fn handle_spreadsheet(
        &self,
        channel: &dyn Channel,
        request_id: &str,
        chat_id: &str,
        document: &IncomingDocument,
    ) -> anyhow::Result<()> {
        let file_name = document.file_name.as_deref().unwrap_or("unnamed");

        if document
            .file_size
            .is_some_and(|size| size > self.limits.max_file_size_bytes())
        {
            tracing::info!(
                chat_id,
                file_name,
                size = document.file_size.unwrap_or_default(),
                "upload too large"
            );
            let notice = self.messages.file_too_large(self.limits.max_file_size_mb);
            return channel.send(&notice, chat_id).await;
        }

        tracing::info!(request_id, chat_id, file_name, "processing spreadsheet");

        match self.process_spreadsheet(channel, chat_id, document).await {
            Ok(outcome) => {
                tracing::info!(
                    request_id,
                    chat_id,
                    rows = outcome.rows,
                    chunks = outcome.chunks,
                    "spreadsheet processed"
                );
                Ok(())
            }
            Err(error) => {
                tracing::error!(
                    request_id,
                    chat_id,
                    file_name,
                    "spreadsheet processing failed: {error:#}"
                );
                channel
                    .send(self.messages.processing_failed(), chat_id)
                    .await
            }
        }
    }
}
