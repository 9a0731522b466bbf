use super::TelegramChannel;
use crate::channels::traits::{Channel, IncomingMessage};
use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn max_message_length(&self) -> usize {
        4096
    }

    async fn send(&self, message: &str, chat_id: &str) -> anyhow::Result<()> {
        // Plain text: links routinely contain `_` and `*`, which Markdown
        // parse mode would reject.
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": message,
            "disable_web_page_preview": true
        });

        self.call_api("sendMessage", &body).await?;
        Ok(())
    }

    async fn send_document(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        caption: Option<&str>,
        chat_id: &str,
    ) -> anyhow::Result<()> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let mut form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", part);
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }

        let resp = self
            .client
            .post(self.api_url("sendDocument"))
            .multipart(form)
            .send()
            .await
            .context("send Telegram sendDocument request")?;

        Self::read_result("sendDocument", resp).await?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> anyhow::Result<Vec<u8>> {
        let file_path = self.resolve_file_path(file_id).await?;

        let resp = self
            .client
            .get(self.file_url(&file_path))
            .send()
            .await
            .context("download Telegram file")?
            .error_for_status()
            .context("download Telegram file")?;

        let bytes = resp.bytes().await.context("read Telegram file bytes")?;
        Ok(bytes.to_vec())
    }

    async fn listen(&self, tx: tokio::sync::mpsc::Sender<IncomingMessage>) -> anyhow::Result<()> {
        let mut offset: i64 = 0;

        tracing::info!("Telegram channel listening for messages...");

        loop {
            let body = serde_json::json!({
                "offset": offset,
                "timeout": self.poll_timeout_secs,
                "allowed_updates": ["message"]
            });

            let results = match self.call_api("getUpdates", &body).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!("Telegram poll error: {e:#}");
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                    continue;
                }
            };

            let Some(updates) = results.as_array() else {
                continue;
            };

            for update in updates {
                // Advance offset past this update
                if let Some(uid) = update.get("update_id").and_then(Value::as_i64) {
                    offset = uid + 1;
                }

                let Some(message) = update.get("message") else {
                    continue;
                };

                let Some(msg) = self.parse_message(message) else {
                    continue;
                };

                if tx.send(msg).await.is_err() {
                    return Ok(());
                }
            }
        }
    }

    async fn health_check(&self) -> bool {
        self.call_api("getMe", &serde_json::json!({})).await.is_ok()
    }
}
