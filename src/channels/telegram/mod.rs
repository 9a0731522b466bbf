pub mod handler;

use crate::channels::traits::{IncomingDocument, IncomingMessage};
use crate::config::TelegramConfig;
use crate::error::TransportError;
use anyhow::Context;
use serde_json::Value;
use uuid::Uuid;


pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API channel. Long-polls `getUpdates` for messages.
pub struct TelegramChannel {
    bot_token: String,
    allowed_users: Vec<String>,
    api_base: String,
    poll_timeout_secs: u64,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(bot_token: String, allowed_users: Vec<String>) -> Self {
        Self {
            bot_token,
            allowed_users,
            api_base: DEFAULT_API_BASE.to_string(),
            poll_timeout_secs: 30,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &TelegramConfig) -> Self {
        Self::new(config.bot_token.clone(), config.allowed_users.clone())
            .with_api_base(&config.api_base)
            .with_poll_timeout(config.poll_timeout_secs)
    }

    /// Point the channel at another Bot API server (self-hosted or a mock).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_base, self.bot_token)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{file_path}", self.api_base, self.bot_token)
    }

    fn is_user_allowed(&self, identity: &str) -> bool {
        !identity.is_empty()
            && self
                .allowed_users
                .iter()
                .any(|allowed| allowed == "*" || allowed == identity)
    }

    fn is_any_user_allowed<'a, I>(&self, identities: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        identities.into_iter().any(|id| self.is_user_allowed(id))
    }

    /// POST a JSON body to a Bot API method and return its `result` field.
    async fn call_api(&self, method: &str, body: &Value) -> anyhow::Result<Value> {
        let resp = self
            .client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .with_context(|| format!("send Telegram {method} request"))?;

        Self::read_result(method, resp).await
    }

    /// Unwrap the Bot API envelope: non-2xx statuses and `"ok": false` become
    /// [`TransportError::Api`].
    async fn read_result(method: &str, resp: reqwest::Response) -> anyhow::Result<Value> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));

        let parsed: Value = serde_json::from_str(&body).unwrap_or_default();
        let ok = parsed.get("ok").and_then(Value::as_bool).unwrap_or(false);

        if !status.is_success() || !ok {
            let description = parsed
                .get("description")
                .and_then(Value::as_str)
                .map_or_else(|| format!("({status}) {body}"), String::from);
            return Err(TransportError::Api {
                method: method.to_string(),
                description,
            }
            .into());
        }

        Ok(parsed.get("result").cloned().unwrap_or(Value::Null))
    }

    /// Resolve a `file_id` to its download path via `getFile`.
    async fn resolve_file_path(&self, file_id: &str) -> anyhow::Result<String> {
        let result = self
            .call_api("getFile", &serde_json::json!({ "file_id": file_id }))
            .await?;

        result
            .get("file_path")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| {
                TransportError::MissingField {
                    method: "getFile".into(),
                    field: "file_path".into(),
                }
                .into()
            })
    }

    /// Turn one `message` object from an update into an [`IncomingMessage`].
    ///
    /// Returns `None` for senders outside the allowlist and for messages that
    /// carry neither text nor a document (stickers, photos, service messages).
    fn parse_message(&self, message: &Value) -> Option<IncomingMessage> {
        let username = message
            .get("from")
            .and_then(|f| f.get("username"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let user_id = message
            .get("from")
            .and_then(|f| f.get("id"))
            .and_then(Value::as_i64)
            .map(|id| id.to_string());

        let mut identities = vec![username];
        if let Some(ref id) = user_id {
            identities.push(id.as_str());
        }

        if !self.is_any_user_allowed(identities.iter().copied()) {
            tracing::warn!(
                username,
                user_id = user_id.as_deref().unwrap_or("unknown"),
                "Telegram: ignoring message from unauthorized user; add the @username or numeric id to telegram.allowed_users"
            );
            return None;
        }

        let text = message
            .get("text")
            .and_then(Value::as_str)
            .map(String::from);
        let document = message.get("document").and_then(parse_document);

        if text.is_none() && document.is_none() {
            return None;
        }

        let chat_id = message
            .get("chat")
            .and_then(|c| c.get("id"))
            .and_then(Value::as_i64)
            .map(|id| id.to_string())
            .unwrap_or_default();

        let timestamp = message
            .get("date")
            .and_then(Value::as_u64)
            .unwrap_or_else(|| {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs()
            });

        Some(IncomingMessage {
            id: Uuid::new_v4().to_string(),
            chat_id,
            sender: user_id.unwrap_or_else(|| username.to_string()),
            text,
            document,
            timestamp,
        })
    }
}

fn parse_document(document: &Value) -> Option<IncomingDocument> {
    let file_id = document.get("file_id").and_then(Value::as_str)?;
    let string_field = |key: &str| {
        document
            .get(key)
            .and_then(Value::as_str)
            .map(String::from)
    };

    Some(IncomingDocument {
        file_id: file_id.to_string(),
        file_name: string_field("file_name"),
        mime_type: string_field("mime_type"),
        file_size: document.get("file_size").and_then(Value::as_u64),
    })
}
