//! Telegram Bot API delivery for order summaries.

use crate::config::toml_config::TelegramConfig;
use crate::domain::ports::OrderChannel;
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramChannel {
    client: Client,
    api_base: String,
    bot_token: SecretString,
    chat_id: String,
    parse_mode: String,
}

impl std::fmt::Debug for TelegramChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramChannel")
            .field("api_base", &self.api_base)
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

impl TelegramChannel {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            parse_mode: config.parse_mode.clone(),
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base,
            self.bot_token.expose_secret()
        )
    }

    /// Posts `text` to the configured chat. In HTML parse mode the text is escaped first.
    ///
    /// Telegram answers failures with `{"ok": false, "description": ...}`, often
    /// alongside a 4xx status, so the body is inspected whatever the status.
    #[instrument(skip(self, text), fields(chat_id = %self.chat_id))]
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let text = if self.parse_mode.eq_ignore_ascii_case("HTML") {
            escape_html(text)
        } else {
            text.to_string()
        };
        let body = SendMessage {
            chat_id: &self.chat_id,
            text: &text,
            parse_mode: &self.parse_mode,
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let result: SendMessageResponse = response.json().await?;

        if !result.ok {
            error!(%status, description = ?result.description, "Telegram API error sending order");
            return Err(CartError::DeliveryError {
                message: result
                    .description
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            });
        }

        debug!(%status, "Order message accepted by Telegram");
        Ok(())
    }
}

/// Escapes the three characters Telegram's HTML parse mode treats as markup.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[async_trait]
impl OrderChannel for TelegramChannel {
    async fn send_order(&self, text: &str) -> Result<()> {
        self.send_message(text).await
    }
}
