use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::{BotResult, error::truncate_body, model::DispatchResult};

use super::Notifier;

const API_URL: &str = "https://api.telegram.org";

/// Telegram's legacy Markdown: `**bold**` and `•` render as intended.
const PARSE_MODE: &str = "Markdown";

#[derive(Clone)]
pub struct TelegramNotifier {
    bot_token: String,
    chat_id: String,
    http: Client,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            bot_token,
            chat_id,
            http: Client::new(),
        }
    }
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> BotResult<DispatchResult> {
        let url = format!("{API_URL}/bot{}/sendMessage", self.bot_token);
        let payload = SendMessage { chat_id: &self.chat_id, text, parse_mode: PARSE_MODE };

        // The bot token is part of the path; keep it out of error text.
        let res = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.without_url())
            .context("Failed to send request to Telegram")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| e.without_url())
            .context("Failed to read Telegram response body")?;

        parse_dispatch(status, &body)
    }
}

/// Telegram answers `{"ok": true, "result": ...}` or
/// `{"ok": false, "error_code": ..., "description": ...}`.
fn parse_dispatch(status: StatusCode, body: &str) -> BotResult<DispatchResult> {
    let response: serde_json::Value = serde_json::from_str(body).map_err(|_| {
        anyhow!("Telegram request failed with status {}: {}", status, truncate_body(body))
    })?;

    let ok = response.get("ok").and_then(serde_json::Value::as_bool).unwrap_or(false);

    Ok(DispatchResult { ok, response })
}
