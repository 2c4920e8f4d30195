use std::time::Duration;

use log::{error, info};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use url::Url;

use crate::config::TelegramConfig;
use crate::error::watch::{Result, WatchError};
use crate::http::redact_middleware::{RedactingLogMiddleware, redact_bot_token};
use crate::model::absence_entry::AbsenceEntry;
use crate::model::telegram_response::{SendMessageRequest, TelegramResponse};

pub const FIELD_SEPARATOR: &str = " - ";
// Legacy Markdown: a single `*` pair is bold.
const REPORT_HEADER: &str = "📊 *Canva Data Scrape*";
const FAILURE_HEADER: &str = "⚠️ *Scraping Failed*";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str) -> Result<()>;
}

/// Sends messages to one chat through the Telegram Bot API.
pub struct TelegramNotifier {
    client: ClientWithMiddleware,
    endpoint: Url,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let base = Url::parse(&config.api_base)
            .map_err(|e| WatchError::Config(format!("invalid Telegram API base: {}", e)))?;
        let endpoint = base
            .join(&format!("./bot{}/sendMessage", config.bot_token))
            .map_err(|e| WatchError::Config(format!("invalid bot token: {}", e)))?;

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let client = ClientBuilder::new(client)
            .with(RedactingLogMiddleware)
            .build();

        Ok(TelegramNotifier {
            client,
            endpoint,
            chat_id: config.chat_id.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        let payload = SendMessageRequest {
            chat_id: &self.chat_id,
            text: message,
            parse_mode: "Markdown",
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| WatchError::Notification(redact_bot_token(&e.to_string())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| WatchError::Notification(redact_bot_token(&e.to_string())))?;
        let body: Option<TelegramResponse> = serde_json::from_str(&text).ok();

        match body {
            Some(body) if status.is_success() && body.ok => Ok(()),
            Some(body) => Err(WatchError::Notification(format!(
                "Telegram rejected the message ({}): {}",
                status,
                body.description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(WatchError::Notification(format!(
                "unexpected Telegram response ({}): {}",
                status,
                redact_bot_token(&text)
            ))),
        }
    }
}

/// Sends `message` once; failures are logged and swallowed.
pub async fn notify_best_effort(notifier: &dyn Notifier, message: &str) -> bool {
    match notifier.notify(message).await {
        Ok(()) => {
            info!("Telegram message sent.");
            true
        }
        Err(e) => {
            error!(
                "Failed to send Telegram message: {}",
                redact_bot_token(&e.to_string())
            );
            false
        }
    }
}

/// Backslash-escapes the characters legacy Telegram Markdown treats as entity markers.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn render_report(entries: &[AbsenceEntry]) -> String {
    let lines = entries
        .iter()
        .map(|entry| escape_markdown(&entry.line(FIELD_SEPARATOR)))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}\n\n{}", REPORT_HEADER, lines)
}

pub fn render_failure(err: &WatchError) -> String {
    format!("{}\n\nError: {}", FAILURE_HEADER, escape_markdown(&err.to_string()))
}
