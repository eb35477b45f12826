// Responsible for all communication with the Telegram Bot API.

use crate::domain::notify::NotificationSink;
use crate::infra::config;
use async_trait::async_trait;

/// Delivers inventory-change messages to a fixed Telegram chat.
///
/// Only the outbound `sendMessage` half of the Bot API is used; this
/// service never polls for updates.
pub struct TelegramSink {
    http: reqwest::Client,
    token: String,
    chat_id: String,
}

impl TelegramSink {
    pub fn new(token: String, chat_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token,
            chat_id,
        }
    }

    /// Builds a sink from `TELEGRAM_BOT_TOKEN` / `TELEGRAM_CHAT_ID`.
    pub fn from_env() -> Self {
        Self::new(config::telegram_bot_token(), config::telegram_chat_id())
    }

    async fn send_message(&self, text: &str) -> anyhow::Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Telegram sendMessage failed: {} {}",
                status,
                body
            ));
        }

        println!(
            "> Telegram notification delivered: {}",
            text.replace('\n', " | ")
        );
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn notify_added(
        &self,
        brand: &str,
        release_year: i32,
        reg_date: &str,
        owner: &str,
    ) -> anyhow::Result<()> {
        let text = format!(
            "Car added:\nBrand: {}\nRelease year: {}\nRegistration date: {}\nOwner: {}",
            brand, release_year, reg_date, owner
        );
        self.send_message(&text).await
    }

    async fn notify_updated(
        &self,
        brand: &str,
        release_year: i32,
        reg_date: &str,
        owner: &str,
        changed: &str,
    ) -> anyhow::Result<()> {
        let text = format!(
            "Car updated:\nBrand: {}\nRelease year: {}\nRegistration date: {}\nOwner: {}\nChanged: {}",
            brand, release_year, reg_date, owner, changed
        );
        self.send_message(&text).await
    }

    async fn notify_deleted(
        &self,
        brand: &str,
        reg_date: &str,
        owner: &str,
    ) -> anyhow::Result<()> {
        let text = format!(
            "Car deleted:\nBrand: {}\nRegistration date: {}\nOwner: {}",
            brand, reg_date, owner
        );
        self.send_message(&text).await
    }
}
