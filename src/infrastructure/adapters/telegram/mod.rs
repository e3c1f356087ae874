//! Telegram adapter

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::traits::{Bot, BotInfo};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Headroom over the long-poll window so the shared client timeout never
/// cuts a getUpdates call short
const POLL_GRACE_SECS: u64 = 10;

/// Telegram update
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    client: Client,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>, client: Client) -> Self {
        Self {
            token: token.into(),
            client,
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    /// Fetch bot info from the Telegram API; also validates the token
    pub async fn fetch_bot_info(&self) -> Result<BotInfo, BotError> {
        #[derive(Deserialize)]
        struct Response {
            result: BotInfoResponse,
        }

        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: String,
        }

        let response = self
            .client
            .get(self.api_url("getMe"))
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "getMe failed: {}",
                response.status()
            )));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(BotInfo {
            id: data.result.id.to_string(),
            name: data.result.first_name,
            username: data.result.username,
        })
    }

    /// Long-poll for updates via getUpdates
    pub async fn get_updates(&self, offset: i64, timeout_secs: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: i64,
            allowed_updates: Vec<String>,
        }

        #[derive(Deserialize)]
        struct Response {
            result: Vec<Update>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout: timeout_secs,
            allowed_updates: vec!["message".to_string()],
        };

        let response = self
            .client
            .post(self.api_url("getUpdates"))
            .timeout(Duration::from_secs(timeout_secs as u64 + POLL_GRACE_SECS))
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.result)
    }

    /// Publish the command menu via setMyCommands
    pub async fn register_commands(&self, commands: &[(String, String)]) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct BotCommand<'a> {
            command: &'a str,
            description: &'a str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest<'a> {
            commands: Vec<BotCommand<'a>>,
        }

        let request = SetMyCommandsRequest {
            commands: commands
                .iter()
                .map(|(command, description)| BotCommand {
                    command,
                    description,
                })
                .collect(),
        };

        let response = self
            .client
            .post(self.api_url("setMyCommands"))
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(BotError::Network(format!(
                "Failed to register commands: {}",
                error
            )));
        }

        tracing::info!("Registered {} bot commands with Telegram", commands.len());
        Ok(())
    }

    async fn call(&self, method: &str, body: impl Serialize) -> Result<(), BotError> {
        let response = self
            .client
            .post(self.api_url(method))
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "{} failed: {}",
                method,
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: &'a str,
            text: &'a str,
        }

        tracing::debug!(chat = %chat_id, "sending text");
        self.call("sendMessage", SendMessageRequest { chat_id, text })
            .await
    }

    async fn send_photo(&self, chat_id: &str, url: &str, caption: &str) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct SendPhotoRequest<'a> {
            chat_id: &'a str,
            photo: &'a str,
            caption: &'a str,
        }

        tracing::debug!(chat = %chat_id, photo = %url, "sending photo");
        self.call(
            "sendPhoto",
            SendPhotoRequest {
                chat_id,
                photo: url,
                caption,
            },
        )
        .await
    }

    async fn send_menu(
        &self,
        chat_id: &str,
        text: &str,
        buttons: &[String],
    ) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct KeyboardButton<'a> {
            text: &'a str,
        }

        #[derive(Serialize)]
        struct ReplyKeyboardMarkup<'a> {
            keyboard: Vec<Vec<KeyboardButton<'a>>>,
            resize_keyboard: bool,
        }

        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: &'a str,
            text: &'a str,
            reply_markup: ReplyKeyboardMarkup<'a>,
        }

        let keyboard = vec![buttons
            .iter()
            .map(|b| KeyboardButton { text: b })
            .collect()];

        self.call(
            "sendMessage",
            SendMessageRequest {
                chat_id,
                text,
                reply_markup: ReplyKeyboardMarkup {
                    keyboard,
                    resize_keyboard: true,
                },
            },
        )
        .await
    }
}

/// Next getUpdates offset after a batch
pub fn next_offset(current: i64, updates: &[Update]) -> i64 {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .max()
        .unwrap_or(current)
}
