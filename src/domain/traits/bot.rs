use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::Reply;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Send a plain text message to a chat
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), BotError>;

    /// Send a photo by URL with a caption
    async fn send_photo(&self, chat_id: &str, url: &str, caption: &str) -> Result<(), BotError>;

    /// Send text together with a reply keyboard
    async fn send_menu(&self, chat_id: &str, text: &str, buttons: &[String])
        -> Result<(), BotError>;

    /// Deliver a handler reply to its originating chat
    async fn deliver(&self, chat_id: &str, reply: &Reply) -> Result<(), BotError> {
        match reply {
            Reply::Text(text) => self.send_text(chat_id, text).await,
            Reply::Photo { url, caption } => self.send_photo(chat_id, url, caption).await,
            Reply::Menu { text, buttons } => self.send_menu(chat_id, text, buttons).await,
        }
    }
}

/// Bot information as reported by the platform
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
