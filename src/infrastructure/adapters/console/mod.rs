//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::traits::Bot;

/// Console bot adapter for local development
pub struct ConsoleAdapter;

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self
    }

    pub async fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;

        print!("{}", prompt);
        std::io::stdout().flush().ok()?;
        let mut input = String::new();
        let read = std::io::stdin().read_line(&mut input).ok()?;
        if read == 0 {
            return None; // EOF
        }
        Some(input.trim().to_string())
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn send_text(&self, _chat_id: &str, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        Ok(())
    }

    async fn send_photo(&self, _chat_id: &str, url: &str, caption: &str) -> Result<(), BotError> {
        println!("[BOT] [photo] {} ({})", url, caption);
        Ok(())
    }

    async fn send_menu(
        &self,
        _chat_id: &str,
        text: &str,
        buttons: &[String],
    ) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        println!("  [Buttons] {}", buttons.join(" | "));
        Ok(())
    }
}
