//! Command parser - Turns raw inbound text into invocations

use crate::domain::entities::{Invocation, User};

/// Parses incoming text into command invocations
pub struct CommandParser {
    prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Parse a text message.
    ///
    /// Returns `None` for anything that is not a command; plain text gets
    /// the platform-level default of no reply.
    pub fn parse(
        &self,
        chat_id: impl Into<String>,
        text: &str,
        user: User,
    ) -> Option<Invocation> {
        let text = text.trim();
        let rest = text.strip_prefix(&self.prefix)?;

        // Telegram group syntax: /cmd@botname
        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args),
            None => (rest, ""),
        };
        let name = head.split('@').next().unwrap_or(head);

        if name.is_empty() {
            return None;
        }

        Some(Invocation::new(chat_id, name, args, user))
    }
}
