use super::User;
use chrono::{DateTime, Utc};

/// One user-issued command: name, raw argument string and reply destination.
///
/// Created per incoming message, consumed synchronously by exactly one
/// handler, never persisted.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub id: String,
    /// Command name without the prefix, case-sensitive, no whitespace
    pub command: String,
    /// Everything after the command name; possibly empty
    pub args: String,
    pub user: User,
    pub chat_id: String,
    pub received_at: DateTime<Utc>,
}

impl Invocation {
    pub fn new(
        chat_id: impl Into<String>,
        command: impl Into<String>,
        args: impl Into<String>,
        user: User,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            command: command.into(),
            args: args.into(),
            user,
            chat_id: chat_id.into(),
            received_at: Utc::now(),
        }
    }

    /// Argument string with surrounding whitespace removed
    pub fn args_trimmed(&self) -> &str {
        self.args.trim()
    }
}
