//! Command router - maps invocations to registered handlers
//!
//! Handlers are grouped into independently registrable bundles. Registration
//! happens once at startup; the table is immutable afterwards, so dispatch
//! needs no locking and concurrent invocations share nothing mutable.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::application::errors::RouterError;
use crate::domain::entities::{Invocation, Reply};

/// Boxed future produced by a command handler
pub type HandlerFuture = Pin<Box<dyn Future<Output = Reply> + Send>>;

/// Handler function type
type Handler = Arc<dyn Fn(Invocation) -> HandlerFuture + Send + Sync>;

const HELP_COMMAND: &str = "help";

/// A single command binding
pub struct Command {
    name: String,
    description: String,
    args_hint: Option<String>,
    handler: Handler,
}

impl Command {
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Reply> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            args_hint: None,
            handler: Arc::new(move |inv| Box::pin(handler(inv))),
        }
    }

    /// Argument placeholder shown in the help listing, e.g. `<city>`
    pub fn with_args_hint(mut self, hint: impl Into<String>) -> Self {
        self.args_hint = Some(hint.into());
        self
    }
}

/// A named, independently registrable group of command handlers
pub struct Bundle {
    name: String,
    commands: Vec<Command>,
}

impl Bundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }
}

struct Entry {
    description: String,
    args_hint: Option<String>,
    bundle: String,
    /// `None` only for the built-in help command, answered by the router
    handler: Option<Handler>,
}

/// Routes each invocation to exactly one registered handler.
///
/// Collision policy: reject-at-registration. A duplicate command name across
/// bundles fails startup instead of silently shadowing an earlier handler.
/// Unknown commands produce no reply, matching the platform default.
pub struct Router {
    table: HashMap<String, Entry>,
    /// Command names in registration order, for a stable help listing
    order: Vec<String>,
}

impl Router {
    pub fn new() -> Self {
        let mut router = Self {
            table: HashMap::new(),
            order: Vec::new(),
        };
        router.table.insert(
            HELP_COMMAND.to_string(),
            Entry {
                description: "Show this help".to_string(),
                args_hint: None,
                bundle: "builtin".to_string(),
                handler: None,
            },
        );
        router.order.push(HELP_COMMAND.to_string());
        router
    }

    /// Add all command bindings in `bundle` to the routing table.
    ///
    /// Fails on the first name that collides with an existing registration,
    /// including the built-in `help`.
    pub fn register(&mut self, bundle: Bundle) -> Result<(), RouterError> {
        let bundle_name = bundle.name;
        for command in bundle.commands {
            if let Some(existing) = self.table.get(&command.name) {
                return Err(RouterError::DuplicateCommand {
                    command: command.name,
                    bundle: bundle_name,
                    existing: existing.bundle.clone(),
                });
            }
            self.order.push(command.name.clone());
            self.table.insert(
                command.name,
                Entry {
                    description: command.description,
                    args_hint: command.args_hint,
                    bundle: bundle_name.clone(),
                    handler: Some(command.handler),
                },
            );
        }
        Ok(())
    }

    /// Look up and run the handler for an invocation.
    ///
    /// Returns `None` for an unregistered command. The handler itself never
    /// fails: every remote error is already mapped to a fallback reply.
    pub async fn dispatch(&self, invocation: Invocation) -> Option<Reply> {
        let entry = self.table.get(&invocation.command)?;
        match &entry.handler {
            Some(handler) => {
                tracing::debug!(
                    command = %invocation.command,
                    chat = %invocation.chat_id,
                    id = %invocation.id,
                    received_at = %invocation.received_at,
                    "dispatching"
                );
                Some(handler(invocation).await)
            }
            None => Some(Reply::Text(self.help_text())),
        }
    }

    /// Help listing with every registered command exactly once
    pub fn help_text(&self) -> String {
        let mut help = String::from("Available commands:\n");
        for name in &self.order {
            let entry = &self.table[name];
            match &entry.args_hint {
                Some(hint) => {
                    help.push_str(&format!("/{} {} - {}\n", name, hint, entry.description))
                }
                None => help.push_str(&format!("/{} - {}\n", name, entry.description)),
            }
        }
        help
    }

    /// (name, description) pairs in registration order, for the platform's
    /// own command menu
    pub fn command_list(&self) -> Vec<(String, String)> {
        self.order
            .iter()
            .map(|name| (name.clone(), self.table[name].description.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
