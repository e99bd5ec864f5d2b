//! Message dispatch
//!
//! Routes incoming chat messages to the registered command handler.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 3.0.0: Registry-based dispatch of prefix commands
//! - 1.0.0: Initial monolithic handler

use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandOutcome, IncomingMessage};
use crate::commands::handlers::create_all_handlers;
use crate::commands::parser::parse_command;
use crate::commands::registry::CommandRegistry;

#[derive(Clone)]
pub struct CommandHandler {
    ctx: Arc<CommandContext>,
    registry: CommandRegistry,
    prefix: String,
}

impl CommandHandler {
    pub fn new(ctx: CommandContext, prefix: impl Into<String>) -> Self {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }

        Self {
            ctx: Arc::new(ctx),
            registry,
            prefix: prefix.into(),
        }
    }

    /// Dispatch a message to its command handler
    ///
    /// Bot authors, plain chat and unknown commands are ignored.
    pub async fn handle_message(&self, message: &IncomingMessage) -> Result<CommandOutcome> {
        if message.from_bot {
            return Ok(CommandOutcome::Ignored);
        }

        let Some(command) = parse_command(&message.content, &self.prefix) else {
            return Ok(CommandOutcome::Ignored);
        };
        let Some(handler) = self.registry.get(&command.name) else {
            return Ok(CommandOutcome::Ignored);
        };

        debug!(
            "Dispatching /{} from message {} in chat {}",
            command.name, message.message_id, message.chat_id
        );
        handler
            .handle(Arc::clone(&self.ctx), message, command.payload)
            .await
    }
}
