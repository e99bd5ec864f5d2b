//! Message command handler trait and shared types
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Prefix message commands replace slash interactions
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::context::CommandContext;
use crate::features::reminders::ReminderId;

/// A chat message, stripped down to what commands need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: u64,
    pub message_id: u64,
    /// Message this one replies to, if any
    pub reply_to: Option<u64>,
    pub content: String,
    pub from_bot: bool,
}

/// What happened to a message after dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not a command, or sent by a bot
    Ignored,
    Scheduled(ReminderId),
    /// The command was understood but could not be carried out
    Rejected(String),
}

/// Trait for prefix message command handlers
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl MessageCommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<CommandContext>,
///         message: &IncomingMessage,
///         payload: &str,
///     ) -> Result<CommandOutcome> {
///         Ok(CommandOutcome::Ignored)
///     }
/// }
/// ```
#[async_trait]
pub trait MessageCommandHandler: Send + Sync {
    /// Command name(s) this handler processes, lowercase and without prefix
    fn command_names(&self) -> &'static [&'static str];

    /// Handle the command
    ///
    /// # Arguments
    ///
    /// * `ctx` - Shared command context
    /// * `message` - The message that carried the command
    /// * `payload` - Text after the command name, trimmed
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        message: &IncomingMessage,
        payload: &str,
    ) -> Result<CommandOutcome>;
}
