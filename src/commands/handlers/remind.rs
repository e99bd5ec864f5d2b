//! Reminder command handler
//!
//! Handles: remindme, r, reminder
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Reply-based reminders armed on the scheduler, acknowledged by reaction
//! - 1.0.0: Extracted from command_handler.rs

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::{CommandOutcome, IncomingMessage, MessageCommandHandler};
use crate::features::reminders::{parse_duration, Acknowledgement, NewReminder, ReminderId};

/// Handler for the reminder commands
pub struct RemindHandler;

#[async_trait]
impl MessageCommandHandler for RemindHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["remindme", "r", "reminder"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        message: &IncomingMessage,
        payload: &str,
    ) -> Result<CommandOutcome> {
        match Self::schedule(&ctx, message, payload).await {
            Ok(id) => {
                ctx.notifier
                    .acknowledge(message.chat_id, message.message_id, Acknowledgement::Accepted)
                    .await?;
                Ok(CommandOutcome::Scheduled(id))
            }
            Err(e) => {
                warn!(
                    "Rejected reminder command in chat {} ({:?}): {e}",
                    message.chat_id, payload
                );
                ctx.notifier
                    .acknowledge(message.chat_id, message.message_id, Acknowledgement::Rejected)
                    .await?;
                Ok(CommandOutcome::Rejected(e.to_string()))
            }
        }
    }
}

impl RemindHandler {
    /// Persist and arm a reminder for the message (or the message it replies to)
    async fn schedule(
        ctx: &CommandContext,
        message: &IncomingMessage,
        payload: &str,
    ) -> Result<ReminderId> {
        let text = Self::duration_text(payload, message.reply_to.is_some())
            .ok_or_else(|| anyhow!("No duration given, expected something like \"in 2 hours\""))?;
        let duration = chrono::Duration::from_std(parse_duration(text)?)?;

        let now = ctx.clock.now();
        let due_at = now
            .checked_add_signed(duration)
            .ok_or_else(|| anyhow!("Duration {text:?} is too far in the future"))?;

        let id = ctx
            .store
            .create(NewReminder {
                due_at,
                created_at: now,
                target_message_id: message.reply_to.unwrap_or(message.message_id),
                target_chat_id: message.chat_id,
            })
            .await?;
        ctx.scheduler.arm(id).await?;

        info!(
            "Created reminder {} in chat {} due {}",
            id, message.chat_id, due_at
        );
        Ok(id)
    }

    /// Pick the duration out of a command payload
    ///
    /// Replies carry only the duration (`/r in 2 hours`). Standalone messages
    /// carry a note followed by ` in <duration>`; the last ` in ` wins, and a
    /// bare `in <duration>` is accepted when there is no note.
    fn duration_text(payload: &str, is_reply: bool) -> Option<&str> {
        let payload = payload.trim();
        let text = if is_reply {
            payload.strip_prefix("in ").unwrap_or(payload)
        } else {
            match payload.rsplit_once(" in ") {
                Some((_, duration)) => duration,
                None => payload.strip_prefix("in ")?,
            }
        };

        let text = text.trim();
        (!text.is_empty()).then_some(text)
    }
}
