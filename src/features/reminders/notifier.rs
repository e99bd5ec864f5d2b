//! Notification delivery
//!
//! - **Version**: 1.0.0
//! - **Since**: 2.0.0

use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::channel::ReactionType;
use serenity::model::id::{ChannelId, MessageId};
use std::sync::Arc;

use crate::core::ReminderError;

/// Reaction left on the message that issued a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    Accepted,
    Rejected,
}

impl Acknowledgement {
    pub fn emoji(self) -> &'static str {
        match self {
            Acknowledgement::Accepted => "🫡",
            Acknowledgement::Rejected => "🤨",
        }
    }
}

/// Delivers reminder messages and command acknowledgements to the chat platform
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `text` to `chat_id` as a reply to `reply_to_message_id`
    async fn send(
        &self,
        chat_id: u64,
        reply_to_message_id: u64,
        text: &str,
    ) -> Result<(), ReminderError>;

    /// React to a message to signal whether its command was accepted
    async fn acknowledge(
        &self,
        chat_id: u64,
        message_id: u64,
        ack: Acknowledgement,
    ) -> Result<(), ReminderError>;
}

/// Discord implementation backed by serenity's HTTP client
#[derive(Clone)]
pub struct DiscordNotifier {
    http: Arc<Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(
        &self,
        chat_id: u64,
        reply_to_message_id: u64,
        text: &str,
    ) -> Result<(), ReminderError> {
        let channel = ChannelId(chat_id);
        channel
            .send_message(&self.http, |m| {
                m.content(text)
                    .reference_message((channel, MessageId(reply_to_message_id)))
            })
            .await?;
        Ok(())
    }

    async fn acknowledge(
        &self,
        chat_id: u64,
        message_id: u64,
        ack: Acknowledgement,
    ) -> Result<(), ReminderError> {
        ChannelId(chat_id)
            .create_reaction(
                &self.http,
                MessageId(message_id),
                ReactionType::Unicode(ack.emoji().to_string()),
            )
            .await?;
        Ok(())
    }
}
