//! Reminder record types

use chrono::{DateTime, Utc};
use std::fmt;

/// Store-assigned reminder identifier, stable for the lifetime of the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderId(pub i64);

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A persisted reminder
///
/// There is no update path: a reminder lives from creation until it has been
/// delivered, at which point it is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: ReminderId,
    /// When the notification should fire
    pub due_at: DateTime<Utc>,
    /// When the reminder was set; the notification text counts from here
    pub created_at: DateTime<Utc>,
    /// Message the notification replies to
    pub target_message_id: u64,
    /// Conversation (channel) the notification is sent in
    pub target_chat_id: u64,
}

impl Reminder {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_at <= now
    }
}

/// Arguments for creating a reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub due_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub target_message_id: u64,
    pub target_chat_id: u64,
}

impl NewReminder {
    pub(crate) fn with_id(self, id: ReminderId) -> Reminder {
        Reminder {
            id,
            due_at: self.due_at,
            created_at: self.created_at,
            target_message_id: self.target_message_id,
            target_chat_id: self.target_chat_id,
        }
    }
}
