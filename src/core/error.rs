//! Error taxonomy for reminder storage, scheduling and delivery
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.1.0

use crate::features::reminders::ReminderId;

/// Errors surfaced by the reminder store, notifier and scheduler
#[derive(Debug, thiserror::Error)]
pub enum ReminderError {
    #[error("Reminder {0} not found")]
    NotFound(ReminderId),

    #[error("Reminder {0} is already armed")]
    AlreadyArmed(ReminderId),

    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),

    #[error("Delivery error: {0}")]
    Delivery(#[source] anyhow::Error),

    #[error("Reminder scheduler is not running")]
    SchedulerStopped,
}

impl From<sqlite::Error> for ReminderError {
    fn from(err: sqlite::Error) -> Self {
        ReminderError::Storage(err.into())
    }
}

impl From<serenity::Error> for ReminderError {
    fn from(err: serenity::Error) -> Self {
        ReminderError::Delivery(err.into())
    }
}

/// Errors from parsing a human duration such as "2 hours" or "1h30m"
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("No duration given")]
    Empty,

    #[error("Unknown time unit: {0}")]
    UnknownUnit(String),

    #[error("Could not understand duration: {0}")]
    Unrecognized(String),
}
