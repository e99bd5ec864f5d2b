//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Reminder store, notifier, clock and scheduler replace the AI services
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;

use crate::features::reminders::{
    Clock, Notifier, ReminderScheduler, ReminderStore, SchedulerContext,
};

/// Shared context for all command handlers
///
/// Holds the same collaborators the scheduler was built with, plus a handle to
/// the scheduler itself so new reminders can be armed.
#[derive(Clone)]
pub struct CommandContext {
    pub store: Arc<dyn ReminderStore>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    pub scheduler: ReminderScheduler,
}

impl CommandContext {
    pub fn new(services: &SchedulerContext, scheduler: ReminderScheduler) -> Self {
        Self {
            store: Arc::clone(&services.store),
            notifier: Arc::clone(&services.notifier),
            clock: Arc::clone(&services.clock),
            scheduler,
        }
    }
}
