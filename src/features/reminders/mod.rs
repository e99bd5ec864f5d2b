//! # Reminders Feature
//!
//! Durable "remind me in <duration>" reminders: persisted on creation, fired once
//! as a reply to the target message, caught up on startup after downtime.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Heap-driven scheduler with startup reconciliation, pluggable store and notifier
//! - 1.0.0: Initial polling scheduler

pub mod clock;
pub mod duration;
pub mod model;
pub mod notifier;
pub mod scheduler;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::{Clock, SystemClock};
pub use duration::{format_elapsed, notification_text, parse_duration};
pub use model::{NewReminder, Reminder, ReminderId};
pub use notifier::{Acknowledgement, DiscordNotifier, Notifier};
pub use scheduler::{ReconcileReport, ReminderScheduler, SchedulerContext, SchedulerLoop};
pub use store::ReminderStore;
