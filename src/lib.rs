// Core layer - shared types, configuration and errors
pub mod core;

// Features layer - reminder scheduling
pub mod features;

// Infrastructure
pub mod database;

// Application layer
pub mod command_handler;
pub mod commands;

pub use core::{Config, ReminderError};

pub use features::reminders::{
    Acknowledgement, Clock, DiscordNotifier, Notifier, ReconcileReport, Reminder, ReminderId,
    ReminderScheduler, ReminderStore, SchedulerContext, SchedulerLoop, SystemClock,
};

pub use commands::{CommandContext, CommandHandler, CommandOutcome, IncomingMessage};
