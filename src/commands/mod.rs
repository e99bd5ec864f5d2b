//! # Command System
//!
//! Prefix message commands (`/remindme`, `/r`, `/reminder`).
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Prefix message commands with reaction acknowledgements
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 1.0.0: Initial reorganization with modular command structure

pub mod context;
pub mod handler;
pub mod handlers;
pub mod parser;
pub mod registry;

// Re-export the CommandHandler from the handler module
pub use crate::command_handler::CommandHandler;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use handler::{CommandOutcome, IncomingMessage, MessageCommandHandler};
pub use handlers::RemindHandler;
pub use parser::{parse_command, ParsedCommand};
pub use registry::CommandRegistry;
