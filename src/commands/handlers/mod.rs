//! Per-command handler implementations
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 3.0.0: Reminder-only command set
//! - 1.0.0: Initial extraction from monolithic command_handler.rs

pub mod remind;

use std::sync::Arc;

use super::handler::MessageCommandHandler;

pub use remind::RemindHandler;

/// Create all registered command handlers
pub fn create_all_handlers() -> Vec<Arc<dyn MessageCommandHandler>> {
    vec![Arc::new(RemindHandler)]
}
