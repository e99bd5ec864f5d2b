//! Command handler registry
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 2.0.0: Registry of message command handlers keyed by alias
//! - 1.0.0: Initial implementation for handler dispatch

use std::collections::HashMap;
use std::sync::Arc;

use super::handler::MessageCommandHandler;

/// Lookup from command alias to the handler that owns it
///
/// Every name a handler declares is an alias for the same handler, so
/// `remindme`, `r` and `reminder` all resolve to one `RemindHandler`.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn MessageCommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under all of its command names
    ///
    /// A name already taken by an earlier handler is reassigned.
    pub fn register(&mut self, handler: Arc<dyn MessageCommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    /// Handler for a lowercased command name
    pub fn get(&self, name: &str) -> Option<Arc<dyn MessageCommandHandler>> {
        self.handlers.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::CommandContext;
    use crate::commands::handler::{CommandOutcome, IncomingMessage};
    use anyhow::Result;
    use async_trait::async_trait;

    struct StubHandler {
        names: &'static [&'static str],
    }

    #[async_trait]
    impl MessageCommandHandler for StubHandler {
        fn command_names(&self) -> &'static [&'static str] {
            self.names
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _message: &IncomingMessage,
            _payload: &str,
        ) -> Result<CommandOutcome> {
            Ok(CommandOutcome::Ignored)
        }
    }

    fn same_handler(
        a: &Arc<dyn MessageCommandHandler>,
        b: &Arc<dyn MessageCommandHandler>,
    ) -> bool {
        Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
    }

    #[test]
    fn test_aliases_resolve_to_one_handler() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(StubHandler {
            names: &["remindme", "r", "reminder"],
        }));

        let remindme = registry.get("remindme").unwrap();
        assert!(same_handler(&remindme, &registry.get("r").unwrap()));
        assert!(same_handler(&remindme, &registry.get("reminder").unwrap()));
    }

    #[test]
    fn test_unknown_name_has_no_handler() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(StubHandler { names: &["r"] }));

        assert!(registry.get("remind").is_none());
        assert!(registry.get("R").is_none());
        assert!(CommandRegistry::default().get("r").is_none());
    }

    #[test]
    fn test_later_registration_takes_over_alias() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(StubHandler {
            names: &["remindme", "r"],
        }));
        let second: Arc<dyn MessageCommandHandler> = Arc::new(StubHandler { names: &["r"] });
        registry.register(Arc::clone(&second));

        assert!(same_handler(&registry.get("r").unwrap(), &second));
        assert!(!same_handler(&registry.get("remindme").unwrap(), &second));
    }
}
