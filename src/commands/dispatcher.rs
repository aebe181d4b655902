//! Command dispatcher
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use log::{debug, info};
use uuid::Uuid;

use super::context::CommandContext;
use super::handlers::create_all_handlers;
use super::registry::CommandRegistry;

/// Result of matching input against the local commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A local command produced this reply
    Reply(String),
    /// Nothing matched; ask the language model
    Defer,
}

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: CommandRegistry,
    context: CommandContext,
}

impl CommandDispatcher {
    /// Dispatcher with the built-in commands (time, open notepad, remind me)
    pub fn new(context: CommandContext) -> Self {
        Self::with_registry(create_all_handlers().into_iter().collect(), context)
    }

    pub fn with_registry(registry: CommandRegistry, context: CommandContext) -> Self {
        CommandDispatcher { registry, context }
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    pub async fn dispatch(&self, input: &str, request_id: Uuid) -> DispatchOutcome {
        match self.registry.find(input) {
            Some(handler) => {
                info!("[{request_id}] 🎯 Matched local command: {}", handler.name());
                DispatchOutcome::Reply(handler.execute(&self.context, input, request_id).await)
            }
            None => {
                debug!("[{request_id}] ↪️ No local command matched, deferring to LLM");
                DispatchOutcome::Defer
            }
        }
    }
}
