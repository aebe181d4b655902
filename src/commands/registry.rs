//! Ordered command registry
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::sync::Arc;

use super::handler::LocalCommand;

/// Commands in match priority order; the first registered match wins
#[derive(Clone, Default)]
pub struct CommandRegistry {
    handlers: Vec<Arc<dyn LocalCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler at the lowest priority
    pub fn register(&mut self, handler: Arc<dyn LocalCommand>) {
        self.handlers.push(handler);
    }

    /// First handler whose trigger occurs in `input`
    pub fn find(&self, input: &str) -> Option<Arc<dyn LocalCommand>> {
        self.handlers.iter().find(|h| h.matches(input)).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered names in priority order
    pub fn command_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|h| h.name())
    }
}

impl FromIterator<Arc<dyn LocalCommand>> for CommandRegistry {
    fn from_iter<I: IntoIterator<Item = Arc<dyn LocalCommand>>>(iter: I) -> Self {
        CommandRegistry {
            handlers: iter.into_iter().collect(),
        }
    }
}
