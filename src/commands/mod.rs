//! # Command System
//!
//! Fixed substring commands answered without calling the language model.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod context;
pub mod dispatcher;
pub mod handler;
pub mod handlers;
pub mod registry;

pub use context::CommandContext;
pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use handler::LocalCommand;
pub use handlers::REMINDER_MESSAGE;
pub use registry::CommandRegistry;
