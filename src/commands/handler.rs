//! Local command trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use async_trait::async_trait;
use uuid::Uuid;

use super::context::CommandContext;

/// A command answered locally instead of by the language model
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl LocalCommand for PingHandler {
///     fn name(&self) -> &'static str {
///         "ping"
///     }
///
///     fn trigger(&self) -> &'static str {
///         "ping"
///     }
///
///     async fn execute(&self, _ctx: &CommandContext, _input: &str, _request_id: Uuid) -> String {
///         "pong".to_string()
///     }
/// }
/// ```
#[async_trait]
pub trait LocalCommand: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Case-sensitive substring that selects this command
    fn trigger(&self) -> &'static str;

    fn matches(&self, input: &str) -> bool {
        input.contains(self.trigger())
    }

    /// Produce the reply; local commands never fail
    async fn execute(&self, ctx: &CommandContext, input: &str, request_id: Uuid) -> String;
}
