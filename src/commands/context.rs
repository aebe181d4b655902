//! Shared context for local command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Clock, reminder store and launcher capabilities

use chrono::Duration;
use std::sync::Arc;

use crate::core::config::DEFAULT_REMINDER_DELAY_SECS;
use crate::core::{Clock, SystemClock};
use crate::features::launcher::{AppLauncher, CommandLauncher};
use crate::features::reminders::ReminderStore;

/// Capabilities every local command may use
///
/// All members are shared handles, so cloning the context shares the same
/// reminder list, clock and launcher.
#[derive(Clone)]
pub struct CommandContext {
    pub clock: Arc<dyn Clock>,
    pub reminders: ReminderStore,
    pub launcher: Arc<dyn AppLauncher>,
    pub reminder_delay: Duration,
}

impl CommandContext {
    pub fn new(
        clock: Arc<dyn Clock>,
        reminders: ReminderStore,
        launcher: Arc<dyn AppLauncher>,
        reminder_delay: Duration,
    ) -> Self {
        Self {
            clock,
            reminders,
            launcher,
            reminder_delay,
        }
    }
}

impl Default for CommandContext {
    fn default() -> Self {
        Self::new(
            Arc::new(SystemClock),
            ReminderStore::new(),
            Arc::new(CommandLauncher::new()),
            Duration::seconds(DEFAULT_REMINDER_DELAY_SECS as i64),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }

    #[tokio::test]
    async fn test_clones_share_reminders() {
        let ctx = CommandContext::default();
        let other = ctx.clone();

        other
            .reminders
            .schedule("x", ctx.clock.now(), Duration::seconds(1))
            .await;
        assert_eq!(ctx.reminders.len().await, 1);
        assert_eq!(ctx.reminder_delay, Duration::seconds(10));
    }
}
