//! Reminder command handler
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use async_trait::async_trait;
use log::info;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::LocalCommand;

/// Text delivered when a "remind me" reminder falls due
pub const REMINDER_MESSAGE: &str = "Reminder: Don't forget!";

/// Schedules a fixed reminder after the context's reminder delay
pub struct RemindHandler;

#[async_trait]
impl LocalCommand for RemindHandler {
    fn name(&self) -> &'static str {
        "remind"
    }

    fn trigger(&self) -> &'static str {
        "remind me"
    }

    async fn execute(&self, ctx: &CommandContext, _input: &str, request_id: Uuid) -> String {
        let reminder = ctx
            .reminders
            .schedule(REMINDER_MESSAGE, ctx.clock.now(), ctx.reminder_delay)
            .await;

        info!(
            "[{request_id}] ⏰ Created reminder due at {}",
            reminder.fire_at.format("%H:%M:%S")
        );

        format!(
            "Okay, I’ll remind you in {}.",
            Self::format_duration(ctx.reminder_delay.num_seconds())
        )
    }
}

impl RemindHandler {
    /// Format a duration in seconds without dropping any remainder
    fn format_duration(seconds: i64) -> String {
        fn unit(value: i64, name: &str) -> String {
            format!("{} {}{}", value, name, if value == 1 { "" } else { "s" })
        }

        let hours = seconds / 3600;
        let mins = (seconds % 3600) / 60;
        let secs = seconds % 60;

        let mut parts = Vec::new();
        if hours > 0 {
            parts.push(unit(hours, "hour"));
        }
        if mins > 0 {
            parts.push(unit(mins, "minute"));
        }
        if secs > 0 || parts.is_empty() {
            parts.push(unit(secs, "second"));
        }
        parts.join(" ")
    }
}
