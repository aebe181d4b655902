//! Current time command

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::LocalCommand;

/// Answers "time" with the clock's local `HH:MM`
pub struct TimeHandler;

#[async_trait]
impl LocalCommand for TimeHandler {
    fn name(&self) -> &'static str {
        "time"
    }

    fn trigger(&self) -> &'static str {
        "time"
    }

    async fn execute(&self, ctx: &CommandContext, _input: &str, request_id: Uuid) -> String {
        let now = ctx.clock.now();
        debug!("[{request_id}] 🕐 Reporting local time {now}");
        format!("The time is {}", now.format("%H:%M"))
    }
}
