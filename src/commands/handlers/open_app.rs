//! Launch-an-application commands

use async_trait::async_trait;
use log::{info, warn};
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::LocalCommand;

/// Launches an application through the context's launcher and acknowledges
///
/// The acknowledgment is returned even if the launch fails; the failure is
/// only logged.
pub struct OpenAppHandler {
    trigger: &'static str,
    app: &'static str,
    acknowledgment: &'static str,
}

impl OpenAppHandler {
    pub const fn new(trigger: &'static str, app: &'static str, acknowledgment: &'static str) -> Self {
        OpenAppHandler {
            trigger,
            app,
            acknowledgment,
        }
    }

    pub const fn notepad() -> Self {
        Self::new("open notepad", "notepad", "Opening Notepad.")
    }
}

#[async_trait]
impl LocalCommand for OpenAppHandler {
    fn name(&self) -> &'static str {
        self.app
    }

    fn trigger(&self) -> &'static str {
        self.trigger
    }

    async fn execute(&self, ctx: &CommandContext, _input: &str, request_id: Uuid) -> String {
        info!("[{request_id}] 🚀 Opening {}", self.app);
        if let Err(e) = ctx.launcher.launch(self.app).await {
            warn!("[{request_id}] ⚠️ Could not open {}: {e}", self.app);
        }
        self.acknowledgment.to_string()
    }
}
