//! # Feature: Application Launcher
//!
//! Host side effects triggered by local commands ("open notepad"). Kept behind
//! the [`AppLauncher`] trait so the dispatcher never shells out directly.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::process::Command;

#[async_trait]
pub trait AppLauncher: Send + Sync {
    /// Start the named application without waiting for it to exit
    async fn launch(&self, app: &str) -> Result<()>;
}

/// Launches programs on the host, mapping app names to executables
#[derive(Debug, Clone, Default)]
pub struct CommandLauncher {
    programs: HashMap<String, String>,
}

impl CommandLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an app name to the executable that should be spawned for it
    pub fn with_program(mut self, app: &str, program: &str) -> Self {
        self.programs.insert(app.to_string(), program.to_string());
        self
    }

    fn program_for<'a>(&'a self, app: &'a str) -> &'a str {
        self.programs.get(app).map(String::as_str).unwrap_or(app)
    }
}

#[async_trait]
impl AppLauncher for CommandLauncher {
    async fn launch(&self, app: &str) -> Result<()> {
        let program = self.program_for(app);
        info!("Launching {app} via `{program}`");

        let child = Command::new(program)
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to launch {}: {}", program, e))?;

        debug!("Spawned {program} with pid {:?}", child.id());
        Ok(())
    }
}

/// Records launch requests instead of touching the host
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    launched: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A launcher whose every launch fails after being recorded
    pub fn failing() -> Self {
        RecordingLauncher {
            launched: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl AppLauncher for RecordingLauncher {
    async fn launch(&self, app: &str) -> Result<()> {
        self.launched
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(app.to_string());

        if self.fail {
            anyhow::bail!("launch of {app} refused");
        }
        Ok(())
    }
}
