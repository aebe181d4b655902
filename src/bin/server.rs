use anyhow::{Context, Result};
use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;

use vox_assistant::core::{Config, SystemClock};
use vox_assistant::features::chat::OpenAiChatClient;
use vox_assistant::features::launcher::CommandLauncher;
use vox_assistant::features::reminders::ReminderStore;
use vox_assistant::http::{router, AppState};
use vox_assistant::{ChatHandler, CommandContext, CommandDispatcher};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting assistant server...");
    info!("🤖 Model: {} @ {}", config.llm_model, config.llm_base_url);

    let reminder_delay = chrono::Duration::from_std(config.reminder_delay)
        .context("REMINDER_DELAY_SECS is out of range")?;
    let launcher = CommandLauncher::new().with_program("notepad", &config.notepad_command);
    let context = CommandContext::new(
        Arc::new(SystemClock),
        ReminderStore::new(),
        Arc::new(launcher),
        reminder_delay,
    );

    let model = OpenAiChatClient::from_config(&config);
    let handler = ChatHandler::new(CommandDispatcher::new(context), Arc::new(model));
    let app = router(AppState { handler });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("HTTP server error: {e}");
        return Err(anyhow::anyhow!("HTTP server failed: {}", e));
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
