use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;

use vox_assistant::core::VoiceConfig;
use vox_assistant::features::voice::{CommandRecognizer, CommandSynthesizer, VoiceSession};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = VoiceConfig::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting voice loop (Ctrl-C to stop)...");

    let recognizer = CommandRecognizer::from_config(&config);
    let synthesizer = CommandSynthesizer::new(&config.tts_command)?;

    let (handle, mut utterances) = VoiceSession::new(Arc::new(recognizer), Arc::new(synthesizer))
        .skip_first(config.skip_first)
        .start();

    // Nothing consumes utterances yet; drain so the buffer never fills
    let drain = tokio::spawn(async move { while utterances.recv().await.is_some() {} });

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {e}");
    }

    let heard = handle.stop().await?;
    drain.await?;
    info!("Heard {heard} utterances");
    Ok(())
}
