//! Speech-to-text
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.1: Child processes are killed and the clip removed when a listen is cancelled
//! - 1.0.0: Recorder command + Whisper transcription via curl

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use uuid::Uuid;

use super::split_command;
use crate::core::VoiceConfig;

/// Captures one utterance and turns it into text
///
/// `Ok(None)` means audio was captured but no speech could be recognised.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn listen(&self) -> Result<Option<String>>;
}

/// Records a clip with an external program, then transcribes it remotely
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    record_command: String,
    transcription_url: String,
    api_key: String,
    model: String,
}

impl CommandRecognizer {
    pub fn new(record_command: &str, base_url: &str, api_key: &str, model: &str) -> Self {
        CommandRecognizer {
            record_command: record_command.to_string(),
            transcription_url: format!("{}/audio/transcriptions", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &VoiceConfig) -> Self {
        Self::new(
            &config.record_command,
            &config.stt_base_url,
            &config.api_key,
            &config.stt_model,
        )
    }

    /// Recorder program and arguments with `{output}` filled in per argument
    fn recorder_argv(&self, output: &str) -> Result<(String, Vec<String>)> {
        let (program, args) = split_command(&self.record_command)?;
        let args = args
            .iter()
            .map(|arg| arg.replace("{output}", output))
            .collect();
        Ok((program.replace("{output}", output), args))
    }

    async fn record_clip(&self, output: &str) -> Result<()> {
        let (program, args) = self.recorder_argv(output)?;

        println!("Listening...");
        debug!("Recording clip with `{program}` {args:?}");

        let status = Command::new(&program)
            .args(&args)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start recorder {}: {}", program, e))?;

        if !status.success() {
            anyhow::bail!("Recorder {program} exited with {status}");
        }
        Ok(())
    }

    async fn transcribe(&self, clip: &str) -> Result<Option<String>> {
        let output = Command::new("curl")
            .args([
                "-s",
                &self.transcription_url,
                "-H",
                &format!("Authorization: Bearer {}", self.api_key),
                "-H",
                "Content-Type: multipart/form-data",
                "-F",
                &format!("file=@{clip}"),
                "-F",
                &format!("model={}", self.model),
            ])
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Transcription request failed: {stderr}");
            anyhow::bail!("Transcription request failed: {}", stderr);
        }

        parse_transcription(&String::from_utf8(output.stdout)?)
    }
}

/// Temporary clip file, removed when dropped
///
/// Removal happens in `Drop` so a cancelled listen cleans up too.
struct TempClip {
    path: PathBuf,
}

impl TempClip {
    fn new() -> Self {
        TempClip {
            path: std::env::temp_dir().join(format!("vox_clip_{}.wav", Uuid::new_v4())),
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn path_str(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

impl Drop for TempClip {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to cleanup clip {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Extract the recognised text from a transcription response body
fn parse_transcription(body: &str) -> Result<Option<String>> {
    let json: serde_json::Value = serde_json::from_str(body)?;

    if let Some(text) = json.get("text").and_then(|t| t.as_str()) {
        let text = text.trim();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    } else if let Some(error) = json.get("error") {
        Err(anyhow::anyhow!("Transcription API error: {}", error))
    } else {
        Err(anyhow::anyhow!("Unexpected transcription response format"))
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn listen(&self) -> Result<Option<String>> {
        let clip = TempClip::new();
        let clip_str = clip.path_str();

        self.record_clip(&clip_str).await?;
        let transcription = self.transcribe(&clip_str).await;
        debug!("Finished with clip {}", clip.path().display());

        if let Ok(Some(text)) = &transcription {
            info!("Transcribed {} characters", text.len());
        }
        transcription
    }
}
