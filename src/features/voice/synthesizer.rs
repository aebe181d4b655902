//! Text-to-speech through an external command (`say`, `espeak`, ...)

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use super::split_command;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text`, returning once playback has finished
    async fn speak(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    /// `command` may carry leading arguments, e.g. `espeak -s 160`
    pub fn new(command: &str) -> Result<Self> {
        let (program, args) = split_command(command)?;
        Ok(CommandSynthesizer { program, args })
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    async fn speak(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            anyhow::bail!("Refusing to speak empty text");
        }

        debug!("Speaking {} characters via {}", text.len(), self.program);
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .status()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start {}: {}", self.program, e))?;

        if !status.success() {
            anyhow::bail!("{} exited with {}", self.program, status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_with_args() {
        let synth = CommandSynthesizer::new("espeak -s 160").unwrap();
        assert_eq!(synth.program, "espeak");
        assert_eq!(synth.args, vec!["-s", "160"]);
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(CommandSynthesizer::new("   ").is_err());
    }

    #[tokio::test]
    async fn test_rejects_empty_text() {
        let synth = CommandSynthesizer::new("true").unwrap();
        assert!(synth.speak("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_program_fails() {
        let synth = CommandSynthesizer::new("definitely-not-a-tts-7f3a").unwrap();
        assert!(synth.speak("hello").await.is_err());
    }
}
