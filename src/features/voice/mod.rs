//! # Voice Feature
//!
//! Standalone speech loop: listen, print, speak back. Not wired into the chat
//! endpoint.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: true

pub mod recognizer;
pub mod session;
pub mod synthesizer;

use anyhow::Result;

pub use recognizer::{CommandRecognizer, SpeechRecognizer};
pub use session::{VoiceHandle, VoiceSession, NOT_UNDERSTOOD, UTTERANCE_BUFFER};
pub use synthesizer::{CommandSynthesizer, SpeechSynthesizer};

/// Split a whitespace-separated command line into program and arguments
pub(crate) fn split_command(command: &str) -> Result<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts
        .next()
        .ok_or_else(|| anyhow::anyhow!("Empty command"))?;
    Ok((program, parts.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_command() {
        let (program, args) = split_command("arecord -d 5 /tmp/x.wav").unwrap();
        assert_eq!(program, "arecord");
        assert_eq!(args, vec!["-d", "5", "/tmp/x.wav"]);
    }

    #[test]
    fn test_split_empty_command() {
        assert!(split_command("").is_err());
    }
}
