//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial implementation with LLM, HTTP, reminder and launcher settings

use anyhow::{Context, Result};
use std::time::Duration;

/// Groq's OpenAI-compatible endpoint
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai/v1/";
pub const DEFAULT_LLM_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_REMINDER_DELAY_SECS: u64 = 10;
pub const DEFAULT_NOTEPAD_COMMAND: &str = "notepad.exe";
pub const DEFAULT_STT_MODEL: &str = "whisper-large-v3-turbo";
/// `{output}` is replaced with the path of the clip to write
pub const DEFAULT_RECORD_COMMAND: &str = "arecord -q -f S16_LE -r 16000 -c 1 -d 5 {output}";
#[cfg(target_os = "macos")]
pub const DEFAULT_TTS_COMMAND: &str = "say";
#[cfg(not(target_os = "macos"))]
pub const DEFAULT_TTS_COMMAND: &str = "espeak";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_timeout: Option<Duration>,
    pub bind_addr: String,
    pub log_level: String,
    pub reminder_delay: Duration,
    pub notepad_command: String,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// Fails fast when `GROQ_API_KEY` is missing or blank so the server never
    /// starts in a state where every model call would be rejected.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (used by `from_env` and tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("GROQ_API_KEY must be set"))?;

        let llm_temperature = match lookup("LLM_TEMPERATURE") {
            Some(raw) => raw
                .trim()
                .parse::<f32>()
                .with_context(|| format!("LLM_TEMPERATURE is not a number: {raw}"))?,
            None => DEFAULT_TEMPERATURE,
        };

        let llm_timeout = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("LLM_TIMEOUT_SECS is not an integer: {raw}"))?,
            )),
            None => None,
        };

        let reminder_delay = match lookup("REMINDER_DELAY_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("REMINDER_DELAY_SECS is not an integer: {raw}"))?,
            ),
            None => Duration::from_secs(DEFAULT_REMINDER_DELAY_SECS),
        };

        Ok(Config {
            api_key,
            llm_base_url: lookup("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_temperature,
            llm_timeout,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            reminder_delay,
            notepad_command: lookup("NOTEPAD_COMMAND")
                .unwrap_or_else(|| DEFAULT_NOTEPAD_COMMAND.to_string()),
        })
    }
}

/// Settings for the standalone voice loop
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    pub api_key: String,
    pub stt_base_url: String,
    pub stt_model: String,
    pub record_command: String,
    pub tts_command: String,
    pub skip_first: bool,
    pub log_level: String,
}

impl VoiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GROQ_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("GROQ_API_KEY must be set"))?;

        let skip_first = match lookup("VOICE_SKIP_FIRST") {
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => anyhow::bail!("VOICE_SKIP_FIRST is not a boolean: {other}"),
            },
            None => true,
        };

        Ok(VoiceConfig {
            api_key,
            stt_base_url: lookup("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            stt_model: lookup("STT_MODEL").unwrap_or_else(|| DEFAULT_STT_MODEL.to_string()),
            record_command: lookup("VOICE_RECORD_COMMAND")
                .unwrap_or_else(|| DEFAULT_RECORD_COMMAND.to_string()),
            tts_command: lookup("VOICE_TTS_COMMAND")
                .unwrap_or_else(|| DEFAULT_TTS_COMMAND.to_string()),
            skip_first,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}
