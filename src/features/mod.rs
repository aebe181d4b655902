//! # Features Layer
//!
//! Capabilities used by the command system and the two binaries.

pub mod chat;
pub mod launcher;
pub mod reminders;
pub mod voice;

pub use chat::{LanguageModel, OpenAiChatClient};
pub use launcher::{AppLauncher, CommandLauncher, RecordingLauncher};
pub use reminders::{Reminder, ReminderStore};
pub use voice::{
    CommandRecognizer, CommandSynthesizer, SpeechRecognizer, SpeechSynthesizer, VoiceHandle,
    VoiceSession,
};
