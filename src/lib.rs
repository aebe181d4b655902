// Core layer - configuration and clock
pub mod core;

// Features layer - reminders, launcher, language model, voice
pub mod features;

// Application layer
pub mod chat_handler;
pub mod commands;

// HTTP layer
pub mod http;

pub use chat_handler::ChatHandler;
pub use crate::core::{Config, VoiceConfig};

pub use commands::{CommandContext, CommandDispatcher, DispatchOutcome};
pub use features::{
    AppLauncher, CommandLauncher, LanguageModel, OpenAiChatClient, Reminder, ReminderStore,
};
