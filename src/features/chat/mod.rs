//! # Chat Feature
//!
//! Language-model fallback for input no local command recognises.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod client;

pub use client::{LanguageModel, OpenAiChatClient};
