//! Remote chat-completion client
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Credentials passed per request instead of through process env vars
//! - 1.0.0: Single-turn completion against an OpenAI-compatible endpoint

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, info};
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use openai::Credentials;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use uuid::Uuid;

use crate::core::Config;

/// Anything that can turn a prompt into generated text
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str, request_id: Uuid) -> Result<String>;
}

/// One request per prompt, no history, no retry
///
/// Provider and transport errors are returned to the caller as-is; there is no
/// fallback reply.
#[derive(Clone)]
pub struct OpenAiChatClient {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Option<Duration>,
}

impl OpenAiChatClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        OpenAiChatClient {
            api_key: api_key.into(),
            // Routes are appended to the base URL, so it must end with a slash
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            model: model.into(),
            temperature,
            timeout: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key.clone(),
            &config.llm_base_url,
            config.llm_model.clone(),
            config.llm_temperature,
        )
        .with_timeout(config.llm_timeout)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn credentials(&self) -> Credentials {
        Credentials::new(self.api_key.clone(), self.base_url.clone())
    }

    fn build_messages(prompt: &str) -> Vec<ChatCompletionMessage> {
        vec![ChatCompletionMessage {
            role: ChatCompletionMessageRole::User,
            content: Some(prompt.to_string()),
            name: None,
            function_call: None,
            tool_call_id: None,
            tool_calls: None,
        }]
    }
}

#[async_trait]
impl LanguageModel for OpenAiChatClient {
    async fn complete(&self, prompt: &str, request_id: Uuid) -> Result<String> {
        let start_time = Instant::now();
        info!(
            "[{request_id}] 🤖 Starting chat completion | Model: {} | Temperature: {}",
            self.model, self.temperature
        );
        debug!(
            "[{}] 📝 Prompt preview: '{}'",
            request_id,
            prompt.chars().take(100).collect::<String>()
        );

        let request = ChatCompletion::builder(&self.model, Self::build_messages(prompt))
            .temperature(self.temperature)
            .credentials(self.credentials())
            .create();

        let completion = match self.timeout {
            Some(limit) => timeout(limit, request).await.map_err(|_| {
                error!("[{request_id}] ⏱️ Chat completion timed out after {limit:?}");
                anyhow::anyhow!("Chat completion timed out after {:?}", limit)
            })?,
            None => request.await,
        }
        .map_err(|e| {
            let elapsed = start_time.elapsed();
            error!("[{request_id}] ❌ Chat completion error after {elapsed:?}: {e}");
            anyhow::anyhow!("LLM API error: {}", e)
        })?;

        let elapsed = start_time.elapsed();
        info!("[{request_id}] ✅ Chat completion received after {elapsed:?}");

        if let Some(usage) = &completion.usage {
            debug!(
                "[{request_id}] 📊 Token usage - Prompt: {}, Completion: {}, Total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                error!("[{request_id}] ❌ No content in chat completion");
                anyhow::anyhow!("No response content from LLM")
            })
    }
}
