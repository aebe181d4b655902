use crate::commands::{CommandContext, CommandDispatcher, DispatchOutcome};
use crate::features::chat::LanguageModel;
use anyhow::Result;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Turns one inbound message into one reply
///
/// Local commands are tried first; anything unmatched goes to the language
/// model. A due reminder, if any, is appended to whichever reply was produced.
/// No conversation history is kept between calls.
#[derive(Clone)]
pub struct ChatHandler {
    dispatcher: CommandDispatcher,
    model: Arc<dyn LanguageModel>,
}

impl ChatHandler {
    pub fn new(dispatcher: CommandDispatcher, model: Arc<dyn LanguageModel>) -> Self {
        ChatHandler { dispatcher, model }
    }

    pub fn context(&self) -> &CommandContext {
        self.dispatcher.context()
    }

    pub async fn handle_message(&self, input: &str) -> Result<String> {
        self.handle_message_with_id(input, Uuid::new_v4()).await
    }

    /// Model errors propagate; no fallback reply is produced
    pub async fn handle_message_with_id(&self, input: &str, request_id: Uuid) -> Result<String> {
        let start_time = Instant::now();
        info!(
            "[{}] 📥 Message received | Length: {} | Content: '{}'",
            request_id,
            input.len(),
            input.chars().take(100).collect::<String>()
        );

        let mut reply = match self.dispatcher.dispatch(input, request_id).await {
            DispatchOutcome::Reply(reply) => reply,
            DispatchOutcome::Defer => {
                info!("[{request_id}] 💬 Deferring to language model");
                self.model.complete(input, request_id).await?
            }
        };

        let context = self.dispatcher.context();
        if let Some(reminder) = context.reminders.check_due(context.clock.now()).await {
            debug!("[{request_id}] ⏰ Appending due reminder to reply");
            reply.push(' ');
            reply.push_str(&reminder);
        }

        info!(
            "[{}] ✅ Message processing completed in {:?} | Reply length: {}",
            request_id,
            start_time.elapsed(),
            reply.len()
        );
        Ok(reply)
    }
}
