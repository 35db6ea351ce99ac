//! Async chat method for Session.

use crate::{AiClient, AiError, Message, Role};

use super::manager::Session;
use super::types::BusyGuard;

impl Session {
    /// Add a user message and get the assistant's response.
    ///
    /// The full history (plus the system prompt, if any) is sent on every
    /// call, so the provider sees the whole conversation each turn.
    pub async fn chat(
        &mut self,
        client: &dyn AiClient,
        user_message: impl Into<String>,
    ) -> Result<String, AiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        self.messages.push(Message {
            role: Role::User,
            content: user_message.into(),
        });

        let messages = self.build_messages();
        let response = client.send_message(&messages).await?;

        // Field updates only: the busy guard borrows `self.busy` for the
        // rest of the method, so no `&mut self` calls from here on.
        self.usage.input_tokens += response.usage.input_tokens;
        self.usage.output_tokens += response.usage.output_tokens;
        self.call_count += 1;
        self.messages.push(Message {
            role: Role::Assistant,
            content: response.content.clone(),
        });

        Ok(response.content)
    }
}
