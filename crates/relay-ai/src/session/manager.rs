//! Session struct and conversation state.

use std::sync::atomic::AtomicBool;

use crate::{Message, Role, TokenUsage};

/// A conversation session with message history and token accounting.
pub struct Session {
    /// Conversation message history.
    pub(super) messages: Vec<Message>,
    /// System prompt (prepended to every API call).
    pub(super) system_prompt: Option<String>,
    /// Cumulative token usage across turns.
    pub(super) usage: TokenUsage,
    /// Number of API calls made.
    pub(super) call_count: u64,
    /// Whether the session is currently processing a request.
    pub(super) busy: AtomicBool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            usage: TokenUsage::default(),
            call_count: 0,
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub(super) fn build_messages(&self) -> Vec<Message> {
        let mut msgs = Vec::new();
        if let Some(ref system) = self.system_prompt {
            msgs.push(Message {
                role: Role::System,
                content: system.clone(),
            });
        }
        msgs.extend(self.messages.clone());
        msgs
    }

    /// Get the full conversation history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get cumulative token usage.
    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    /// Get number of API calls.
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Clear conversation history and counters.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.usage = TokenUsage::default();
        self.call_count = 0;
    }

    /// Number of messages in history.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
