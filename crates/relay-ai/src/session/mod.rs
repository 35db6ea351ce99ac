//! Conversation session management.
//!
//! A `Session` holds the conversation history (messages) and accumulates
//! token usage across turns.

mod chat;
mod manager;
mod types;

pub use manager::Session;
