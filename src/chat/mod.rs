//! The FAQ chat widget.
//!
//! [`ChatController`] owns the conversation and the suggested questions;
//! [`ChatSession`] is the interactive terminal front end with slash commands.

mod client;
/// Slash command parsing and autocomplete.
pub mod command;
mod controller;
mod session;
mod ui;

pub use client::{ChatBackend, ChatError, HttpChatBackend};
pub use controller::{
    ChatController, ChatMessage, ChatState, FALLBACK_APOLOGY, FaqSuggestion, Sender,
};
pub use session::{ChatSession, SessionConfig};
