//! Common types used throughout the bot.

use serde::Serialize;

/// Role of a message in the conversation.
///
/// Maps to chat-completions API message roles. The bot only ever sends a
/// single user message per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the human user
    User,
}
