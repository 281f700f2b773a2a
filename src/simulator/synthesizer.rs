//! Deterministic placeholder replies.

use crate::simulator::types::ChatMessage;

/// Characters of the last message quoted back in the reply.
pub const ECHO_PREVIEW_CHARS: usize = 50;

/// Stand-in for the last message when a request has none.
pub const NO_MESSAGE_PLACEHOLDER: &str = "No message";

/// Synthesize the reply for a conversation.
///
/// The reply names the model and quotes up to the first 50 characters of the
/// last message, followed by `...` when the message was longer. An empty
/// conversation quotes [`NO_MESSAGE_PLACEHOLDER`].
pub fn synthesize_reply(messages: &[ChatMessage], model: &str) -> String {
    let last = messages
        .last()
        .map(|m| m.content.as_str())
        .unwrap_or(NO_MESSAGE_PLACEHOLDER);

    let preview: String = last.chars().take(ECHO_PREVIEW_CHARS).collect();
    let ellipsis = if last.chars().count() > ECHO_PREVIEW_CHARS {
        "..."
    } else {
        ""
    };

    format!("[Simulator Response] Model: {model}, Message received: '{preview}{ellipsis}'")
}
