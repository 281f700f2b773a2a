//! Non-streaming completion assembly.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::simulator::tokens::{estimate_prompt_tokens, estimate_tokens};
use crate::simulator::types::{
    ChatChoice, ChatCompletionResponse, ChatMessage, Usage, ASSISTANT_ROLE,
    CHAT_COMPLETION_OBJECT, FINISH_REASON_STOP,
};

/// Prefix shared by every completion identifier.
pub const COMPLETION_ID_PREFIX: &str = "chatcmpl-";

/// Hex digits of randomness in a completion identifier (96 bits).
const COMPLETION_ID_HEX_LEN: usize = 24;

/// Generate a fresh `chatcmpl-<24 hex>` identifier.
pub fn new_completion_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{COMPLETION_ID_PREFIX}{}", &hex[..COMPLETION_ID_HEX_LEN])
}

/// Current unix time in whole seconds.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Assemble a full response envelope around an already synthesized reply.
///
/// Prompt tokens are estimated over all message contents joined by single
/// spaces; completion tokens over the reply itself.
pub fn build_completion(
    reply: String,
    model: &str,
    messages: &[ChatMessage],
) -> ChatCompletionResponse {
    let prompt_tokens = estimate_prompt_tokens(messages.iter().map(|m| m.content.as_str()));
    let completion_tokens = estimate_tokens(&reply);

    ChatCompletionResponse {
        id: new_completion_id(),
        object: CHAT_COMPLETION_OBJECT.to_string(),
        created: unix_timestamp(),
        model: model.to_string(),
        choices: vec![ChatChoice {
            index: 0,
            message: ChatMessage::new(ASSISTANT_ROLE, reply),
            finish_reason: FINISH_REASON_STOP.to_string(),
        }],
        usage: Usage::new(prompt_tokens, completion_tokens),
    }
}
