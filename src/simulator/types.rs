//! OpenAI-compatible request and response types.
//!
//! Only `model`, `messages` and `stream` drive simulator behavior. The other
//! request fields are parsed so that well-formed client payloads are accepted,
//! but they are never enforced.

use serde::{Deserialize, Serialize};

/// Model used when a request omits the `model` field.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

pub const CHAT_COMPLETION_OBJECT: &str = "chat.completion";
pub const CHAT_COMPLETION_CHUNK_OBJECT: &str = "chat.completion.chunk";
pub const ASSISTANT_ROLE: &str = "assistant";
pub const FINISH_REASON_STOP: &str = "stop";

// ─── Request Types ─────────────────────────────────────────────────────────

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

/// Stop sequences, accepted either as a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopSequences {
    Single(String),
    Many(Vec<String>),
}

/// Chat completion request (OpenAI-compatible).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default = "default_model")]
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default = "default_temperature")]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "default_top_p")]
    pub top_p: Option<f64>,
    /// Accepted but ignored: exactly one choice is always produced.
    #[serde(default = "default_n")]
    pub n: Option<u32>,
    #[serde(default)]
    pub stop: Option<StopSequences>,
    #[serde(default)]
    pub stream: Option<bool>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_temperature() -> Option<f64> {
    Some(1.0)
}
fn default_top_p() -> Option<f64> {
    Some(1.0)
}
fn default_n() -> Option<u32> {
    Some(1)
}

impl ChatRequest {
    /// Build a non-streaming request with default sampling parameters.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: default_temperature(),
            max_tokens: None,
            top_p: default_top_p(),
            n: default_n(),
            stop: None,
            stream: None,
        }
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = Some(stream);
        self
    }

    /// `stream: null` and an absent field both mean a single JSON response.
    pub fn is_streaming(&self) -> bool {
        self.stream.unwrap_or(false)
    }
}

// ─── Response Types ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

impl Usage {
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: usize,
    pub message: ChatMessage,
    pub finish_reason: String,
}

/// Chat completion response (non-streaming).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

/// Streaming chat completion chunk (OpenAI-compatible).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChunk {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub model: String,
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    pub index: usize,
    pub delta: ChunkDelta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChunkDelta {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.content.is_none()
    }
}

/// Model listing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub object: String,
    pub created: u64,
    pub owned_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: ChatRequest =
            serde_json::from_str(r#"{"messages":[{"role":"user","content":"Hi"}]}"#).unwrap();
        assert_eq!(req.model, DEFAULT_MODEL);
        assert_eq!(req.temperature, Some(1.0));
        assert_eq!(req.top_p, Some(1.0));
        assert_eq!(req.n, Some(1));
        assert!(req.max_tokens.is_none());
        assert!(!req.is_streaming());
    }

    #[test]
    fn test_request_ignores_unknown_fields() {
        let req: ChatRequest = serde_json::from_str(
            r#"{"model":"gpt-4","messages":[],"stream":null,"user":"abc","seed":7}"#,
        )
        .unwrap();
        assert_eq!(req.model, "gpt-4");
        assert!(req.messages.is_empty());
        assert!(!req.is_streaming());
    }

    #[test]
    fn test_stop_accepts_string_or_list() {
        let single: ChatRequest =
            serde_json::from_str(r#"{"messages":[],"stop":"END"}"#).unwrap();
        assert_eq!(single.stop, Some(StopSequences::Single("END".into())));

        let many: ChatRequest =
            serde_json::from_str(r#"{"messages":[],"stop":["a","b"]}"#).unwrap();
        assert_eq!(
            many.stop,
            Some(StopSequences::Many(vec!["a".into(), "b".into()]))
        );
    }

    #[test]
    fn test_messages_required() {
        assert!(serde_json::from_str::<ChatRequest>(r#"{"model":"gpt-4"}"#).is_err());
    }

    #[test]
    fn test_usage_total() {
        let usage = Usage::new(7, 11);
        assert_eq!(usage.total_tokens, 18);
    }

    #[test]
    fn test_empty_delta_serializes_as_empty_object() {
        let json = serde_json::to_value(ChunkDelta::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
