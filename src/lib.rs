//! llm-simulator: an OpenAI-compatible chat-completion simulator.
//!
//! Answers `/v1/chat/completions` with a deterministic placeholder reply that
//! names the model and quotes the last message, either as one JSON document
//! or as a word-by-word SSE stream. Meant for exercising gateways, SDKs and
//! proxies without running a model.

pub mod config;
pub mod metrics;
pub mod server;
pub mod simulator;
