//! Simulator core: placeholder replies, usage estimation and chunking.
//!
//! - [`types`]: OpenAI-compatible request/response types
//! - [`tokens`]: crude character-based token estimation
//! - [`synthesizer`]: deterministic reply text
//! - [`completion`]: non-streaming response envelopes
//! - [`stream`]: word-by-word streaming emission
//! - [`catalog`]: supported model identifiers

pub mod catalog;
pub mod completion;
pub mod stream;
pub mod synthesizer;
pub mod tokens;
pub mod types;

pub use catalog::{ModelCatalog, DEFAULT_MODELS};
pub use completion::build_completion;
pub use stream::{emit_stream, ChunkSequence, StreamEvent};
pub use synthesizer::synthesize_reply;
pub use tokens::estimate_tokens;
