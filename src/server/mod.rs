//! HTTP server providing an OpenAI-compatible API.
//!
//! - [`openai_api`]: Route handlers and request dispatch
//! - [`streaming`]: SSE framing for word-by-word responses
//! - [`error`]: Protocol-level error responses

pub mod error;
pub mod openai_api;
pub mod streaming;

pub use error::SimulatorError;
pub use openai_api::{build_router, AppState};
