//! Word-by-word streaming emission.
//!
//! A reply is split on whitespace and delivered as one chunk per word:
//!
//! ```text
//! {role: "assistant", content: "w0 "}    finish_reason: null
//! {content: "w1 "}                       finish_reason: null
//! ...
//! {}                                     finish_reason: "stop"
//! [DONE]
//! ```
//!
//! Every chunk of one response shares a single id and `created` timestamp.
//! [`ChunkSequence`] is the pure, synchronous form; [`emit_stream`] wraps it
//! in a lazy async stream that sleeps between chunks and appends the
//! [`StreamEvent::Done`] sentinel. Dropping the stream mid-flight cancels the
//! pending sleep, so emission halts within one delay interval.

use std::time::Duration;

use futures::stream::{self, Stream};

use crate::simulator::completion::{new_completion_id, unix_timestamp};
use crate::simulator::synthesizer::synthesize_reply;
use crate::simulator::types::{
    ChatCompletionChunk, ChatRequest, ChunkChoice, ChunkDelta, ASSISTANT_ROLE,
    CHAT_COMPLETION_CHUNK_OBJECT, FINISH_REASON_STOP,
};

/// Default pause between consecutive chunks.
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(50);

/// One unit of a streamed response.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A data chunk.
    Chunk(ChatCompletionChunk),
    /// Terminal sentinel; nothing follows it.
    Done,
}

/// The finite chunk sequence for one streamed response.
#[derive(Debug)]
pub struct ChunkSequence {
    id: String,
    created: u64,
    model: String,
    words: std::vec::IntoIter<String>,
    emitted: usize,
    finished: bool,
}

impl ChunkSequence {
    /// Synthesize the reply for `request` and prepare its chunks.
    pub fn new(request: &ChatRequest) -> Self {
        let reply = synthesize_reply(&request.messages, &request.model);
        Self::from_reply(&reply, &request.model)
    }

    /// Prepare chunks for an already synthesized reply.
    pub fn from_reply(reply: &str, model: &str) -> Self {
        let words: Vec<String> = reply.split_whitespace().map(str::to_string).collect();
        Self {
            id: new_completion_id(),
            created: unix_timestamp(),
            model: model.to_string(),
            words: words.into_iter(),
            emitted: 0,
            finished: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created(&self) -> u64 {
        self.created
    }

    /// Chunks produced so far, the terminal one included.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn chunk(&self, delta: ChunkDelta, finish_reason: Option<String>) -> ChatCompletionChunk {
        ChatCompletionChunk {
            id: self.id.clone(),
            object: CHAT_COMPLETION_CHUNK_OBJECT.to_string(),
            created: self.created,
            model: self.model.clone(),
            choices: vec![ChunkChoice {
                index: 0,
                delta,
                finish_reason,
            }],
        }
    }
}

impl Iterator for ChunkSequence {
    type Item = ChatCompletionChunk;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let chunk = match self.words.next() {
            Some(word) => {
                let role = (self.emitted == 0).then(|| ASSISTANT_ROLE.to_string());
                let delta = ChunkDelta {
                    role,
                    content: Some(format!("{word} ")),
                };
                self.chunk(delta, None)
            }
            None => {
                self.finished = true;
                self.chunk(ChunkDelta::default(), Some(FINISH_REASON_STOP.to_string()))
            }
        };

        self.emitted += 1;
        Some(chunk)
    }
}

struct EmitState {
    chunks: ChunkSequence,
    delay: Duration,
    done: bool,
}

/// Lazily emit the chunks of `request`, pausing `delay` between chunks and
/// ending with [`StreamEvent::Done`].
///
/// The caller is expected to have validated the model already.
pub fn emit_stream(
    request: &ChatRequest,
    delay: Duration,
) -> impl Stream<Item = StreamEvent> + Send + 'static {
    emit_chunks(ChunkSequence::new(request), delay)
}

/// Like [`emit_stream`], for a prepared [`ChunkSequence`].
pub fn emit_chunks(
    chunks: ChunkSequence,
    delay: Duration,
) -> impl Stream<Item = StreamEvent> + Send + 'static {
    let state = EmitState {
        chunks,
        delay,
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        if state.done {
            return None;
        }

        let first = state.chunks.emitted() == 0;
        match state.chunks.next() {
            Some(chunk) => {
                if !first && !state.delay.is_zero() {
                    tokio::time::sleep(state.delay).await;
                }
                Some((StreamEvent::Chunk(chunk), state))
            }
            None => {
                state.done = true;
                Some((StreamEvent::Done, state))
            }
        }
    })
}
