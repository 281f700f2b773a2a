//! Behavioral tests for the simulator core.

use std::time::Duration;

use futures::StreamExt;

use llm_simulator::simulator::completion::build_completion;
use llm_simulator::simulator::stream::{emit_stream, ChunkSequence, StreamEvent};
use llm_simulator::simulator::synthesizer::synthesize_reply;
use llm_simulator::simulator::tokens::estimate_tokens;
use llm_simulator::simulator::types::{ChatMessage, ChatRequest};

fn conversations() -> Vec<Vec<ChatMessage>> {
    vec![
        vec![],
        vec![ChatMessage::user("Hi")],
        vec![ChatMessage::user("Count to five")],
        vec![
            ChatMessage::new("system", "You are a terse assistant."),
            ChatMessage::user("Summarize the plot of a very long novel in one sentence please."),
        ],
        vec![ChatMessage::user("  spaced   out\tmessage\nwith newlines  ")],
    ]
}

#[test]
fn test_usage_total_is_sum() {
    for messages in conversations() {
        let reply = synthesize_reply(&messages, "gpt-4");
        let resp = build_completion(reply, "gpt-4", &messages);
        assert_eq!(
            resp.usage.total_tokens,
            resp.usage.prompt_tokens + resp.usage.completion_tokens
        );
    }
}

#[test]
fn test_completion_tokens_match_reply_estimate() {
    let messages = vec![ChatMessage::user("Hello, this is a test message!")];
    let reply = synthesize_reply(&messages, "gpt-3.5-turbo");
    let resp = build_completion(reply.clone(), "gpt-3.5-turbo", &messages);
    assert_eq!(resp.usage.completion_tokens, estimate_tokens(&reply));
    // "Hello, this is a test message!" is 30 characters.
    assert_eq!(resp.usage.prompt_tokens, 7);
}

#[test]
fn test_streamed_words_match_completion_text() {
    for messages in conversations() {
        let request = ChatRequest::new("gpt-4o-mini", messages.clone()).with_stream(true);
        let full = build_completion(
            synthesize_reply(&messages, "gpt-4o-mini"),
            "gpt-4o-mini",
            &messages,
        );

        let streamed: Vec<String> = ChunkSequence::new(&request)
            .filter_map(|c| c.choices[0].delta.content.clone())
            .collect();

        let expected: Vec<String> = full.choices[0]
            .message
            .content
            .split_whitespace()
            .map(|w| format!("{w} "))
            .collect();
        assert_eq!(streamed, expected);
    }
}

#[test]
fn test_every_chunk_echoes_model() {
    let request = ChatRequest::new("gpt-4-turbo", vec![ChatMessage::user("Hi")]);
    assert!(ChunkSequence::new(&request).all(|c| c.model == "gpt-4-turbo"));
}

#[test]
fn test_only_first_chunk_carries_role() {
    let request = ChatRequest::new("gpt-4", vec![ChatMessage::user("Count to five")]);
    let chunks: Vec<_> = ChunkSequence::new(&request).collect();
    assert_eq!(chunks[0].choices[0].delta.role.as_deref(), Some("assistant"));
    assert!(chunks[1..].iter().all(|c| c.choices[0].delta.role.is_none()));
}

#[tokio::test(start_paused = true)]
async fn test_chunks_are_spaced_by_delay() {
    let delay = Duration::from_millis(50);
    let request = ChatRequest::new("gpt-4", vec![ChatMessage::user("Count to five")]);
    let words = synthesize_reply(&request.messages, &request.model)
        .split_whitespace()
        .count();

    let start = tokio::time::Instant::now();
    let events: Vec<_> = emit_stream(&request, delay).collect().await;
    let elapsed = start.elapsed();

    // Word chunks + terminal chunk + sentinel.
    assert_eq!(events.len(), words + 2);
    // One pause between each pair of consecutive chunks, none before [DONE].
    let expected = delay * words as u32;
    assert!(elapsed >= expected, "elapsed {elapsed:?} < {expected:?}");
    assert!(elapsed < expected + delay, "elapsed {elapsed:?} too long");
}

#[tokio::test(start_paused = true)]
async fn test_first_chunk_is_not_delayed() {
    let request = ChatRequest::new("gpt-4", vec![ChatMessage::user("Hi")]);
    let mut stream = Box::pin(emit_stream(&request, Duration::from_secs(10)));

    let start = tokio::time::Instant::now();
    let first = stream.next().await;
    assert!(matches!(first, Some(StreamEvent::Chunk(_))));
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn test_sentinel_is_last_and_unique() {
    let request = ChatRequest::new("gpt-4", vec![]);
    let mut stream = Box::pin(emit_stream(&request, Duration::ZERO));

    let mut saw_done = false;
    let mut stop_chunks = 0;
    while let Some(event) = stream.next().await {
        assert!(!saw_done, "event after [DONE]");
        match event {
            StreamEvent::Chunk(chunk) => {
                if chunk.choices[0].finish_reason.as_deref() == Some("stop") {
                    assert!(chunk.choices[0].delta.is_empty());
                    stop_chunks += 1;
                }
            }
            StreamEvent::Done => saw_done = true,
        }
    }

    assert!(saw_done);
    assert_eq!(stop_chunks, 1);
}
