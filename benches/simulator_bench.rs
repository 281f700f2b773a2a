//! Benchmarks for the simulator core.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use llm_simulator::simulator::completion::build_completion;
use llm_simulator::simulator::stream::ChunkSequence;
use llm_simulator::simulator::synthesizer::synthesize_reply;
use llm_simulator::simulator::tokens::estimate_tokens;
use llm_simulator::simulator::types::ChatMessage;

fn conversation(turns: usize) -> Vec<ChatMessage> {
    (0..turns)
        .map(|i| ChatMessage::user(format!("Message number {i} with a little padding text")))
        .collect()
}

fn bench_estimate_tokens(c: &mut Criterion) {
    let text = "lorem ipsum dolor sit amet ".repeat(400);

    c.bench_function("estimate_tokens_10kb", |b| {
        b.iter(|| black_box(estimate_tokens(black_box(&text))))
    });
}

fn bench_build_completion(c: &mut Criterion) {
    let messages = conversation(50);

    c.bench_function("build_completion_50_turns", |b| {
        b.iter(|| {
            let reply = synthesize_reply(black_box(&messages), "gpt-4o");
            black_box(build_completion(reply, "gpt-4o", &messages))
        })
    });
}

fn bench_chunk_sequence(c: &mut Criterion) {
    let messages = conversation(1);

    c.bench_function("chunk_sequence_serialize", |b| {
        b.iter(|| {
            let reply = synthesize_reply(&messages, "gpt-4");
            for chunk in ChunkSequence::from_reply(&reply, "gpt-4") {
                black_box(serde_json::to_string(&chunk).unwrap_or_default());
            }
        })
    });
}

criterion_group!(
    benches,
    bench_estimate_tokens,
    bench_build_completion,
    bench_chunk_sequence,
);
criterion_main!(benches);
