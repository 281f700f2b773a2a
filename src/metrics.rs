//! Prometheus metrics for the simulator.
//!
//! Each [`Metrics`] owns its own registry, so independent servers (and tests)
//! never share counters.

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    requests: IntCounterVec,
    stream_chunks: IntCounter,
    streams_cancelled: IntCounter,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("simulator_requests_total", "Requests handled, by endpoint and status"),
            &["endpoint", "status"],
        )?;
        let stream_chunks = IntCounter::new(
            "simulator_stream_chunks_total",
            "Streamed data chunks sent to clients",
        )?;
        let streams_cancelled = IntCounter::new(
            "simulator_streams_cancelled_total",
            "Streams dropped by the client before the [DONE] sentinel",
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(stream_chunks.clone()))?;
        registry.register(Box::new(streams_cancelled.clone()))?;

        Ok(Self {
            registry,
            requests,
            stream_chunks,
            streams_cancelled,
        })
    }

    pub fn record_request(&self, endpoint: &str, status: u16) {
        let status = status.to_string();
        self.requests
            .with_label_values(&[endpoint, status.as_str()])
            .inc();
    }

    pub fn record_stream_chunk(&self) {
        self.stream_chunks.inc();
    }

    pub fn record_stream_cancelled(&self) {
        self.streams_cancelled.inc();
    }

    pub fn requests(&self, endpoint: &str, status: u16) -> u64 {
        let status = status.to_string();
        self.requests
            .with_label_values(&[endpoint, status.as_str()])
            .get()
    }

    pub fn stream_chunks(&self) -> u64 {
        self.stream_chunks.get()
    }

    pub fn streams_cancelled(&self) -> u64 {
        self.streams_cancelled.get()
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
