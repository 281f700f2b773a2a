//! OpenAI-compatible HTTP API.
//!
//! Implements the subset of the OpenAI API a client integration needs:
//! - POST /v1/chat/completions
//! - GET /v1/models
//! - GET /health
//! - GET /
//! - GET /metrics

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{MatchedPath, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::sse::Sse;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::Rng;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::config::{Config, SimulationConfig};
use crate::metrics::Metrics;
use crate::server::error::SimulatorError;
use crate::server::streaming::events_to_sse_stream;
use crate::simulator::catalog::ModelCatalog;
use crate::simulator::completion::{build_completion, unix_timestamp};
use crate::simulator::stream::{emit_chunks, ChunkSequence};
use crate::simulator::synthesizer::synthesize_reply;
use crate::simulator::types::{ChatCompletionResponse, ChatRequest, ModelList};

pub const SERVICE_NAME: &str = "LLM Behavior Simulator";

/// Application state shared across handlers. Read-only after startup.
pub struct AppState {
    pub catalog: ModelCatalog,
    pub simulation: SimulationConfig,
    pub metrics: Arc<Metrics>,
}

/// Outcome of a validated chat request.
#[derive(Debug)]
pub enum ChatReply {
    Completion(ChatCompletionResponse),
    Stream(ChunkSequence),
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            catalog: config.simulation.catalog(),
            simulation: config.simulation.clone(),
            metrics: Arc::new(Metrics::new()?),
        })
    }

    /// Validate `req` and produce either a full completion or the chunk
    /// sequence for a streamed one.
    pub fn dispatch(&self, req: &ChatRequest) -> Result<ChatReply, SimulatorError> {
        if !self.catalog.contains(&req.model) {
            return Err(SimulatorError::InvalidModel {
                model: req.model.clone(),
                available: self.catalog.models().to_vec(),
            });
        }

        self.maybe_inject_failure()?;

        if req.is_streaming() {
            return Ok(ChatReply::Stream(ChunkSequence::new(req)));
        }

        let reply = synthesize_reply(&req.messages, &req.model);
        Ok(ChatReply::Completion(build_completion(
            reply,
            &req.model,
            &req.messages,
        )))
    }

    fn maybe_inject_failure(&self) -> Result<(), SimulatorError> {
        let rate = self.simulation.error_rate;
        if rate > 0.0 && rand::thread_rng().gen::<f64>() < rate {
            let status = StatusCode::from_u16(self.simulation.error_status_code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            return Err(SimulatorError::Injected { status });
        }
        Ok(())
    }
}

/// Build the axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/v1/models", get(list_models))
        .route("/v1/chat/completions", post(chat_completions))
        .route_layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

// ─── Response Types ────────────────────────────────────────────────────────

/// Service description served at `/`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

// ─── Route Handlers ────────────────────────────────────────────────────────

async fn track_requests(
    State(state): State<Arc<AppState>>,
    path: MatchedPath,
    req: Request,
    next: Next,
) -> Response {
    let endpoint = path.as_str().to_owned();
    let response = next.run(req).await;
    state
        .metrics
        .record_request(&endpoint, response.status().as_u16());
    response
}

async fn chat_completions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, SimulatorError> {
    let Json(req) = payload.inspect_err(|rejection| {
        warn!(status = rejection.status().as_u16(), "Malformed chat request: {rejection}");
    })?;

    info!(
        model = req.model,
        messages = req.messages.len(),
        stream = req.is_streaming(),
        "Chat completion request"
    );

    let reply = state.dispatch(&req).inspect_err(|err| {
        warn!(model = req.model, "Chat completion rejected: {err}");
    })?;

    let delay = state.simulation.response_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match reply {
        ChatReply::Stream(chunks) => {
            let request_id = chunks.id().to_string();
            debug!(
                request_id = request_id,
                created = chunks.created(),
                "Streaming response"
            );
            let events = emit_chunks(chunks, state.simulation.stream_chunk_delay());
            let stream = events_to_sse_stream(events, request_id, state.metrics.clone());
            Ok(Sse::new(stream).into_response())
        }
        ChatReply::Completion(response) => {
            debug!(
                request_id = response.id,
                prompt_tokens = response.usage.prompt_tokens,
                completion_tokens = response.usage.completion_tokens,
                "Completion built"
            );
            Ok(Json(response).into_response())
        }
    }
}

async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelList> {
    Json(state.catalog.to_model_list(unix_timestamp()))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "OpenAI-compatible API for testing AI gateways".to_string(),
        endpoints: ["/v1/chat/completions", "/v1/models", "/health", "/metrics"]
            .iter()
            .map(|e| e.to_string())
            .collect(),
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            warn!("Failed to render metrics: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
