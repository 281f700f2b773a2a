//! Runtime configuration for llm-simulator.
//!
//! Configuration can be loaded from a JSON file or constructed programmatically.
//! Command-line flags override file values. The model catalog and all
//! simulation knobs (delays, error injection) live here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::simulator::catalog::{ModelCatalog, DEFAULT_MODELS};
use crate::simulator::stream::DEFAULT_CHUNK_DELAY;

/// Command-line arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "llm-simulator",
    version,
    about = "OpenAI-compatible LLM behavior simulator"
)]
pub struct Cli {
    /// Host to bind to [default: 0.0.0.0].
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to [default: 8000].
    #[arg(long)]
    pub port: Option<u16>,

    /// Enable auto-reload (delegated to external tooling such as cargo-watch).
    #[arg(long)]
    pub reload: bool,

    /// Path to configuration file (JSON).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,

    /// Delay between streamed chunks, in milliseconds.
    #[arg(long)]
    pub stream_delay_ms: Option<u64>,

    /// Delay before any chat response, in milliseconds.
    #[arg(long)]
    pub response_delay_ms: Option<u64>,

    /// Probability (0.0-1.0) of failing a valid chat request.
    #[arg(long)]
    pub error_rate: Option<f64>,

    /// HTTP status returned for simulated failures.
    #[arg(long)]
    pub error_status_code: Option<u16>,

    /// Comma-separated list of supported models.
    #[arg(long, value_delimiter = ',')]
    pub models: Option<Vec<String>>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,

    /// Simulation behavior.
    pub simulation: SimulationConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `host:port`, resolved by the listener at bind time.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Simulation knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Supported model identifiers.
    pub models: Vec<String>,

    /// Pause between streamed chunks.
    pub stream_chunk_delay_ms: u64,

    /// Pause after validation, before any chat response.
    pub response_delay_ms: u64,

    /// Probability of a simulated failure for a valid chat request.
    pub error_rate: f64,

    /// HTTP status used for simulated failures.
    pub error_status_code: u16,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            stream_chunk_delay_ms: DEFAULT_CHUNK_DELAY.as_millis() as u64,
            response_delay_ms: 0,
            error_rate: 0.0,
            error_status_code: 500,
        }
    }
}

impl SimulationConfig {
    pub fn stream_chunk_delay(&self) -> Duration {
        Duration::from_millis(self.stream_chunk_delay_ms)
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }

    pub fn catalog(&self) -> ModelCatalog {
        ModelCatalog::new(self.models.iter().cloned())
    }
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            let config: Config = serde_json::from_str(&data)
                .with_context(|| format!("parsing config file {}", path.display()))?;
            Ok(config)
        } else {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Build the effective configuration: file (if any), then CLI overrides.
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overlay command-line values on top of this configuration.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(ms) = cli.stream_delay_ms {
            self.simulation.stream_chunk_delay_ms = ms;
        }
        if let Some(ms) = cli.response_delay_ms {
            self.simulation.response_delay_ms = ms;
        }
        if let Some(rate) = cli.error_rate {
            self.simulation.error_rate = rate;
        }
        if let Some(status) = cli.error_status_code {
            self.simulation.error_status_code = status;
        }
        if let Some(models) = &cli.models {
            self.simulation.models = models
                .iter()
                .map(|m| m.trim())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let sim = &self.simulation;
        ensure!(!sim.models.is_empty(), "model catalog must not be empty");
        ensure!(
            (0.0..=1.0).contains(&sim.error_rate),
            "error_rate must be between 0.0 and 1.0, got {}",
            sim.error_rate
        );
        ensure!(
            (400..=599).contains(&sim.error_status_code),
            "error_status_code must be a 4xx or 5xx status, got {}",
            sim.error_status_code
        );
        Ok(())
    }
}
