//! CLI argument definitions and the run entry point.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::consumer::LoggingHandler;
use crate::pipeline::{Pipeline, PipelineConfig, DEFAULT_INTERVAL_MS, DEFAULT_MAX_QUEUE_LENGTH};
use crate::producer::EventProducer;

/// Synthetic organization event pipeline.
#[derive(Parser)]
#[command(name = "orgstream")]
#[command(about = "Run the bounded-admission event pipeline with retry-requeue")]
#[command(version)]
pub struct Cli {
    /// Admission cap: no new event is pulled while the queue holds this many jobs.
    #[arg(long, default_value_t = DEFAULT_MAX_QUEUE_LENGTH)]
    pub max_queue_length: usize,

    /// Admission timer period in milliseconds.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS)]
    pub interval_ms: u64,

    /// Seed for the event producer RNG (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

/// Parses command-line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Runs the pipeline until interrupted.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    info!("Initializing");

    let config = PipelineConfig::new()
        .with_max_queue_length(cli.max_queue_length)
        .with_interval(Duration::from_millis(cli.interval_ms));

    let producer = match cli.seed {
        Some(seed) => EventProducer::with_seed(seed),
        None => EventProducer::new(),
    };

    let mut pipeline = Pipeline::new(config, Box::new(producer), Arc::new(LoggingHandler::new()));
    pipeline.start()?;

    info!("Queue initialized");

    tokio::signal::ctrl_c().await?;
    info!("Interrupt received");

    pipeline.shutdown().await?;
    Ok(())
}
