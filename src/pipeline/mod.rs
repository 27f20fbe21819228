//! Pipeline wiring: configuration, admission driver and lifecycle.
//!
//! Data flow: driver timer tick → (if below capacity) pull from the event
//! source → wrap as job → admit into the retry queue → worker loop →
//! handler → ack, or requeue with `retry + 1` on negative ack.

pub mod config;
pub mod driver;
pub mod runner;

pub use config::{PipelineConfig, DEFAULT_INTERVAL_MS, DEFAULT_MAX_QUEUE_LENGTH};
pub use driver::Driver;
pub use runner::{Pipeline, PipelineError};
