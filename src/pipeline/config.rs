//! Pipeline configuration.

use std::time::Duration;

/// Default admission cap: the driver stops admitting at this queue length.
pub const DEFAULT_MAX_QUEUE_LENGTH: usize = 20;

/// Default admission timer period in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 2000;

/// Default timeout for graceful shutdown.
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the event pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Admission cap checked before each tick's pull. This is the sole
    /// capacity-control mechanism: the queue itself never rejects.
    pub max_queue_length: usize,
    /// Period of the admission timer.
    pub interval: Duration,
    /// Maximum time to wait for the worker and driver to stop.
    pub shutdown_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_queue_length: DEFAULT_MAX_QUEUE_LENGTH,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the admission cap.
    pub fn with_max_queue_length(mut self, max_queue_length: usize) -> Self {
        self.max_queue_length = max_queue_length;
        self
    }

    /// Sets the admission timer period.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the graceful shutdown timeout.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}
