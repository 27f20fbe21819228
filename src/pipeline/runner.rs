//! Pipeline assembly and lifecycle.
//!
//! [`Pipeline`] owns the queue and wires the three moving parts together:
//! the driver (admission), the worker (draining) and the handler (business
//! logic). It provides a graceful start/shutdown lifecycle so the process
//! — and the tests — can drive the whole system deterministically.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::consumer::EventHandler;
use crate::producer::EventSource;
use crate::queue::{RetryQueue, Worker};

use super::config::PipelineConfig;
use super::driver::Driver;

/// Errors that can occur in the pipeline lifecycle.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The pipeline is already running.
    #[error("pipeline is already running")]
    AlreadyRunning,

    /// The pipeline is not running.
    #[error("pipeline is not running")]
    NotRunning,

    /// A stopped pipeline cannot be started again.
    #[error("pipeline cannot be restarted once stopped")]
    NotRestartable,

    /// The worker and driver did not stop within the timeout.
    #[error("shutdown timed out after {0:?}")]
    ShutdownTimeout(Duration),
}

/// The assembled event pipeline: driver → queue → worker → handler.
pub struct Pipeline {
    config: PipelineConfig,
    queue: Arc<RetryQueue>,
    handler: Arc<dyn EventHandler>,
    /// Taken when the driver is spawned; a pipeline runs at most once.
    source: Option<Box<dyn EventSource>>,
    shutdown_tx: broadcast::Sender<()>,
    handles: Vec<JoinHandle<()>>,
    running: bool,
}

impl Pipeline {
    /// Creates a pipeline from its collaborators. Nothing runs until
    /// [`Pipeline::start`] is called.
    pub fn new(
        config: PipelineConfig,
        source: Box<dyn EventSource>,
        handler: Arc<dyn EventHandler>,
    ) -> Self {
        // Buffer size of 1 is sufficient since shutdown is sent once.
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            queue: Arc::new(RetryQueue::new()),
            handler,
            source: Some(source),
            shutdown_tx,
            handles: Vec::new(),
            running: false,
        }
    }

    /// Spawns the worker and the driver.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::AlreadyRunning`] if already started, or
    /// [`PipelineError::NotRestartable`] after a shutdown.
    pub fn start(&mut self) -> Result<(), PipelineError> {
        if self.running {
            return Err(PipelineError::AlreadyRunning);
        }
        let source = self.source.take().ok_or(PipelineError::NotRestartable)?;

        let worker = Worker::new(
            Arc::clone(&self.queue),
            Arc::clone(&self.handler),
            self.shutdown_tx.subscribe(),
        );
        self.handles.push(worker.spawn());

        let driver = Driver::new(
            self.config.clone(),
            Arc::clone(&self.queue),
            source,
            self.shutdown_tx.subscribe(),
        );
        self.handles.push(driver.spawn());

        self.running = true;
        info!(
            max_queue_length = self.config.max_queue_length,
            interval_ms = self.config.interval.as_millis() as u64,
            "Pipeline started"
        );

        Ok(())
    }

    /// Gracefully stops the driver and the worker.
    ///
    /// The worker finishes its in-flight job before stopping; pending jobs
    /// are dropped with the queue.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NotRunning`] if not started, or
    /// [`PipelineError::ShutdownTimeout`] if the tasks do not stop in time.
    pub async fn shutdown(&mut self) -> Result<(), PipelineError> {
        if !self.running {
            return Err(PipelineError::NotRunning);
        }

        info!("Initiating pipeline shutdown");

        // Ignore send errors - the tasks may have already stopped.
        let _ = self.shutdown_tx.send(());
        self.running = false;

        let handles: Vec<_> = self.handles.drain(..).collect();
        let drain = async move {
            for handle in handles {
                if let Err(e) = handle.await {
                    error!(error = %e, "Pipeline task panicked during shutdown");
                }
            }
        };

        match tokio::time::timeout(self.config.shutdown_timeout, drain).await {
            Ok(()) => {
                info!("Pipeline shutdown complete");
                Ok(())
            }
            Err(_) => Err(PipelineError::ShutdownTimeout(self.config.shutdown_timeout)),
        }
    }

    /// Returns the shared queue.
    pub fn queue(&self) -> &Arc<RetryQueue> {
        &self.queue
    }

    /// Returns whether the pipeline is currently running.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::{Ack, LoggingHandler};
    use crate::error::HandlerError;
    use crate::events::Event;
    use crate::producer::EventProducer;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        handled: AtomicUsize,
    }

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _event: &Event) -> Result<Ack, HandlerError> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            Ok(Ack::Accepted)
        }
    }

    fn fast_config() -> PipelineConfig {
        PipelineConfig::new()
            .with_interval(Duration::from_millis(10))
            .with_shutdown_timeout(Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_start_twice_fails() {
        let mut pipeline = Pipeline::new(
            fast_config(),
            Box::new(EventProducer::with_seed(1)),
            Arc::new(LoggingHandler::new()),
        );

        pipeline.start().expect("first start should succeed");
        assert!(matches!(
            pipeline.start(),
            Err(PipelineError::AlreadyRunning)
        ));

        pipeline.shutdown().await.expect("shutdown should succeed");
    }

    #[tokio::test]
    async fn test_shutdown_without_start_fails() {
        let mut pipeline = Pipeline::new(
            fast_config(),
            Box::new(EventProducer::with_seed(1)),
            Arc::new(LoggingHandler::new()),
        );

        assert!(matches!(
            pipeline.shutdown().await,
            Err(PipelineError::NotRunning)
        ));
    }

    #[tokio::test]
    async fn test_restart_after_shutdown_fails() {
        let mut pipeline = Pipeline::new(
            fast_config(),
            Box::new(EventProducer::with_seed(1)),
            Arc::new(LoggingHandler::new()),
        );

        pipeline.start().expect("start should succeed");
        pipeline.shutdown().await.expect("shutdown should succeed");
        assert!(matches!(
            pipeline.start(),
            Err(PipelineError::NotRestartable)
        ));
    }

    #[tokio::test]
    async fn test_events_flow_end_to_end() {
        let handler = Arc::new(CountingHandler {
            handled: AtomicUsize::new(0),
        });
        let mut pipeline = Pipeline::new(
            fast_config(),
            Box::new(EventProducer::with_seed(42)),
            Arc::clone(&handler) as Arc<dyn EventHandler>,
        );

        pipeline.start().expect("start should succeed");
        tokio::time::sleep(Duration::from_millis(150)).await;
        pipeline.shutdown().await.expect("shutdown should succeed");

        assert!(handler.handled.load(Ordering::SeqCst) > 0);
        assert!(!pipeline.is_running());
    }
}
