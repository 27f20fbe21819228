//! The single worker draining the retry queue.
//!
//! Exactly one worker runs per queue — strict single-in-flight processing
//! is a hard invariant of the engine, not a tunable. The worker is an
//! explicit loop rather than a chain of continuations, so an arbitrarily
//! long retry streak never grows the stack.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::consumer::{Ack, EventHandler};

use super::retry_queue::RetryQueue;

/// Serially executes jobs from the queue until shutdown.
pub struct Worker {
    queue: Arc<RetryQueue>,
    handler: Arc<dyn EventHandler>,
    shutdown_rx: broadcast::Receiver<()>,
}

impl Worker {
    /// Creates a worker bound to a queue and a handler.
    pub fn new(
        queue: Arc<RetryQueue>,
        handler: Arc<dyn EventHandler>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            queue,
            handler,
            shutdown_rx,
        }
    }

    /// Spawns the worker loop onto the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Main worker loop.
    ///
    /// Takes the head job, executes it to completion, then takes the next.
    /// A shutdown signal is honored between jobs; an in-flight handler
    /// invocation is always awaited to completion first.
    async fn run(mut self) {
        info!("Worker started");

        let queue = Arc::clone(&self.queue);
        loop {
            let job = tokio::select! {
                _ = self.shutdown_rx.recv() => break,
                job = queue.take() => job,
            };

            self.process(job).await;
        }

        info!("Worker stopped");
    }

    /// Executes one job: invoke the handler, requeue on negative ack.
    ///
    /// A handler error is not a fatal condition for the loop — it maps to
    /// [`Ack::Retry`], exactly like an explicit negative acknowledgment.
    async fn process(&self, job: super::Job) {
        let event = &job.event;

        debug!(
            event_id = %event.event_id,
            event_type = %event.event_type(),
            retry = event.retry,
            "Processing job"
        );

        let ack = match self.handler.handle(event).await {
            Ok(ack) => ack,
            Err(error) => {
                warn!(
                    event_id = %event.event_id,
                    event_type = %event.event_type(),
                    retry = event.retry,
                    error = %error,
                    "Handler failed, treating as negative acknowledgment"
                );
                Ack::Retry
            }
        };

        match ack {
            Ack::Accepted => {
                debug!(
                    event_id = %event.event_id,
                    retry = event.retry,
                    "Job acknowledged"
                );
            }
            Ack::Retry => {
                debug!(
                    event_id = %event.event_id,
                    event_type = %event.event_type(),
                    retry = event.retry,
                    "Adding back event to the queue for retry"
                );
                // Requeue before settling so len() never undercounts.
                self.queue.admit(job.retry());
            }
        }

        self.queue.settle();
    }
}
