//! Admission driver: the periodic timer feeding the queue.
//!
//! The driver bounds the rate and volume of admission. On each tick it
//! checks the queue length against the configured cap, pulls one event
//! from the source if there is room, and admits it. A source error means
//! "skip this tick" — the timer loop itself never crashes on one.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::producer::EventSource;
use crate::queue::{Job, RetryQueue};

use super::config::PipelineConfig;

/// Periodic admission loop: Idle → tick → check capacity → admit or skip.
pub struct Driver {
    queue: Arc<RetryQueue>,
    source: Box<dyn EventSource>,
    config: PipelineConfig,
    shutdown_rx: broadcast::Receiver<()>,
}

impl Driver {
    /// Creates a driver bound to a queue and an event source.
    pub fn new(
        config: PipelineConfig,
        queue: Arc<RetryQueue>,
        source: Box<dyn EventSource>,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            queue,
            source,
            config,
            shutdown_rx,
        }
    }

    /// Spawns the driver loop onto the runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Main driver loop. Runs until shutdown; there is no terminal state.
    async fn run(mut self) {
        info!(
            max_queue_length = self.config.max_queue_length,
            interval_ms = self.config.interval.as_millis() as u64,
            "Driver started"
        );

        let mut tick = tokio::time::interval(self.config.interval);
        // A slow source call must not cause a burst of catch-up ticks.
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.shutdown_rx.recv() => break,
                _ = tick.tick() => {}
            }
            self.tick();
        }

        info!("Driver stopped");
    }

    /// One admission attempt: check capacity, pull, admit.
    fn tick(&mut self) {
        let length = self.queue.len();
        if length >= self.config.max_queue_length {
            debug!(
                length,
                max_queue_length = self.config.max_queue_length,
                "Queue at capacity, skipping tick"
            );
            return;
        }

        match self.source.next_event() {
            Ok(event) => {
                debug!(
                    event_id = %event.event_id,
                    event_type = %event.event_type(),
                    length,
                    "Admitting event"
                );
                self.queue.admit(Job::new(event));
            }
            Err(error) => {
                // Source exhaustion is not an error state for the system.
                info!(error = %error, "Generating next event");
            }
        }
    }
}
