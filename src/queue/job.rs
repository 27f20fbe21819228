//! Job definitions for the retry queue.
//!
//! A `Job` is the unit the queue owns: one event plus admission metadata.
//! Jobs are single-use — a job is executed at most once, and a failed
//! attempt is answered by admitting a *new* job built with [`Job::retry`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// A unit of work pending in, or dispatched from, the retry queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// The event to process.
    pub event: Event,
    /// When this job was created for admission.
    pub admitted_at: DateTime<Utc>,
}

impl Job {
    /// Wraps an event into a fresh job.
    pub fn new(event: Event) -> Self {
        Self {
            event,
            admitted_at: Utc::now(),
        }
    }

    /// Builds the replacement job for a failed attempt.
    ///
    /// The new job carries the same event id and payload with the retry
    /// counter advanced by one, and a fresh admission timestamp. The
    /// original job is discarded by the worker regardless of outcome.
    pub fn retry(&self) -> Self {
        Self::new(self.event.retried())
    }

    /// Returns how long ago the job was admitted.
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.admitted_at
    }
}
