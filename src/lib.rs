//! orgstream: a minimal event-processing pipeline.
//!
//! A producer emits synthetic organization events at a fixed cadence, a
//! driver admits them into a bounded backlog, and a single worker processes
//! them with at-least-once delivery via automatic retry-with-requeue.

pub mod cli;
pub mod consumer;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod producer;
pub mod queue;

// Re-export commonly used error types
pub use error::{HandlerError, ProducerError};
