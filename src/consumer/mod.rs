//! Event handling contract and the default logging handler.
//!
//! The [`EventHandler`] trait is the only boundary between the retry engine
//! and business logic. A handler receives one event and answers with an
//! acknowledgment; an `Err` is treated by the worker exactly like a
//! negative acknowledgment, so a handler failure can never terminate the
//! worker loop.

use async_trait::async_trait;
use tracing::info;

use crate::error::HandlerError;
use crate::events::Event;

/// Acknowledgment returned by a handler for one processing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// The event is done; discard it.
    Accepted,
    /// The event needs another attempt; requeue it with `retry + 1`.
    Retry,
}

impl Ack {
    /// Returns whether this acknowledgment is terminal.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Ack::Accepted)
    }
}

/// Processes events dispatched by the queue worker.
///
/// Invocations never overlap: the worker awaits each call to completion
/// before dequeuing the next job, so a slow handler throttles the whole
/// pipeline.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Attempts to process one event.
    ///
    /// # Errors
    ///
    /// Any error is absorbed by the worker and mapped to [`Ack::Retry`].
    async fn handle(&self, event: &Event) -> Result<Ack, HandlerError>;
}

/// Default handler: logs the received event and acknowledges it.
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl LoggingHandler {
    /// Creates a new logging handler.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for LoggingHandler {
    async fn handle(&self, event: &Event) -> Result<Ack, HandlerError> {
        info!(
            event_id = %event.event_id,
            event_type = %event.event_type(),
            retry = event.retry,
            payload = ?event.kind,
            "Event received"
        );

        Ok(Ack::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, User};

    #[test]
    fn test_ack_is_accepted() {
        assert!(Ack::Accepted.is_accepted());
        assert!(!Ack::Retry.is_accepted());
    }

    #[tokio::test]
    async fn test_logging_handler_acknowledges() {
        let handler = LoggingHandler::new();
        let event = Event::new(EventKind::UserCreated(User {
            id: "user-1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }));

        let ack = handler.handle(&event).await.expect("handler should not fail");
        assert_eq!(ack, Ack::Accepted);
    }
}
