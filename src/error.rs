//! Error types for orgstream subsystems.
//!
//! Pipeline lifecycle errors live next to their module
//! (`pipeline::PipelineError`); the types here cover the two external
//! collaborators of the queue engine: the event producer and the handler.

use thiserror::Error;

use crate::events::EventType;

/// Errors that can occur while generating a synthetic event.
///
/// Both variants are fatal only to the single generation attempt: the
/// driver logs the error and skips the tick without admitting anything.
#[derive(Debug, Error)]
pub enum ProducerError {
    /// The chosen kind needs an organization-user relationship, but the
    /// tracked set is empty.
    #[error("no organization-user relationships available for {operation}")]
    NoRelationships { operation: EventType },

    /// A fixture pool was configured empty, so nothing can be sampled.
    #[error("cannot sample from empty {0} pool")]
    EmptyPool(&'static str),
}

/// Error raised by an event handler.
///
/// The worker absorbs handler errors entirely: any error is mapped to a
/// negative acknowledgment and answered by a retry admission. It never
/// crosses the queue boundary outward.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler could not process the event.
    #[error("event processing failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producer_error_display() {
        let err = ProducerError::NoRelationships {
            operation: EventType::OrganizationUserRemoved,
        };
        assert!(err.to_string().contains("OrganizationUserRemoved"));

        let err = ProducerError::EmptyPool("user");
        assert!(err.to_string().contains("user"));
    }

    #[test]
    fn test_handler_error_display() {
        let err = HandlerError::Failed("downstream unavailable".to_string());
        assert!(err.to_string().contains("downstream unavailable"));
    }
}
