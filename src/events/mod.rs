//! Domain event model for the organization event stream.
//!
//! This module defines the core event types flowing through the pipeline:
//!
//! - `Event`: The envelope carried by the queue (`eventId`, `type`, `payload`, `retry`)
//! - `EventKind`: Closed sum type over the five event kinds with their payloads
//! - `User`, `Organization`, `OrganizationUser`: Kind-specific payload shapes
//!
//! The wire shape is `{"eventId": ..., "type": ..., "payload": ..., "retry": ...}`,
//! with `type` discriminating the payload.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a user holds within an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Writer,
    Reader,
}

impl Role {
    /// All roles, in a fixed order (used for random role assignment).
    pub const ALL: [Role; 3] = [Role::Admin, Role::Writer, Role::Reader];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Writer => write!(f, "writer"),
            Role::Reader => write!(f, "reader"),
        }
    }
}

/// A user account, referenced by user-related events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// An organization, referenced by organization-related events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// A user's membership in an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationUser {
    pub organization_id: String,
    pub user_id: String,
    pub role: Role,
}

/// Discriminant for the closed set of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    UserCreated,
    OrganizationCreated,
    OrganizationUserAdded,
    OrganizationUserRemoved,
    OrganizationUserUpdated,
}

impl EventType {
    /// All event types, in a fixed order (used for random kind selection).
    pub const ALL: [EventType; 5] = [
        EventType::UserCreated,
        EventType::OrganizationCreated,
        EventType::OrganizationUserAdded,
        EventType::OrganizationUserRemoved,
        EventType::OrganizationUserUpdated,
    ];

    /// Stable string form, matching the wire `type` tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::UserCreated => "UserCreated",
            EventType::OrganizationCreated => "OrganizationCreated",
            EventType::OrganizationUserAdded => "OrganizationUserAdded",
            EventType::OrganizationUserRemoved => "OrganizationUserRemoved",
            EventType::OrganizationUserUpdated => "OrganizationUserUpdated",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event kind with its strongly-typed payload.
///
/// Adjacently tagged so that flattening into [`Event`] yields the
/// `type`/`payload` pair of the wire shape. Because the set is closed, an
/// unknown event type is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum EventKind {
    UserCreated(User),
    OrganizationCreated(Organization),
    OrganizationUserAdded(OrganizationUser),
    OrganizationUserRemoved(OrganizationUser),
    OrganizationUserUpdated(OrganizationUser),
}

impl EventKind {
    /// Returns the discriminant for this kind.
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::UserCreated(_) => EventType::UserCreated,
            EventKind::OrganizationCreated(_) => EventType::OrganizationCreated,
            EventKind::OrganizationUserAdded(_) => EventType::OrganizationUserAdded,
            EventKind::OrganizationUserRemoved(_) => EventType::OrganizationUserRemoved,
            EventKind::OrganizationUserUpdated(_) => EventType::OrganizationUserUpdated,
        }
    }
}

/// An event flowing through the pipeline.
///
/// Events are immutable once created. The only mutation across an event's
/// lifetime is retry-wrapping via [`Event::retried`], which produces a new
/// event with the same `event_id` and `retry` incremented by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, assigned at creation, stable across retries.
    #[serde(rename = "eventId")]
    pub event_id: Uuid,
    /// Kind and payload (`type` + `payload` on the wire).
    #[serde(flatten)]
    pub kind: EventKind,
    /// Number of failed processing attempts so far.
    pub retry: u32,
}

impl Event {
    /// Creates a fresh event with a new id and a retry count of zero.
    pub fn new(kind: EventKind) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            kind,
            retry: 0,
        }
    }

    /// Returns the replacement event for a failed processing attempt.
    ///
    /// The id and payload are preserved; only `retry` advances, by exactly one.
    pub fn retried(&self) -> Self {
        Self {
            event_id: self.event_id,
            kind: self.kind.clone(),
            retry: self.retry + 1,
        }
    }

    /// Returns the discriminant for this event's kind.
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_membership() -> OrganizationUser {
        OrganizationUser {
            organization_id: "org-1".to_string(),
            user_id: "user-1".to_string(),
            role: Role::Writer,
        }
    }

    #[test]
    fn test_event_new_starts_at_retry_zero() {
        let event = Event::new(EventKind::OrganizationCreated(Organization {
            id: "org-1".to_string(),
            name: "TechCorp".to_string(),
        }));

        assert_eq!(event.retry, 0);
        assert!(!event.event_id.is_nil());
        assert_eq!(event.event_type(), EventType::OrganizationCreated);
    }

    #[test]
    fn test_retried_preserves_id_and_payload() {
        let event = Event::new(EventKind::OrganizationUserAdded(sample_membership()));
        let retried = event.retried();

        assert_eq!(retried.event_id, event.event_id);
        assert_eq!(retried.kind, event.kind);
        assert_eq!(retried.retry, 1);

        let twice = retried.retried();
        assert_eq!(twice.event_id, event.event_id);
        assert_eq!(twice.retry, 2);
    }

    #[test]
    fn test_wire_shape() {
        let event = Event::new(EventKind::UserCreated(User {
            id: "user-1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }));

        let value = serde_json::to_value(&event).expect("event should serialize");

        assert_eq!(value["type"], "UserCreated");
        assert_eq!(value["payload"]["id"], "user-1");
        assert_eq!(value["payload"]["email"], "alice@example.com");
        assert_eq!(value["retry"], 0);
        assert_eq!(value["eventId"], event.event_id.to_string());
    }

    #[test]
    fn test_membership_payload_uses_camel_case() {
        let event = Event::new(EventKind::OrganizationUserUpdated(sample_membership()));
        let value = serde_json::to_value(&event).expect("event should serialize");

        assert_eq!(value["payload"]["organizationId"], "org-1");
        assert_eq!(value["payload"]["userId"], "user-1");
        assert_eq!(value["payload"]["role"], "writer");
    }

    #[test]
    fn test_event_roundtrip() {
        let event = Event::new(EventKind::OrganizationUserRemoved(sample_membership()));
        let json = serde_json::to_string(&event).expect("serialization should work");
        let parsed: Event = serde_json::from_str(&json).expect("deserialization should work");

        assert_eq!(parsed, event);
    }

    #[test]
    fn test_event_type_display_matches_wire_tag() {
        for event_type in EventType::ALL {
            let tag = serde_json::to_value(event_type).expect("type should serialize");
            assert_eq!(tag, event_type.as_str());
        }
    }
}
