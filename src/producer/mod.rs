//! Synthetic event generation.
//!
//! [`EventProducer`] emits one event of a uniformly random kind per call,
//! drawing users and organizations from small fixture pools and tracking
//! the organization-user relationships it has created so far. The two
//! relationship-dependent kinds (`OrganizationUserRemoved`,
//! `OrganizationUserUpdated`) fail with [`ProducerError::NoRelationships`]
//! while the tracked set is empty; the driver treats that as a skipped
//! tick, not a crash.
//!
//! The producer sits behind the [`EventSource`] trait so the driver can be
//! fed from a test double.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::error::ProducerError;
use crate::events::{
    Event, EventKind, EventType, Organization, OrganizationUser, Role, User,
};

/// Produces one event per call for admission into the queue.
pub trait EventSource: Send {
    /// Returns the next event, with `retry = 0` and a fresh id.
    ///
    /// # Errors
    ///
    /// Returns [`ProducerError`] when no valid event of the chosen kind can
    /// be generated right now. The caller must treat this as "skip this
    /// tick", never as a fatal condition.
    fn next_event(&mut self) -> Result<Event, ProducerError>;
}

/// Synthetic generator over fixed user/organization pools.
///
/// Uses a seedable ChaCha8 RNG: the same seed produces the same event
/// sequence, which keeps generation reproducible under test.
pub struct EventProducer {
    users: Vec<User>,
    organizations: Vec<Organization>,
    memberships: Vec<OrganizationUser>,
    rng: ChaCha8Rng,
}

impl EventProducer {
    /// Creates a producer with the default fixture pools and a randomly
    /// seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Creates a producer with the default fixture pools and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            users: default_users(),
            organizations: default_organizations(),
            memberships: Vec::new(),
            rng,
        }
    }

    /// Replaces the user pool.
    pub fn with_users(mut self, users: Vec<User>) -> Self {
        self.users = users;
        self
    }

    /// Replaces the organization pool.
    pub fn with_organizations(mut self, organizations: Vec<Organization>) -> Self {
        self.organizations = organizations;
        self
    }

    /// Returns the number of currently tracked relationships.
    pub fn membership_count(&self) -> usize {
        self.memberships.len()
    }

    fn random_role(&mut self) -> Role {
        Role::ALL[self.rng.random_range(0..Role::ALL.len())]
    }

    fn random_user(&mut self) -> Result<User, ProducerError> {
        if self.users.is_empty() {
            return Err(ProducerError::EmptyPool("user"));
        }
        Ok(self.users[self.rng.random_range(0..self.users.len())].clone())
    }

    fn random_organization(&mut self) -> Result<Organization, ProducerError> {
        if self.organizations.is_empty() {
            return Err(ProducerError::EmptyPool("organization"));
        }
        Ok(self.organizations[self.rng.random_range(0..self.organizations.len())].clone())
    }

    fn user_created(&mut self) -> Result<Event, ProducerError> {
        let user = self.random_user()?;
        Ok(Event::new(EventKind::UserCreated(user)))
    }

    fn organization_created(&mut self) -> Result<Event, ProducerError> {
        let organization = self.random_organization()?;
        Ok(Event::new(EventKind::OrganizationCreated(organization)))
    }

    fn membership_added(&mut self) -> Result<Event, ProducerError> {
        let user = self.random_user()?;
        let organization = self.random_organization()?;
        let membership = OrganizationUser {
            organization_id: organization.id,
            user_id: user.id,
            role: self.random_role(),
        };

        self.memberships.push(membership.clone());
        Ok(Event::new(EventKind::OrganizationUserAdded(membership)))
    }

    fn membership_removed(&mut self) -> Result<Event, ProducerError> {
        if self.memberships.is_empty() {
            return Err(ProducerError::NoRelationships {
                operation: EventType::OrganizationUserRemoved,
            });
        }

        let index = self.rng.random_range(0..self.memberships.len());
        let removed = self.memberships.remove(index);
        Ok(Event::new(EventKind::OrganizationUserRemoved(removed)))
    }

    fn membership_updated(&mut self) -> Result<Event, ProducerError> {
        if self.memberships.is_empty() {
            return Err(ProducerError::NoRelationships {
                operation: EventType::OrganizationUserUpdated,
            });
        }

        let index = self.rng.random_range(0..self.memberships.len());
        let role = self.random_role();
        let membership = &mut self.memberships[index];
        membership.role = role;
        let updated = membership.clone();
        Ok(Event::new(EventKind::OrganizationUserUpdated(updated)))
    }
}

impl Default for EventProducer {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for EventProducer {
    fn next_event(&mut self) -> Result<Event, ProducerError> {
        let event_type = EventType::ALL[self.rng.random_range(0..EventType::ALL.len())];

        match event_type {
            EventType::UserCreated => self.user_created(),
            EventType::OrganizationCreated => self.organization_created(),
            EventType::OrganizationUserAdded => self.membership_added(),
            EventType::OrganizationUserRemoved => self.membership_removed(),
            EventType::OrganizationUserUpdated => self.membership_updated(),
        }
    }
}

fn default_users() -> Vec<User> {
    vec![
        User {
            id: "user-1".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: "user-2".to_string(),
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
        },
        User {
            id: "user-3".to_string(),
            name: "Charlie".to_string(),
            email: "charlie@example.com".to_string(),
        },
    ]
}

fn default_organizations() -> Vec<Organization> {
    vec![
        Organization {
            id: "org-1".to_string(),
            name: "TechCorp".to_string(),
        },
        Organization {
            id: "org-2".to_string(),
            name: "EduCorp".to_string(),
        },
        Organization {
            id: "org-3".to_string(),
            name: "HealthInc".to_string(),
        },
    ]
}
