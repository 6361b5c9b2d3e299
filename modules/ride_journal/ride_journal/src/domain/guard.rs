//! Ownership guard.
//!
//! Every mutating operation on an owned resource goes through here. The
//! decision itself is a pure comparison of the recorded owner with the
//! authenticated caller; nothing else (roles, admin flags, vehicle
//! ownership of an event) grants write access.

use ride_journal_sdk::{Comment, Event, Like, SecurityContext, User, Vehicle};

use crate::domain::error::DomainError;

/// Outcome of an ownership decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Allow iff `owner_id == caller_id`.
#[must_use]
pub fn authorize(owner_id: i32, caller_id: i32) -> Access {
    if owner_id == caller_id {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// A stored resource that records its owner.
pub trait Owned {
    const ENTITY: &'static str;

    fn resource_id(&self) -> i32;

    fn owner_id(&self) -> i32;
}

impl Owned for User {
    const ENTITY: &'static str = "user";

    fn resource_id(&self) -> i32 {
        self.id
    }

    // A user account is owned by itself.
    fn owner_id(&self) -> i32 {
        self.id
    }
}

impl Owned for Vehicle {
    const ENTITY: &'static str = "vehicle";

    fn resource_id(&self) -> i32 {
        self.id
    }

    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

impl Owned for Event {
    const ENTITY: &'static str = "event";

    fn resource_id(&self) -> i32 {
        self.id
    }

    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

impl Owned for Comment {
    const ENTITY: &'static str = "comment";

    fn resource_id(&self) -> i32 {
        self.id
    }

    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

impl Owned for Like {
    const ENTITY: &'static str = "like";

    fn resource_id(&self) -> i32 {
        self.id
    }

    fn owner_id(&self) -> i32 {
        self.user_id
    }
}

/// Fail with `AuthorizationDenied` unless the caller owns `resource`.
pub fn ensure_owner<T: Owned>(resource: &T, ctx: &SecurityContext) -> Result<(), DomainError> {
    match authorize(resource.owner_id(), ctx.subject_id()) {
        Access::Allow => Ok(()),
        Access::Deny => {
            tracing::warn!(
                entity = T::ENTITY,
                id = resource.resource_id(),
                caller = ctx.subject_id(),
                "ownership check denied"
            );
            Err(DomainError::authorization_denied(
                T::ENTITY,
                resource.resource_id(),
            ))
        }
    }
}

/// Creation payloads name their owner; only that owner may submit them.
pub fn ensure_claimed_owner(
    entity: &'static str,
    claimed_owner: i32,
    ctx: &SecurityContext,
) -> Result<(), DomainError> {
    match authorize(claimed_owner, ctx.subject_id()) {
        Access::Allow => Ok(()),
        Access::Deny => {
            tracing::warn!(
                entity,
                claimed_owner,
                caller = ctx.subject_id(),
                "create on behalf of another user denied"
            );
            // No row exists yet, so the claimed owner stands in for the id.
            Err(DomainError::authorization_denied(entity, claimed_owner))
        }
    }
}

/// Resolve a conditional write that touched zero rows.
///
/// `current` is the row as re-read after the write: absent means the id
/// never existed (or was removed concurrently), present means the owner
/// filter rejected the caller.
pub fn resolve_missed_write<T>(entity: &'static str, id: i32, current: Option<T>) -> DomainError {
    if current.is_some() {
        tracing::warn!(entity, id, "conditional write rejected by owner filter");
        DomainError::authorization_denied(entity, id)
    } else {
        DomainError::not_found(entity, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use tracing_test::traced_test;

    fn comment(owner: i32) -> Comment {
        Comment {
            id: 7,
            event_id: 1,
            user_id: owner,
            content: "nice".to_owned(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn authorize_is_equality() {
        assert_eq!(authorize(1, 1), Access::Allow);
        assert_eq!(authorize(1, 2), Access::Deny);
        assert_eq!(authorize(0, 0), Access::Allow);
    }

    #[test]
    fn ensure_owner_rejects_strangers() {
        let c = comment(3);
        assert!(ensure_owner(&c, &SecurityContext::for_subject(3)).is_ok());
        assert_eq!(
            ensure_owner(&c, &SecurityContext::for_subject(4)),
            Err(DomainError::authorization_denied("comment", 7))
        );
    }

    #[test]
    fn claimed_owner_must_be_caller() {
        let ctx = SecurityContext::for_subject(2);
        assert!(ensure_claimed_owner("vehicle", 2, &ctx).is_ok());
        assert!(matches!(
            ensure_claimed_owner("vehicle", 1, &ctx),
            Err(DomainError::AuthorizationDenied { .. })
        ));
    }

    #[test]
    fn missed_write_resolution() {
        assert_eq!(
            resolve_missed_write::<()>("event", 5, None),
            DomainError::not_found("event", 5)
        );
        assert_eq!(
            resolve_missed_write("event", 5, Some(())),
            DomainError::authorization_denied("event", 5)
        );
    }

    #[test]
    #[traced_test]
    fn denials_are_logged() {
        let _ = ensure_owner(&comment(3), &SecurityContext::for_subject(9));
        assert!(logs_contain("ownership check denied"));
        assert!(logs_contain("caller=9"));
    }
}
