//! Conversions between `SeaORM` rows and SDK contract types.
//!
//! Enum columns are stored as their lower-case names; a row carrying any
//! other value is reported as a database error instead of being coerced.

use ride_journal_sdk::{Comment, Event, Image, Like, User, UserProfile, Vehicle};

use crate::domain::error::DomainError;
use crate::infra::storage::db::db_msg;
use crate::infra::storage::entity::{comment, event, image, like, user, vehicle};

impl From<user::Model> for User {
    fn from(e: user::Model) -> Self {
        Self {
            id: e.id,
            username: e.username,
            email: e.email,
            display_name: e.display_name,
            bio: e.bio,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<user::Model> for UserProfile {
    fn from(e: user::Model) -> Self {
        Self {
            id: e.id,
            username: e.username,
            display_name: e.display_name,
            bio: e.bio,
            created_at: e.created_at,
        }
    }
}

impl TryFrom<vehicle::Model> for Vehicle {
    type Error = DomainError;

    fn try_from(e: vehicle::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: e.id,
            user_id: e.user_id,
            name: e.name,
            make: e.make,
            model: e.model_name,
            year: e.year,
            vehicle_type: e.vehicle_type.parse().map_err(db_msg)?,
            image: e.image,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
    }
}

impl TryFrom<event::Model> for Event {
    type Error = DomainError;

    fn try_from(e: event::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: e.id,
            vehicle_id: e.vehicle_id,
            user_id: e.user_id,
            title: e.title,
            detail: e.detail,
            event_type: e.event_type.parse().map_err(db_msg)?,
            date: e.date,
            odometer: e.odometer,
            published: e.published,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
    }
}

impl From<comment::Model> for Comment {
    fn from(e: comment::Model) -> Self {
        Self {
            id: e.id,
            event_id: e.event_id,
            user_id: e.user_id,
            content: e.content,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<image::Model> for Image {
    fn from(e: image::Model) -> Self {
        Self {
            id: e.id,
            event_id: e.event_id,
            reference: e.reference,
            content_type: e.content_type,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<like::Model> for Like {
    fn from(e: like::Model) -> Self {
        Self {
            id: e.id,
            user_id: e.user_id,
            event_id: e.event_id,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Convert a batch of rows whose conversion can fail.
pub fn try_collect<M, T>(rows: Vec<M>) -> Result<Vec<T>, DomainError>
where
    T: TryFrom<M, Error = DomainError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ride_journal_sdk::VehicleType;
    use time::OffsetDateTime;

    fn row(vehicle_type: &str) -> vehicle::Model {
        vehicle::Model {
            id: 1,
            user_id: 2,
            name: "Blue".to_owned(),
            make: Some("Toyota".to_owned()),
            model_name: Some("4Runner".to_owned()),
            year: Some(1998),
            vehicle_type: vehicle_type.to_owned(),
            image: "default".to_owned(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn vehicle_row_maps_type() {
        let v = Vehicle::try_from(row("suv")).unwrap();
        assert_eq!(v.vehicle_type, VehicleType::Suv);
        assert_eq!(v.model.as_deref(), Some("4Runner"));
    }

    #[test]
    fn unknown_stored_type_is_a_database_error() {
        let err = Vehicle::try_from(row("spaceship")).unwrap_err();
        assert!(matches!(err, DomainError::Database { .. }));
    }
}
