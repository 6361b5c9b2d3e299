//! Public models for the `ride_journal` module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the `ride_journal` module and its consumers.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use time::{Date, OffsetDateTime};

/// Image reference stored on a vehicle that was created without an upload.
pub const DEFAULT_IMAGE_REF: &str = "default";

/// A string did not name a member of a closed enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Vehicle classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VehicleType {
    Car,
    Suv,
    Truck,
    Van,
    Motorcycle,
    Other,
}

impl VehicleType {
    pub const ALL: [Self; 6] = [
        Self::Car,
        Self::Suv,
        Self::Truck,
        Self::Van,
        Self::Motorcycle,
        Self::Other,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Suv => "suv",
            Self::Truck => "truck",
            Self::Van => "van",
            Self::Motorcycle => "motorcycle",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "vehicle type",
                value: s.to_owned(),
            })
    }
}

/// Journal event classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Repair,
    Modification,
    Story,
    Maintenance,
}

impl EventType {
    pub const ALL: [Self; 4] = [
        Self::Repair,
        Self::Modification,
        Self::Story,
        Self::Maintenance,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Repair => "repair",
            Self::Modification => "modification",
            Self::Story => "story",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ParseEnumError {
                kind: "event type",
                value: s.to_owned(),
            })
    }
}

/// A user account as seen by the user themself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Public projection of a user, safe to nest inside other resources.
///
/// Carries neither the email address nor the credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i32,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<&User> for UserProfile {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            display_name: u.display_name.clone(),
            bio: u.bio.clone(),
            created_at: u.created_at,
        }
    }
}

/// Data for registering a new user.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("bio", &self.bio)
            .finish()
    }
}

/// Partial update data for a user.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("display_name", &self.display_name)
            .field("bio", &self.bio)
            .finish()
    }
}

/// A user together with the vehicles they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithVehicles {
    pub profile: UserProfile,
    pub vehicles: Vec<Vehicle>,
}

/// Inline image payload handed to the blob store.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub content_type: String,
    pub data: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish_non_exhaustive()
    }
}

/// A vehicle entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: VehicleType,
    /// Blob store reference, or [`DEFAULT_IMAGE_REF`].
    pub image: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    pub user_id: i32,
    pub name: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: VehicleType,
    pub image: Option<ImageUpload>,
}

/// Partial update data for a vehicle.
///
/// `None` keeps the stored value, so `make`, `model` and `year` can be
/// replaced but never cleared once set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VehiclePatch {
    pub name: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vehicle_type: Option<VehicleType>,
    pub image: Option<ImageUpload>,
}

/// A vehicle with its owner and its events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleWithRelations {
    pub vehicle: Vehicle,
    pub owner: UserProfile,
    pub events: Vec<Event>,
}

/// A journal event posted against a vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: i32,
    pub vehicle_id: i32,
    /// Owner of the event. Independent from the vehicle's owner.
    pub user_id: i32,
    pub title: String,
    pub detail: Option<String>,
    pub event_type: EventType,
    pub date: Date,
    pub odometer: Option<i32>,
    pub published: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub vehicle_id: i32,
    pub user_id: i32,
    pub title: String,
    pub detail: Option<String>,
    pub event_type: EventType,
    pub date: Date,
    pub odometer: Option<i32>,
    pub published: bool,
}

/// Partial update data for an event. `None` keeps the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub event_type: Option<EventType>,
    pub date: Option<Date>,
    pub odometer: Option<i32>,
    pub published: Option<bool>,
}

/// An event with its vehicle, author and attached content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWithRelations {
    pub event: Event,
    pub vehicle: Vehicle,
    pub author: UserProfile,
    pub comments: Vec<Comment>,
    pub images: Vec<Image>,
    pub likes: Vec<Like>,
    pub like_count: usize,
}

/// A comment on an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i32,
    pub event_id: i32,
    pub user_id: i32,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub event_id: i32,
    pub user_id: i32,
    pub content: String,
}

/// Partial update data for a comment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentPatch {
    pub content: Option<String>,
}

/// An image attached to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub id: i32,
    pub event_id: i32,
    /// Blob store reference.
    pub reference: String,
    pub content_type: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Data for attaching a new image to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub event_id: i32,
    pub upload: ImageUpload,
}

/// A user's like on an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Data for liking an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewLike {
    pub user_id: i32,
    pub event_id: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn enum_names_parse_back() {
        for t in VehicleType::ALL {
            assert_eq!(t.as_str().parse::<VehicleType>(), Ok(t));
        }
        for t in EventType::ALL {
            assert_eq!(t.to_string().parse::<EventType>(), Ok(t));
        }
    }

    #[test]
    fn unknown_enum_names_are_rejected() {
        let err = "hovercraft".parse::<VehicleType>().unwrap_err();
        assert_eq!(err.kind, "vehicle type");
        assert_eq!(err.value, "hovercraft");
        assert!("Repair".parse::<EventType>().is_err());
    }

    #[test]
    fn debug_never_prints_passwords() {
        let new_user = NewUser {
            username: "rider".to_owned(),
            email: "rider@example.com".to_owned(),
            password: "hunter22".to_owned(),
            display_name: None,
            bio: None,
        };
        assert!(!format!("{new_user:?}").contains("hunter22"));

        let patch = UserPatch {
            password: Some("hunter22".to_owned()),
            ..UserPatch::default()
        };
        assert!(!format!("{patch:?}").contains("hunter22"));
    }
}
