use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ride_journal_sdk::{
    Comment, CommentPatch, Event, EventPatch, EventType, EventWithRelations, Image, ImageUpload,
    Like, NewComment, NewEvent, NewImage, NewLike, NewUser, NewVehicle, RideJournalError, User,
    UserPatch, UserProfile, UserWithVehicles, Vehicle, VehiclePatch, VehicleType,
    VehicleWithRelations,
};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Iso8601;
use time::{Date, OffsetDateTime};
use utoipa::{IntoParams, ToSchema};

fn invalid(field: &str, message: impl std::fmt::Display) -> RideJournalError {
    RideJournalError::validation(format!("{field}: {message}"))
}

pub(crate) fn parse_vehicle_type(raw: &str) -> Result<VehicleType, RideJournalError> {
    raw.parse().map_err(|e| invalid("vehicleType", e))
}

pub(crate) fn parse_event_type(raw: &str) -> Result<EventType, RideJournalError> {
    raw.parse().map_err(|e| invalid("eventType", e))
}

fn parse_date(raw: &str) -> Result<Date, RideJournalError> {
    Date::parse(raw.trim(), &Iso8601::DATE).map_err(|e| invalid("date", e))
}

fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

// ==================== Query ====================

/// Raw list query: `?limit=&offset=`. Unparseable values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListQuery {
    #[must_use]
    pub fn page(&self) -> ride_journal_sdk::PageRequest {
        ride_journal_sdk::PageRequest::from_query(self.limit.as_deref(), self.offset.as_deref())
    }
}

// ==================== Image upload ====================

/// Inline image payload, base64 encoded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadReq {
    #[schema(example = "image/png")]
    pub content_type: String,
    /// Standard base64 of the raw bytes.
    pub data: String,
}

impl TryFrom<ImageUploadReq> for ImageUpload {
    type Error = RideJournalError;

    fn try_from(req: ImageUploadReq) -> Result<Self, Self::Error> {
        let data = STANDARD
            .decode(req.data.trim())
            .map_err(|e| invalid("image.data", e))?;
        if data.is_empty() {
            return Err(invalid("image.data", "must not be empty"));
        }
        Ok(Self {
            content_type: req.content_type,
            data,
        })
    }
}

// ==================== User DTOs ====================

/// A user as seen by the user themself.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Public user projection. Never carries the email or the credential hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDto {
    pub id: i32,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithVehiclesDto {
    pub user: UserProfileDto,
    pub vehicles: Vec<VehicleDto>,
}

#[derive(Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserReq {
    pub username: String,
    pub email: String,
    #[schema(format = Password)]
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl std::fmt::Debug for CreateUserReq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserReq")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserReq {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(format = Password)]
    pub password: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl std::fmt::Debug for UpdateUserReq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserReq")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            bio: user.bio,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<UserProfile> for UserProfileDto {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            display_name: profile.display_name,
            bio: profile.bio,
            created_at: profile.created_at,
        }
    }
}

impl From<UserWithVehicles> for UserWithVehiclesDto {
    fn from(u: UserWithVehicles) -> Self {
        Self {
            user: u.profile.into(),
            vehicles: u.vehicles.into_iter().map(VehicleDto::from).collect(),
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
            display_name: req.display_name,
            bio: req.bio,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            email: req.email,
            password: req.password,
            display_name: req.display_name,
            bio: req.bio,
        }
    }
}

// ==================== Vehicle DTOs ====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    #[schema(example = "suv")]
    pub vehicle_type: String,
    /// Blob reference, or `"default"`.
    pub image: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleWithRelationsDto {
    pub vehicle: VehicleDto,
    pub owner: UserProfileDto,
    pub events: Vec<EventDto>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleReq {
    pub user_id: i32,
    pub name: String,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[schema(example = "car")]
    pub vehicle_type: String,
    #[serde(default)]
    pub image: Option<ImageUploadReq>,
}

/// Partial vehicle update.
///
/// A field that is absent or `null` is left unchanged; optional columns
/// cannot be cleared through this request.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub image: Option<ImageUploadReq>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            name: v.name,
            make: v.make,
            model: v.model,
            year: v.year,
            vehicle_type: v.vehicle_type.to_string(),
            image: v.image,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

impl From<VehicleWithRelations> for VehicleWithRelationsDto {
    fn from(v: VehicleWithRelations) -> Self {
        Self {
            vehicle: v.vehicle.into(),
            owner: v.owner.into(),
            events: v.events.into_iter().map(EventDto::from).collect(),
        }
    }
}

impl TryFrom<CreateVehicleReq> for NewVehicle {
    type Error = RideJournalError;

    fn try_from(req: CreateVehicleReq) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: req.user_id,
            name: req.name,
            make: req.make,
            model: req.model,
            year: req.year,
            vehicle_type: parse_vehicle_type(&req.vehicle_type)?,
            image: req.image.map(ImageUpload::try_from).transpose()?,
        })
    }
}

impl TryFrom<UpdateVehicleReq> for VehiclePatch {
    type Error = RideJournalError;

    fn try_from(req: UpdateVehicleReq) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name,
            make: req.make,
            model: req.model,
            year: req.year,
            vehicle_type: req
                .vehicle_type
                .as_deref()
                .map(parse_vehicle_type)
                .transpose()?,
            image: req.image.map(ImageUpload::try_from).transpose()?,
        })
    }
}

// ==================== Event DTOs ====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    pub id: i32,
    pub vehicle_id: i32,
    pub user_id: i32,
    pub title: String,
    pub detail: Option<String>,
    #[schema(example = "repair")]
    pub event_type: String,
    #[schema(format = Date, example = "2024-05-17")]
    pub date: String,
    pub odometer: Option<i32>,
    pub published: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Event include view. Nested users are public profiles only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventWithRelationsDto {
    pub event: EventDto,
    pub vehicle: VehicleDto,
    pub author: UserProfileDto,
    pub comments: Vec<CommentDto>,
    pub images: Vec<ImageDto>,
    pub likes: Vec<LikeDto>,
    pub like_count: usize,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventReq {
    pub vehicle_id: i32,
    pub user_id: i32,
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
    pub event_type: String,
    #[schema(format = Date)]
    pub date: String,
    #[serde(default)]
    pub odometer: Option<i32>,
    #[serde(default)]
    pub published: bool,
}

/// Partial event update. Absent and `null` fields both mean "keep".
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventReq {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    #[schema(format = Date)]
    pub date: Option<String>,
    #[serde(default)]
    pub odometer: Option<i32>,
    #[serde(default)]
    pub published: Option<bool>,
}

impl From<Event> for EventDto {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            vehicle_id: e.vehicle_id,
            user_id: e.user_id,
            title: e.title,
            detail: e.detail,
            event_type: e.event_type.to_string(),
            date: format_date(e.date),
            odometer: e.odometer,
            published: e.published,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<EventWithRelations> for EventWithRelationsDto {
    fn from(e: EventWithRelations) -> Self {
        Self {
            event: e.event.into(),
            vehicle: e.vehicle.into(),
            author: e.author.into(),
            comments: e.comments.into_iter().map(CommentDto::from).collect(),
            images: e.images.into_iter().map(ImageDto::from).collect(),
            likes: e.likes.into_iter().map(LikeDto::from).collect(),
            like_count: e.like_count,
        }
    }
}

impl TryFrom<CreateEventReq> for NewEvent {
    type Error = RideJournalError;

    fn try_from(req: CreateEventReq) -> Result<Self, Self::Error> {
        Ok(Self {
            vehicle_id: req.vehicle_id,
            user_id: req.user_id,
            title: req.title,
            detail: req.detail,
            event_type: parse_event_type(&req.event_type)?,
            date: parse_date(&req.date)?,
            odometer: req.odometer,
            published: req.published,
        })
    }
}

impl TryFrom<UpdateEventReq> for EventPatch {
    type Error = RideJournalError;

    fn try_from(req: UpdateEventReq) -> Result<Self, Self::Error> {
        Ok(Self {
            title: req.title,
            detail: req.detail,
            event_type: req.event_type.as_deref().map(parse_event_type).transpose()?,
            date: req.date.as_deref().map(parse_date).transpose()?,
            odometer: req.odometer,
            published: req.published,
        })
    }
}

// ==================== Comment DTOs ====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i32,
    pub event_id: i32,
    pub user_id: i32,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentReq {
    pub event_id: i32,
    pub user_id: i32,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentReq {
    #[serde(default)]
    pub content: Option<String>,
}

impl From<Comment> for CommentDto {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            event_id: c.event_id,
            user_id: c.user_id,
            content: c.content,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<CreateCommentReq> for NewComment {
    fn from(req: CreateCommentReq) -> Self {
        Self {
            event_id: req.event_id,
            user_id: req.user_id,
            content: req.content,
        }
    }
}

impl From<UpdateCommentReq> for CommentPatch {
    fn from(req: UpdateCommentReq) -> Self {
        Self {
            content: req.content,
        }
    }
}

// ==================== Image DTOs ====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: i32,
    pub event_id: i32,
    pub reference: String,
    pub content_type: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageReq {
    pub event_id: i32,
    pub image: ImageUploadReq,
}

impl From<Image> for ImageDto {
    fn from(i: Image) -> Self {
        Self {
            id: i.id,
            event_id: i.event_id,
            reference: i.reference,
            content_type: i.content_type,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

impl TryFrom<CreateImageReq> for NewImage {
    type Error = RideJournalError;

    fn try_from(req: CreateImageReq) -> Result<Self, Self::Error> {
        Ok(Self {
            event_id: req.event_id,
            upload: req.image.try_into()?,
        })
    }
}

// ==================== Like DTOs ====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeDto {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLikeReq {
    pub user_id: i32,
    pub event_id: i32,
}

impl From<Like> for LikeDto {
    fn from(l: Like) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            event_id: l.event_id,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

impl From<CreateLikeReq> for NewLike {
    fn from(req: CreateLikeReq) -> Self {
        Self {
            user_id: req.user_id,
            event_id: req.event_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn dates_use_calendar_format() {
        let date = Date::from_calendar_date(2024, Month::March, 5).unwrap();
        assert_eq!(format_date(date), "2024-03-05");
        assert_eq!(parse_date("2024-03-05").unwrap(), date);
        assert!(parse_date("05/03/2024").is_err());
    }

    #[test]
    fn unknown_vehicle_type_is_a_validation_error() {
        let req = CreateVehicleReq {
            user_id: 1,
            name: "Bike".to_owned(),
            make: None,
            model: None,
            year: None,
            vehicle_type: "hovercraft".to_owned(),
            image: None,
        };
        let err = NewVehicle::try_from(req).unwrap_err();
        assert!(matches!(
            err,
            RideJournalError::Validation { ref message } if message.starts_with("vehicleType")
        ));
    }

    #[test]
    fn image_payload_is_base64_decoded() {
        let upload = ImageUpload::try_from(ImageUploadReq {
            content_type: "image/png".to_owned(),
            data: STANDARD.encode([1u8, 2, 3]),
        })
        .unwrap();
        assert_eq!(upload.data, vec![1, 2, 3]);

        let bad = ImageUpload::try_from(ImageUploadReq {
            content_type: "image/png".to_owned(),
            data: "***".to_owned(),
        });
        assert!(bad.is_err());
    }

    #[test]
    fn profile_json_has_no_email() {
        let dto = UserProfileDto {
            id: 1,
            username: "rider".to_owned(),
            display_name: None,
            bio: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["username"], "rider");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
    }
}
