//! OpenAPI document for the DTOs and envelopes.
//!
//! Only the `components` section is produced: routing is left to the
//! server adapter that mounts the handlers.

use std::collections::BTreeMap;

use utoipa::openapi::info::InfoBuilder;
use utoipa::openapi::schema::{ComponentsBuilder, Schema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::{OpenApi, OpenApiBuilder, RefOr};
use utoipa::{PartialSchema, ToSchema};

use super::dto::{
    CommentDto, CreateCommentReq, CreateEventReq, CreateImageReq, CreateLikeReq, CreateUserReq,
    CreateVehicleReq, EventDto, EventWithRelationsDto, ImageDto, ImageUploadReq, LikeDto,
    UpdateCommentReq, UpdateEventReq, UpdateUserReq, UpdateVehicleReq, UserDto, UserProfileDto,
    UserWithVehiclesDto, VehicleDto, VehicleWithRelationsDto,
};
use super::envelope::{Deleted, ErrorEnvelope};

type SchemaCollection = Vec<(String, RefOr<Schema>)>;

/// Bearer scheme name referenced by mutating operations.
pub const BEARER_AUTH: &str = "bearerAuth";

#[derive(Default)]
struct Components {
    schemas: BTreeMap<String, RefOr<Schema>>,
}

impl Components {
    /// Register `T` and everything it references.
    fn ensure<T: ToSchema + PartialSchema>(&mut self) -> &mut Self {
        let mut collected: SchemaCollection = vec![(T::name().to_string(), T::schema())];
        T::schemas(&mut collected);
        for (name, schema) in collected {
            self.schemas.entry(name).or_insert(schema);
        }
        self
    }
}

/// All component schemas keyed by name.
#[must_use]
pub fn component_schemas() -> BTreeMap<String, RefOr<Schema>> {
    let mut c = Components::default();
    c.ensure::<UserDto>()
        .ensure::<UserProfileDto>()
        .ensure::<UserWithVehiclesDto>()
        .ensure::<CreateUserReq>()
        .ensure::<UpdateUserReq>()
        .ensure::<VehicleDto>()
        .ensure::<VehicleWithRelationsDto>()
        .ensure::<CreateVehicleReq>()
        .ensure::<UpdateVehicleReq>()
        .ensure::<ImageUploadReq>()
        .ensure::<EventDto>()
        .ensure::<EventWithRelationsDto>()
        .ensure::<CreateEventReq>()
        .ensure::<UpdateEventReq>()
        .ensure::<CommentDto>()
        .ensure::<CreateCommentReq>()
        .ensure::<UpdateCommentReq>()
        .ensure::<ImageDto>()
        .ensure::<CreateImageReq>()
        .ensure::<LikeDto>()
        .ensure::<CreateLikeReq>()
        .ensure::<ErrorEnvelope>()
        .ensure::<Deleted>();
    c.schemas
}

/// Build the document with components and the bearer security scheme.
#[must_use]
pub fn build_openapi() -> OpenApi {
    let schemas = component_schemas();
    tracing::debug!("Building OpenAPI components: {} schemas", schemas.len());

    let mut components = ComponentsBuilder::new();
    for (name, schema) in schemas {
        components = components.schema(name, schema);
    }
    components = components.security_scheme(
        BEARER_AUTH,
        SecurityScheme::Http(
            HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .build(),
        ),
    );

    let info = InfoBuilder::new()
        .title("Ride Journal API")
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some(
            "Vehicles, journal events and their comments, images and likes",
        ))
        .build();

    OpenApiBuilder::new()
        .info(info)
        .components(Some(components.build()))
        .build()
}
