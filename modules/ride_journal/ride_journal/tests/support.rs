#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for `ride_journal` integration tests.
//!
//! Provides an in-memory database with migrations applied, an in-memory blob
//! store, bearer token minting and seeding helpers.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use std::sync::Arc;

use jsonwebtoken::{encode, get_current_timestamp, Algorithm, EncodingKey, Header};
use ride_journal::api::rest::ApiState;
use ride_journal::config::AuthConfig;
use ride_journal::domain::service::ServiceConfig;
use ride_journal::infra::auth::{Claims, JwtIdentityResolver};
use ride_journal::infra::blob::InMemoryBlobStore;
use ride_journal::{ConcreteAppServices, RideJournal};
use ride_journal_sdk::{
    Event, EventType, ImageUpload, NewEvent, NewUser, NewVehicle, RideJournalClientV1,
    SecurityContext, User, Vehicle, VehicleType,
};
use sea_orm::{Database, DatabaseConnection};
use secrecy::SecretString;
use time::{Date, Month};

pub const JWT_SECRET: &str = "test-secret-test-secret-test-secret!";
pub const PASSWORD: &str = "correct horse battery";

/// Create a fresh in-memory `SQLite` database with migrations applied.
///
/// # Panics
/// Panics if the database connection or migrations fail.
pub async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    ride_journal::module::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}

#[must_use]
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: SecretString::from(JWT_SECRET.to_owned()),
        issuer: None,
        leeway_secs: 0,
    }
}

/// A signed bearer credential for `user_id`, valid for ten minutes.
#[must_use]
pub fn bearer_for(user_id: i32) -> String {
    let now = get_current_timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + 600,
        iss: None,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("Failed to sign token");
    format!("Bearer {token}")
}

#[must_use]
pub fn ctx(user: &User) -> SecurityContext {
    SecurityContext::for_subject(user.id)
}

#[must_use]
pub fn png(bytes: &[u8]) -> ImageUpload {
    ImageUpload {
        content_type: "image/png".to_owned(),
        data: bytes.to_vec(),
    }
}

#[must_use]
pub fn day(d: u8) -> Date {
    Date::from_calendar_date(2024, Month::May, d).expect("valid date")
}

/// Everything a test needs, wired over one in-memory database.
pub struct TestContext {
    pub db: DatabaseConnection,
    pub blobs: Arc<InMemoryBlobStore>,
    pub module: RideJournal,
    pub services: Arc<ConcreteAppServices>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_config(ServiceConfig::default()).await
    }

    pub async fn with_config(config: ServiceConfig) -> Self {
        let db = inmem_db().await;
        let blobs = Arc::new(InMemoryBlobStore::new());
        let identity =
            Arc::new(JwtIdentityResolver::new(&auth_config()).expect("valid auth config"));
        let module = RideJournal::from_parts(db.clone(), blobs.clone(), identity, config);
        let services = module.services();
        Self {
            db,
            blobs,
            module,
            services,
        }
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn RideJournalClientV1> {
        self.module.client()
    }

    #[must_use]
    pub fn api(&self) -> ApiState {
        self.module.api_state()
    }

    /// Register a user named `username` with [`PASSWORD`].
    pub async fn user(&self, username: &str) -> User {
        self.services
            .users
            .register(NewUser {
                username: username.to_owned(),
                email: format!("{username}@example.com"),
                password: PASSWORD.to_owned(),
                display_name: Some(username.to_uppercase()),
                bio: None,
            })
            .await
            .expect("Failed to register user")
    }

    pub async fn vehicle(&self, owner: &User, name: &str, vehicle_type: VehicleType) -> Vehicle {
        self.services
            .vehicles
            .create(
                &ctx(owner),
                NewVehicle {
                    user_id: owner.id,
                    name: name.to_owned(),
                    make: Some("Honda".to_owned()),
                    model: None,
                    year: Some(2019),
                    vehicle_type,
                    image: None,
                },
            )
            .await
            .expect("Failed to create vehicle")
    }

    pub async fn event(&self, author: &User, vehicle: &Vehicle, title: &str) -> Event {
        self.services
            .events
            .create(&ctx(author), new_event(author, vehicle, title))
            .await
            .expect("Failed to create event")
    }
}

#[must_use]
pub fn new_event(author: &User, vehicle: &Vehicle, title: &str) -> NewEvent {
    NewEvent {
        vehicle_id: vehicle.id,
        user_id: author.id,
        title: title.to_owned(),
        detail: None,
        event_type: EventType::Repair,
        date: day(17),
        odometer: Some(42_000),
        published: true,
    }
}
