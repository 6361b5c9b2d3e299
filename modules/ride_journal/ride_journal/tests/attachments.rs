#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Comments, images and likes attached to events, plus vehicle images.

mod support;

use ride_journal::domain::error::DomainError;
use sea_orm::ConnectionTrait;
use ride_journal_sdk::{
    LikeFilter, NewComment, NewImage, NewLike, NewVehicle, PageRequest, VehiclePatch,
    VehicleType, DEFAULT_IMAGE_REF,
};
use support::{ctx, png, TestContext};

#[tokio::test]
async fn liking_twice_returns_the_same_like() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    let event = t.event(&alice, &vehicle, "Detailing").await;

    let like = NewLike {
        user_id: bob.id,
        event_id: event.id,
    };
    let first = t.services.likes.create(&ctx(&bob), like).await.unwrap();
    let second = t.services.likes.create(&ctx(&bob), like).await.unwrap();
    assert_eq!(first, second);

    let stored = t
        .services
        .likes
        .list(LikeFilter::ByEvent(event.id), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(stored.len(), 1);

    let by_bob = t
        .services
        .likes
        .list(LikeFilter::ByUser(bob.id), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(by_bob, stored);
}

#[tokio::test]
async fn likes_belong_to_their_user() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    let event = t.event(&alice, &vehicle, "Detailing").await;

    // nobody can like in someone else's name
    let err = t
        .services
        .likes
        .create(
            &ctx(&alice),
            NewLike {
                user_id: bob.id,
                event_id: event.id,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorizationDenied { .. }));

    let like = t
        .services
        .likes
        .create(
            &ctx(&bob),
            NewLike {
                user_id: bob.id,
                event_id: event.id,
            },
        )
        .await
        .unwrap();

    let err = t.services.likes.delete(&ctx(&alice), like.id).await.unwrap_err();
    assert_eq!(err, DomainError::authorization_denied("like", like.id));
    assert_eq!(t.services.likes.delete(&ctx(&bob), like.id).await.unwrap(), 1);

    let err = t.services.likes.delete(&ctx(&bob), like.id).await.unwrap_err();
    assert_eq!(err, DomainError::not_found("like", like.id));
}

#[tokio::test]
async fn liking_a_missing_event_is_rejected() {
    let t = TestContext::new().await;
    let bob = t.user("bob").await;

    let err = t
        .services
        .likes
        .create(
            &ctx(&bob),
            NewLike {
                user_id: bob.id,
                event_id: 77,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ReferentialIntegrity { .. }));
}

#[tokio::test]
async fn vehicle_without_upload_gets_default_image() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;

    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    assert_eq!(vehicle.image, DEFAULT_IMAGE_REF);
    assert!(t.blobs.is_empty());
}

#[tokio::test]
async fn replacing_vehicle_image_discards_the_old_blob() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;

    let vehicle = t
        .services
        .vehicles
        .create(
            &ctx(&alice),
            NewVehicle {
                user_id: alice.id,
                name: "Ranger".to_owned(),
                make: Some("Ford".to_owned()),
                model: Some("Ranger".to_owned()),
                year: Some(2021),
                vehicle_type: VehicleType::Truck,
                image: Some(png(b"first")),
            },
        )
        .await
        .unwrap();
    assert_ne!(vehicle.image, DEFAULT_IMAGE_REF);
    assert!(vehicle.image.ends_with(".png"));
    assert!(t.blobs.contains(&vehicle.image));

    let updated = t
        .services
        .vehicles
        .update(
            &ctx(&alice),
            vehicle.id,
            VehiclePatch {
                image: Some(png(b"second")),
                ..VehiclePatch::default()
            },
        )
        .await
        .unwrap();
    assert_ne!(updated.image, vehicle.image);
    assert_eq!(updated.name, "Ranger");
    assert!(t.blobs.contains(&updated.image));
    assert!(!t.blobs.contains(&vehicle.image));
    assert_eq!(t.blobs.len(), 1);
}

#[tokio::test]
async fn non_image_uploads_are_rejected_before_any_write() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;

    let err = t
        .services
        .vehicles
        .create(
            &ctx(&alice),
            NewVehicle {
                user_id: alice.id,
                name: "Civic".to_owned(),
                make: None,
                model: None,
                year: None,
                vehicle_type: VehicleType::Car,
                image: Some(ride_journal_sdk::ImageUpload {
                    content_type: "application/pdf".to_owned(),
                    data: b"%PDF".to_vec(),
                }),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    assert!(t.blobs.is_empty());
}

#[tokio::test]
async fn only_the_event_author_manages_images() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    let event = t.event(&alice, &vehicle, "New wheels").await;

    let err = t
        .services
        .images
        .create(
            &ctx(&bob),
            NewImage {
                event_id: event.id,
                upload: png(b"bob's"),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorizationDenied { .. }));
    assert!(t.blobs.is_empty());

    let image = t
        .services
        .images
        .create(
            &ctx(&alice),
            NewImage {
                event_id: event.id,
                upload: png(b"wheels"),
            },
        )
        .await
        .unwrap();
    assert_eq!(image.event_id, event.id);
    assert_eq!(image.content_type, "image/png");
    assert!(t.blobs.contains(&image.reference));

    let err = t.services.images.delete(&ctx(&bob), image.id).await.unwrap_err();
    assert!(matches!(err, DomainError::AuthorizationDenied { .. }));
    assert!(t.blobs.contains(&image.reference));

    assert_eq!(t.services.images.delete(&ctx(&alice), image.id).await.unwrap(), 1);
    assert!(!t.blobs.contains(&image.reference));
    assert!(t.services.images.get(image.id).await.unwrap().is_none());
}

#[tokio::test]
async fn comments_require_an_existing_event() {
    let t = TestContext::new().await;
    let bob = t.user("bob").await;

    let err = t
        .services
        .comments
        .create(
            &ctx(&bob),
            NewComment {
                event_id: 99,
                user_id: bob.id,
                content: "first!".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ReferentialIntegrity { .. }));
    assert!(t
        .services
        .comments
        .list(Default::default(), PageRequest::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn failed_vehicle_insert_discards_the_uploaded_blob() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    t.db.execute_unprepared("DROP TABLE vehicles").await.unwrap();

    let err = t
        .services
        .vehicles
        .create(
            &ctx(&alice),
            NewVehicle {
                user_id: alice.id,
                name: "Civic".to_owned(),
                make: None,
                model: None,
                year: None,
                vehicle_type: VehicleType::Car,
                image: Some(png(b"front")),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Database { .. }), "{err:?}");
    assert!(t.blobs.is_empty());
}

#[tokio::test]
async fn failed_image_insert_discards_the_uploaded_blob() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    let event = t.event(&alice, &vehicle, "Wrap").await;
    t.db.execute_unprepared("DROP TABLE images").await.unwrap();

    let err = t
        .services
        .images
        .create(
            &ctx(&alice),
            NewImage {
                event_id: event.id,
                upload: png(b"side"),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Database { .. }), "{err:?}");
    assert!(t.blobs.is_empty());
}
