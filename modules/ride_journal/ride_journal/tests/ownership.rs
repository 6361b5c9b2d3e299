#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Ownership guard behaviour across the resource services.

mod support;

use ride_journal::domain::error::DomainError;
use ride_journal_sdk::{
    CommentPatch, EventPatch, NewComment, NewVehicle, VehiclePatch, VehicleType,
};
use support::{ctx, new_event, TestContext};

#[tokio::test]
async fn stranger_cannot_update_event_but_author_can() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    let event = t.event(&alice, &vehicle, "Oil change").await;

    let denied = t
        .services
        .events
        .update(
            &ctx(&bob),
            event.id,
            EventPatch {
                title: Some("x".to_owned()),
                ..EventPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(denied, DomainError::authorization_denied("event", event.id));
    let unchanged = t.services.events.get(event.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Oil change");

    let updated = t
        .services
        .events
        .update(
            &ctx(&alice),
            event.id,
            EventPatch {
                title: Some("x".to_owned()),
                ..EventPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "x");
    // only the patched field changes
    assert_eq!(updated.odometer, event.odometer);
    assert_eq!(updated.event_type, event.event_type);
}

#[tokio::test]
async fn stranger_cannot_touch_vehicle() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;

    let err = t
        .services
        .vehicles
        .update(
            &ctx(&bob),
            vehicle.id,
            VehiclePatch {
                name: Some("Stolen".to_owned()),
                image: Some(support::png(b"nope")),
                ..VehiclePatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorizationDenied { entity: "vehicle", .. }));
    // a rejected caller never gets to write a blob
    assert!(t.blobs.is_empty());

    let err = t
        .services
        .vehicles
        .delete(&ctx(&bob), vehicle.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorizationDenied { .. }));

    let stored = t.services.vehicles.get(vehicle.id).await.unwrap().unwrap();
    assert_eq!(stored, vehicle);
}

#[tokio::test]
async fn stranger_cannot_edit_or_delete_comment() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    let event = t.event(&alice, &vehicle, "Trip").await;

    let comment = t
        .services
        .comments
        .create(
            &ctx(&bob),
            NewComment {
                event_id: event.id,
                user_id: bob.id,
                content: "Nice ride".to_owned(),
            },
        )
        .await
        .unwrap();

    // the event author does not own other people's comments
    let patch = CommentPatch {
        content: Some("edited".to_owned()),
    };
    let err = t
        .services
        .comments
        .update(&ctx(&alice), comment.id, patch.clone())
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::authorization_denied("comment", comment.id));
    let err = t
        .services
        .comments
        .delete(&ctx(&alice), comment.id)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::authorization_denied("comment", comment.id));

    let updated = t
        .services
        .comments
        .update(&ctx(&bob), comment.id, patch)
        .await
        .unwrap();
    assert_eq!(updated.content, "edited");
    assert_eq!(
        t.services.comments.delete(&ctx(&bob), comment.id).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn missing_rows_are_not_found_for_any_caller() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;

    let err = t
        .services
        .events
        .update(&ctx(&alice), 404, EventPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found("event", 404));

    let err = t
        .services
        .vehicles
        .update(&ctx(&alice), 404, VehiclePatch::default())
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found("vehicle", 404));

    let err = t
        .services
        .comments
        .delete(&ctx(&alice), 404)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::not_found("comment", 404));

    assert!(t.services.events.get(404).await.unwrap().is_none());
}

#[tokio::test]
async fn creating_on_behalf_of_someone_else_is_denied() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;

    let err = t
        .services
        .vehicles
        .create(
            &ctx(&bob),
            NewVehicle {
                user_id: alice.id,
                name: "Not mine".to_owned(),
                make: None,
                model: None,
                year: None,
                vehicle_type: VehicleType::Van,
                image: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorizationDenied { .. }));

    let vehicles = t.services.vehicles.list(Default::default(), Default::default()).await.unwrap();
    assert!(vehicles.is_empty());
}

#[tokio::test]
async fn event_owner_is_independent_of_vehicle_owner() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;

    // Bob posts a story about Alice's car.
    let event = t
        .services
        .events
        .create(&ctx(&bob), new_event(&bob, &vehicle, "Saw it at the meet"))
        .await
        .unwrap();
    assert_eq!(event.user_id, bob.id);

    // The vehicle's owner does not inherit rights over it.
    let err = t
        .services
        .events
        .delete(&ctx(&alice), event.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AuthorizationDenied { .. }));
    assert_eq!(t.services.events.delete(&ctx(&bob), event.id).await.unwrap(), 1);
}

#[tokio::test]
async fn users_can_only_change_themselves() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;

    let err = t
        .services
        .users
        .update(
            &ctx(&bob),
            alice.id,
            ride_journal_sdk::UserPatch {
                bio: Some("hacked".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::authorization_denied("user", alice.id));

    let err = t.services.users.delete(&ctx(&bob), alice.id).await.unwrap_err();
    assert_eq!(err, DomainError::authorization_denied("user", alice.id));
    assert!(t.services.users.get(alice.id).await.unwrap().is_some());
}
