#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Handler functions: authentication, envelopes and status mapping.

mod support;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use http::StatusCode;
use ride_journal::api::rest::dto::{
    CreateCommentReq, CreateEventReq, CreateImageReq, CreateLikeReq, CreateUserReq,
    CreateVehicleReq, ImageUploadReq, ListQuery, UpdateEventReq, UpdateVehicleReq,
};
use ride_journal::api::rest::handlers::{comments, events, images, likes, users, vehicles};
use serde_json::json;
use support::{bearer_for, TestContext, PASSWORD};

fn vehicle_req(user_id: i32, vehicle_type: &str) -> CreateVehicleReq {
    CreateVehicleReq {
        user_id,
        name: "Civic".to_owned(),
        make: None,
        model: None,
        year: Some(2008),
        vehicle_type: vehicle_type.to_owned(),
        image: None,
    }
}

fn event_req(user_id: i32, vehicle_id: i32) -> CreateEventReq {
    CreateEventReq {
        vehicle_id,
        user_id,
        title: "Clutch".to_owned(),
        detail: Some("Replaced the clutch kit".to_owned()),
        event_type: "repair".to_owned(),
        date: "2024-05-17".to_owned(),
        odometer: Some(120_000),
        published: true,
    }
}

#[tokio::test]
async fn mutations_without_credentials_are_unauthorized() {
    let t = TestContext::new().await;
    let api = t.api();
    let alice = t.user("alice").await;

    let err = vehicles::create_vehicle(&api, None, vehicle_req(alice.id, "car"))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);

    let err = vehicles::create_vehicle(&api, Some("Bearer garbage"), vehicle_req(alice.id, "car"))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    assert_eq!(err.envelope().result, 401);
}

#[tokio::test]
async fn create_and_read_back_with_envelopes() {
    let t = TestContext::new().await;
    let api = t.api();

    let registered = users::register_user(
        &api,
        CreateUserReq {
            username: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password: PASSWORD.to_owned(),
            display_name: None,
            bio: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(registered.result, 200);
    let alice_id = registered.data.id;
    let bearer = bearer_for(alice_id);

    let created = vehicles::create_vehicle(&api, Some(&bearer), vehicle_req(alice_id, "car"))
        .await
        .unwrap();
    assert_eq!(created.result, 200);
    assert_eq!(created.status(), StatusCode::OK);
    assert_eq!(created.data.image, "default");
    assert_eq!(created.data.vehicle_type, "car");

    let event = events::create_event(&api, Some(&bearer), event_req(alice_id, created.data.id))
        .await
        .unwrap();
    assert_eq!(event.data.date, "2024-05-17");

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["result"], 200);
    assert_eq!(json["data"]["eventType"], "repair");
    assert_eq!(json["data"]["vehicleId"], created.data.id);

    let listed = events::list_events_by_vehicle(&api, created.data.id, &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(listed.data.len(), 1);

    let profile = users::get_user(&api, alice_id).await.unwrap();
    let json = serde_json::to_value(&profile).unwrap();
    assert!(json["data"].get("email").is_none());

    let me = users::get_me(&api, Some(&bearer)).await.unwrap();
    assert_eq!(me.data.email, "alice@example.com");
}

#[tokio::test]
async fn sentinel_outcomes_map_to_statuses() {
    let t = TestContext::new().await;
    let api = t.api();
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let alice_bearer = bearer_for(alice.id);
    let bob_bearer = bearer_for(bob.id);

    let vehicle = vehicles::create_vehicle(&api, Some(&alice_bearer), vehicle_req(alice.id, "suv"))
        .await
        .unwrap()
        .data;
    let event = events::create_event(&api, Some(&alice_bearer), event_req(alice.id, vehicle.id))
        .await
        .unwrap()
        .data;

    // another user's resource
    let err = events::update_event(
        &api,
        Some(&bob_bearer),
        event.id,
        UpdateEventReq {
            title: Some("mine now".to_owned()),
            ..UpdateEventReq::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::UNAUTHORIZED);

    // missing row
    let err = events::get_event(&api, 4242).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.envelope().result, 404);

    // closed enumerations
    let err = vehicles::create_vehicle(
        &api,
        Some(&alice_bearer),
        vehicle_req(alice.id, "hovercraft"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    let err = vehicles::list_vehicles_by_type(&api, "blimp", &ListQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

    // duplicate sign-up
    let err = users::register_user(
        &api,
        CreateUserReq {
            username: "alice".to_owned(),
            email: "alice2@example.com".to_owned(),
            password: PASSWORD.to_owned(),
            display_name: None,
            bio: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.status, StatusCode::CONFLICT);

    // dangling reference surfaces as an opaque internal error
    let err = events::create_event(&api, Some(&alice_bearer), event_req(alice.id, 99))
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!err.message.contains("99"));
}

#[tokio::test]
async fn attachments_through_handlers() {
    let t = TestContext::new().await;
    let api = t.api();
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let alice_bearer = bearer_for(alice.id);
    let bob_bearer = bearer_for(bob.id);

    let vehicle = vehicles::create_vehicle(&api, Some(&alice_bearer), vehicle_req(alice.id, "car"))
        .await
        .unwrap()
        .data;
    let event = events::create_event(&api, Some(&alice_bearer), event_req(alice.id, vehicle.id))
        .await
        .unwrap()
        .data;

    let image = images::create_image(
        &api,
        Some(&alice_bearer),
        CreateImageReq {
            event_id: event.id,
            image: ImageUploadReq {
                content_type: "image/jpeg".to_owned(),
                data: STANDARD.encode(b"jpeg bytes"),
            },
        },
    )
    .await
    .unwrap()
    .data;
    assert!(image.reference.ends_with(".jpg"));
    assert!(t.blobs.contains(&image.reference));

    let comment = comments::create_comment(
        &api,
        Some(&bob_bearer),
        CreateCommentReq {
            event_id: event.id,
            user_id: bob.id,
            content: "clean install".to_owned(),
        },
    )
    .await
    .unwrap()
    .data;
    assert_eq!(comment.user_id, bob.id);

    let like_req = CreateLikeReq {
        user_id: bob.id,
        event_id: event.id,
    };
    let first = likes::create_like(&api, Some(&bob_bearer), like_req).await.unwrap();
    let again = likes::create_like(&api, Some(&bob_bearer), like_req).await.unwrap();
    assert_eq!(first.data.id, again.data.id);

    let full = events::get_event_with_relations(&api, event.id).await.unwrap().data;
    assert_eq!(full.like_count, 1);
    assert_eq!(full.images.len(), 1);
    assert_eq!(full.comments.len(), 1);

    let deleted = events::delete_event(&api, Some(&alice_bearer), event.id)
        .await
        .unwrap();
    assert_eq!(deleted.data.deleted, 1);
    assert!(!t.blobs.contains(&image.reference));

    let err = likes::get_like(&api, first.data.id).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_query_strings_are_lenient() {
    let t = TestContext::new().await;
    let api = t.api();
    let alice = t.user("alice").await;
    let bearer = bearer_for(alice.id);
    for _ in 0..3 {
        vehicles::create_vehicle(&api, Some(&bearer), vehicle_req(alice.id, "van"))
            .await
            .unwrap();
    }

    let query = ListQuery {
        limit: Some("2".to_owned()),
        offset: Some("nope".to_owned()),
    };
    let page = vehicles::list_vehicles(&api, &query).await.unwrap();
    assert_eq!(page.data.len(), 2);

    let by_user = vehicles::list_vehicles_by_user(&api, alice.id, &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(by_user.data.len(), 3);

    let far = ListQuery {
        limit: None,
        offset: Some(u64::MAX.to_string()),
    };
    let beyond = vehicles::list_vehicles(&api, &far).await.unwrap();
    assert!(beyond.data.is_empty());
}

#[tokio::test]
async fn null_fields_in_updates_keep_stored_values() {
    let t = TestContext::new().await;
    let api = t.api();
    let alice = t.user("alice").await;
    let bearer = bearer_for(alice.id);

    let mut req = vehicle_req(alice.id, "car");
    req.make = Some("Honda".to_owned());
    let vehicle = vehicles::create_vehicle(&api, Some(&bearer), req)
        .await
        .unwrap()
        .data;

    let patch: UpdateVehicleReq =
        serde_json::from_value(json!({ "make": null, "year": 2010 })).unwrap();
    let updated = vehicles::update_vehicle(&api, Some(&bearer), vehicle.id, patch)
        .await
        .unwrap()
        .data;
    assert_eq!(updated.make.as_deref(), Some("Honda"));
    assert_eq!(updated.year, Some(2010));

    let event = events::create_event(&api, Some(&bearer), event_req(alice.id, vehicle.id))
        .await
        .unwrap()
        .data;
    let patch: UpdateEventReq =
        serde_json::from_value(json!({ "detail": null, "odometer": 130_000 })).unwrap();
    let updated = events::update_event(&api, Some(&bearer), event.id, patch)
        .await
        .unwrap()
        .data;
    assert_eq!(updated.detail.as_deref(), Some("Replaced the clutch kit"));
    assert_eq!(updated.odometer, Some(130_000));
}
