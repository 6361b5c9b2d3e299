#![allow(clippy::unwrap_used, clippy::expect_used)]

//! List semantics: default window, clamping, filters and ordering.

mod support;

use ride_journal::domain::service::ServiceConfig;
use ride_journal_sdk::{EventFilter, EventType, PageRequest, VehicleFilter, VehicleType};
use support::{ctx, new_event, TestContext};

#[tokio::test]
async fn list_without_window_returns_first_ten() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    for i in 0..12 {
        t.event(&alice, &vehicle, &format!("event {i}")).await;
    }

    let page = t
        .services
        .events
        .list(EventFilter::All, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.len(), 10);
    // newest first, starting at offset 0
    assert_eq!(page[0].title, "event 11");
    assert_eq!(page[9].title, "event 2");

    let rest = t
        .services
        .events
        .list(EventFilter::All, PageRequest::new(10, 10))
        .await
        .unwrap();
    let titles: Vec<_> = rest.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["event 1", "event 0"]);
}

#[tokio::test]
async fn garbage_query_values_fall_back_to_defaults() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    for i in 0..11 {
        t.vehicle(&alice, &format!("v{i}"), VehicleType::Car).await;
    }

    let page = PageRequest::from_query(Some("lots"), Some("-1"));
    let vehicles = t
        .services
        .vehicles
        .list(VehicleFilter::All, page)
        .await
        .unwrap();
    assert_eq!(vehicles.len(), 10);
    assert_eq!(vehicles[0].name, "v10");
}

#[tokio::test]
async fn vehicles_by_type_are_filtered_and_newest_first() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    for i in 0..4 {
        t.vehicle(&alice, &format!("suv-a{i}"), VehicleType::Suv).await;
        t.vehicle(&bob, &format!("car-b{i}"), VehicleType::Car).await;
        t.vehicle(&bob, &format!("suv-b{i}"), VehicleType::Suv).await;
    }

    let suvs = t
        .services
        .vehicles
        .list(VehicleFilter::ByType(VehicleType::Suv), PageRequest::new(5, 0))
        .await
        .unwrap();
    assert_eq!(suvs.len(), 5);
    assert!(suvs.iter().all(|v| v.vehicle_type == VehicleType::Suv));
    assert!(suvs
        .windows(2)
        .all(|w| (w[0].created_at, w[0].id) > (w[1].created_at, w[1].id)));
    assert_eq!(suvs[0].name, "suv-b3");

    let bobs = t
        .services
        .vehicles
        .list(VehicleFilter::ByUser(bob.id), PageRequest::new(100, 0))
        .await
        .unwrap();
    assert_eq!(bobs.len(), 8);
    assert!(bobs.iter().all(|v| v.user_id == bob.id));
}

#[tokio::test]
async fn events_filter_by_vehicle_user_and_type() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let civic = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    let van = t.vehicle(&bob, "Transit", VehicleType::Van).await;

    t.event(&alice, &civic, "brakes").await;
    t.event(&bob, &civic, "spotted").await;
    let mut story = new_event(&bob, &van, "road trip");
    story.event_type = EventType::Story;
    t.services.events.create(&ctx(&bob), story).await.unwrap();

    let on_civic = t
        .services
        .events
        .list(EventFilter::ByVehicle(civic.id), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(on_civic.len(), 2);

    let by_bob = t
        .services
        .events
        .list(EventFilter::ByUser(bob.id), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(by_bob.len(), 2);

    let stories = t
        .services
        .events
        .list(EventFilter::ByType(EventType::Story), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(stories.len(), 1);
    assert_eq!(stories[0].title, "road trip");

    let none = t
        .services
        .events
        .list(EventFilter::ByType(EventType::Maintenance), PageRequest::default())
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn oversized_limit_is_clamped() {
    let t = TestContext::with_config(ServiceConfig {
        max_page_size: 3,
        ..ServiceConfig::default()
    })
    .await;
    let alice = t.user("alice").await;
    for i in 0..5 {
        t.vehicle(&alice, &format!("v{i}"), VehicleType::Truck).await;
    }

    let vehicles = t
        .services
        .vehicles
        .list(VehicleFilter::All, PageRequest::new(1_000, 0))
        .await
        .unwrap();
    assert_eq!(vehicles.len(), 3);

    let users = t.services.users.list(PageRequest::new(1_000, 0)).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn offset_past_the_end_is_empty() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    t.vehicle(&alice, "Civic", VehicleType::Car).await;

    let vehicles = t
        .services
        .vehicles
        .list(VehicleFilter::All, PageRequest::new(10, 50))
        .await
        .unwrap();
    assert!(vehicles.is_empty());
}

#[tokio::test]
async fn offset_beyond_the_signed_range_is_empty() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    t.event(&alice, &vehicle, "Brakes").await;

    let huge = PageRequest::from_query(None, Some("18446744073709551615"));
    assert_eq!(huge.offset, Some(u64::MAX));

    let events = t
        .services
        .events
        .list(EventFilter::All, huge)
        .await
        .unwrap();
    assert_eq!(events, vec![]);
    let vehicles = t
        .services
        .vehicles
        .list(VehicleFilter::All, huge)
        .await
        .unwrap();
    assert!(vehicles.is_empty());
    let users = t.services.users.list(huge).await.unwrap();
    assert!(users.is_empty());
}
