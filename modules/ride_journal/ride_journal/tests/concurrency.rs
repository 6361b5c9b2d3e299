#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Racing mutations on the same row.

mod support;

use ride_journal::domain::error::DomainError;
use ride_journal_sdk::{CommentFilter, EventPatch, NewComment, NewLike, PageRequest, VehicleType};
use support::{ctx, TestContext};

#[tokio::test]
async fn update_racing_delete_leaves_no_partial_state() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let bob = t.user("bob").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;

    for round in 0..5 {
        let event = t.event(&alice, &vehicle, &format!("round {round}")).await;
        t.services
            .comments
            .create(
                &ctx(&bob),
                NewComment {
                    event_id: event.id,
                    user_id: bob.id,
                    content: "racing".to_owned(),
                },
            )
            .await
            .unwrap();

        let patch = EventPatch {
            title: Some("renamed".to_owned()),
            ..EventPatch::default()
        };
        let alice_ctx = ctx(&alice);
        let (updated, deleted) = tokio::join!(
            t.services.events.update(&alice_ctx, event.id, patch),
            t.services.events.delete(&alice_ctx, event.id),
        );

        assert_eq!(deleted.unwrap(), 1);
        match updated {
            Ok(e) => assert_eq!(e.title, "renamed"),
            Err(e) => assert_eq!(e, DomainError::not_found("event", event.id)),
        }
        assert!(t.services.events.get(event.id).await.unwrap().is_none());
        let orphans = t
            .services
            .comments
            .list(CommentFilter::ByEvent(event.id), PageRequest::default())
            .await
            .unwrap();
        assert!(orphans.is_empty());
    }
}

#[tokio::test]
async fn concurrent_identical_likes_store_one_row() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    let vehicle = t.vehicle(&alice, "Civic", VehicleType::Car).await;
    let event = t.event(&alice, &vehicle, "Launch").await;

    let like = NewLike {
        user_id: alice.id,
        event_id: event.id,
    };
    let alice_ctx = ctx(&alice);
    let (a, b, c) = tokio::join!(
        t.services.likes.create(&alice_ctx, like),
        t.services.likes.create(&alice_ctx, like),
        t.services.likes.create(&alice_ctx, like),
    );
    let (a, b, c) = (a.unwrap(), b.unwrap(), c.unwrap());
    assert_eq!(a.id, b.id);
    assert_eq!(b.id, c.id);

    let full = t
        .services
        .events
        .get_with_relations(event.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(full.like_count, 1);
}
