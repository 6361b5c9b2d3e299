#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Sign-up, credentials and self-service profile changes.

mod support;

use ride_journal::domain::error::DomainError;
use ride_journal_sdk::{NewUser, UserPatch};
use support::{ctx, TestContext, PASSWORD};

fn sign_up(username: &str, email: &str) -> NewUser {
    NewUser {
        username: username.to_owned(),
        email: email.to_owned(),
        password: PASSWORD.to_owned(),
        display_name: None,
        bio: Some("weekend mechanic".to_owned()),
    }
}

#[tokio::test]
async fn register_then_verify_credentials() {
    let t = TestContext::new().await;
    let user = t
        .services
        .users
        .register(sign_up("rider", "rider@example.com"))
        .await
        .unwrap();
    assert_eq!(user.username, "rider");
    assert_eq!(user.bio.as_deref(), Some("weekend mechanic"));

    let ok = t
        .services
        .users
        .verify_credentials("rider", PASSWORD)
        .await
        .unwrap();
    assert_eq!(ok.map(|u| u.id), Some(user.id));

    let wrong = t
        .services
        .users
        .verify_credentials("rider", "not the password")
        .await
        .unwrap();
    assert!(wrong.is_none());
    let unknown = t
        .services
        .users
        .verify_credentials("nobody", PASSWORD)
        .await
        .unwrap();
    assert!(unknown.is_none());
}

#[tokio::test]
async fn duplicate_username_or_email_conflicts() {
    let t = TestContext::new().await;
    t.services
        .users
        .register(sign_up("rider", "rider@example.com"))
        .await
        .unwrap();

    let err = t
        .services
        .users
        .register(sign_up("rider", "other@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));

    let err = t
        .services
        .users
        .register(sign_up("rider2", "rider@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn invalid_sign_up_is_a_validation_error() {
    let t = TestContext::new().await;
    let mut bad = sign_up("rider", "rider@example.com");
    bad.password = "short".to_owned();

    let err = t.services.users.register(bad).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::validation("password", "must be at least 8 characters")
    );
}

#[tokio::test]
async fn password_change_rehashes() {
    let t = TestContext::new().await;
    let user = t.user("rider").await;

    let updated = t
        .services
        .users
        .update(
            &ctx(&user),
            user.id,
            UserPatch {
                password: Some("a brand new secret".to_owned()),
                display_name: Some("Rider".to_owned()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.display_name.as_deref(), Some("Rider"));
    assert_eq!(updated.email, user.email);

    let users = &t.services.users;
    assert!(users.verify_credentials("rider", PASSWORD).await.unwrap().is_none());
    assert!(users
        .verify_credentials("rider", "a brand new secret")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn email_change_to_a_taken_address_conflicts() {
    let t = TestContext::new().await;
    let alice = t.user("alice").await;
    t.user("bob").await;

    let err = t
        .services
        .users
        .update(
            &ctx(&alice),
            alice.id,
            UserPatch {
                email: Some("bob@example.com".to_owned()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}
