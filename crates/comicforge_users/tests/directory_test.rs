//! Tests for the in-memory user directory lifecycle.

use comicforge_users::{MemoryUserDirectory, UserDirectory, UserProfile, UserStatus};

fn profile(uid: &str) -> UserProfile {
    UserProfile {
        uid: uid.to_string(),
        email: format!("{}@example.com", uid),
        display_name: Some(uid.to_uppercase()),
        photo_url: None,
    }
}

#[tokio::test]
async fn first_sign_in_creates_a_pending_record() {
    let directory = MemoryUserDirectory::new();

    assert!(directory.get("u1").await.unwrap().is_none());

    let record = directory.get_or_create(&profile("u1")).await.unwrap();
    assert_eq!(record.status, UserStatus::Pending);
    assert_eq!(record.email, "u1@example.com");

    // Second sign-in returns the same record rather than recreating it.
    let again = directory.get_or_create(&profile("u1")).await.unwrap();
    assert_eq!(again.created_at, record.created_at);
}

#[tokio::test]
async fn approve_stamps_time_and_actor() {
    let directory = MemoryUserDirectory::new();
    directory.get_or_create(&profile("u1")).await.unwrap();

    directory.approve("u1", "admin@example.com").await.unwrap();

    let record = directory.get("u1").await.unwrap().unwrap();
    assert_eq!(record.status, UserStatus::Approved);
    assert!(record.approved_at.is_some());
    assert_eq!(record.approved_by.as_deref(), Some("admin@example.com"));
    assert!(record.rejected_at.is_none());
}

#[tokio::test]
async fn reject_then_reset_returns_to_pending() {
    let directory = MemoryUserDirectory::new();
    directory.get_or_create(&profile("u1")).await.unwrap();

    directory.reject("u1", "admin@example.com").await.unwrap();
    let record = directory.get("u1").await.unwrap().unwrap();
    assert_eq!(record.status, UserStatus::Rejected);
    assert!(record.rejected_at.is_some());

    directory.reset("u1").await.unwrap();
    let record = directory.get("u1").await.unwrap().unwrap();
    assert_eq!(record.status, UserStatus::Pending);
    assert!(record.approved_at.is_none());
    assert!(record.rejected_at.is_none());
    assert!(record.rejected_by.is_none());
}

#[tokio::test]
async fn decisions_on_unknown_users_are_not_found() {
    let directory = MemoryUserDirectory::new();
    assert!(directory.approve("ghost", "admin").await.is_err());
    assert!(directory.reject("ghost", "admin").await.is_err());
    assert!(directory.reset("ghost").await.is_err());
}

#[tokio::test]
async fn pending_listing_filters_decided_users() {
    let directory = MemoryUserDirectory::new();
    directory.get_or_create(&profile("u1")).await.unwrap();
    directory.get_or_create(&profile("u2")).await.unwrap();
    directory.get_or_create(&profile("u3")).await.unwrap();

    directory.approve("u1", "admin").await.unwrap();
    directory.reject("u2", "admin").await.unwrap();

    let pending = directory.list_pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].uid, "u3");

    assert_eq!(directory.list().await.unwrap().len(), 3);
}
