//! Behaviour of the in-memory user repository.

use std::sync::Arc;

use crate::error::ServiceErrorKind;
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{Email, User, UserStatus, Username},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Repository = InMemoryUserRepository<DefaultClock>;

#[fixture]
fn repository() -> Repository {
    InMemoryUserRepository::new(Arc::new(DefaultClock))
}

fn user(username: &str, email: &str) -> User {
    User::new(username, email, "secret1", None, None).expect("valid user")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_stamps_timestamps_and_indexes(repository: Repository) {
    let stored = repository
        .store(&user("alice123", "alice@example.com"))
        .await
        .expect("store succeeds");

    assert!(stored.is_persisted());
    assert_eq!(stored.created_at(), stored.updated_at());

    let username = Username::new("alice123").expect("valid username");
    let email = Email::new("ALICE@example.com").expect("valid email");
    assert_eq!(
        repository.find_by_username(&username).await.expect("lookup"),
        Some(stored.clone())
    );
    assert_eq!(
        repository.find_by_email(&email).await.expect("lookup"),
        Some(stored)
    );
    assert!(repository.exists_by_username(&username).await.expect("lookup"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_username_and_email(repository: Repository) {
    repository
        .store(&user("alice123", "alice@example.com"))
        .await
        .expect("store succeeds");

    let same_name = repository
        .store(&user("alice123", "other@example.com"))
        .await;
    assert!(matches!(
        same_name,
        Err(UserRepositoryError::DuplicateUsername(_))
    ));

    let same_email = repository
        .store(&user("someone", "alice@example.com"))
        .await;
    assert!(matches!(
        same_email,
        Err(UserRepositoryError::DuplicateEmail(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_identifier(repository: Repository) {
    let alice = user("alice123", "alice@example.com");
    repository.store(&alice).await.expect("store succeeds");

    let result = repository.store(&alice).await;
    assert!(matches!(result, Err(UserRepositoryError::DuplicateUser(id)) if id == alice.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_preserves_creation_time_and_reindexes(repository: Repository) {
    let stored = repository
        .store(&user("alice123", "alice@example.com"))
        .await
        .expect("store succeeds");
    let mut changed = stored.clone();
    changed.deactivate(&[]).expect("deactivation succeeds");

    let updated = repository.update(&changed).await.expect("update succeeds");

    assert_eq!(updated.created_at(), stored.created_at());
    assert!(updated.updated_at() >= stored.updated_at());
    assert_eq!(
        repository
            .count_by_status(UserStatus::Inactive)
            .await
            .expect("count"),
        1
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_writes_from_stale_snapshots(repository: Repository) {
    let stored = repository
        .store(&user("alice123", "alice@example.com"))
        .await
        .expect("store succeeds");
    let mut renamed = stored.clone();
    let mut deactivated = stored.clone();

    renamed
        .update_profile(Some("Alice".to_owned()), None)
        .expect("active user edits profile");
    repository.update(&renamed).await.expect("first write succeeds");

    deactivated.deactivate(&[]).expect("deactivation succeeds");
    let err = repository
        .update(&deactivated)
        .await
        .expect_err("snapshot is stale");
    assert!(matches!(
        err,
        UserRepositoryError::VersionConflict { id, expected: 2, found: 1 } if id == stored.id()
    ));
    assert_eq!(err.kind(), ServiceErrorKind::Conflict);

    let current = repository
        .find_by_id(stored.id())
        .await
        .expect("lookup succeeds")
        .expect("user exists");
    assert_eq!(current.status(), UserStatus::Active);
    assert_eq!(current.first_name(), Some("Alice"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_rejects_unknown_user(repository: Repository) {
    let ghost = user("ghost", "ghost@example.com");
    let result = repository.update(&ghost).await;
    assert!(matches!(result, Err(UserRepositoryError::NotFound(id)) if id == ghost.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_frees_username_and_email(repository: Repository) {
    let alice = repository
        .store(&user("alice123", "alice@example.com"))
        .await
        .expect("store succeeds");

    assert!(repository.delete(alice.id()).await.expect("delete"));
    assert!(!repository.delete(alice.id()).await.expect("delete"));

    repository
        .store(&user("alice123", "alice@example.com"))
        .await
        .expect("name and email are free again");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn searches_are_case_insensitive_and_sorted(repository: Repository) {
    for (name, email, first) in [
        ("zoe_dev", "zoe@example.com", "Zoe"),
        ("alice_dev", "alice@example.com", "Alice"),
        ("bob", "bob@example.com", "Bobby"),
    ] {
        let mut candidate = user(name, email);
        candidate
            .update_profile(Some(first.to_owned()), None)
            .expect("active user edits profile");
        repository.store(&candidate).await.expect("store succeeds");
    }

    let by_username = repository.search_by_username("DEV").await.expect("search");
    let names: Vec<&str> = by_username
        .iter()
        .map(|found| found.username().as_str())
        .collect();
    assert_eq!(names, ["alice_dev", "zoe_dev"]);

    let by_first_name = repository.search_by_first_name("bob").await.expect("search");
    assert_eq!(by_first_name.len(), 1);
    assert!(
        repository
            .search_by_last_name("smith")
            .await
            .expect("search")
            .is_empty()
    );
}
