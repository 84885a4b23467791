use catalog_backend::errors::domain::{ConflictKind, DomainError};
use catalog_backend::repos::{NewUser, UserRepository};

use super::user_repo;

fn new_user(id: &str, email: &str) -> NewUser {
    NewUser {
        id: id.to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".to_string(),
        name: "Ada".to_string(),
    }
}

#[tokio::test]
async fn create_and_find() {
    let repo = user_repo().await;
    let created = repo.create(new_user("u-1", "ada@example.com")).await.unwrap();
    assert_eq!(created.email, "ada@example.com");

    let by_id = repo.find_by_id("u-1").await.unwrap().unwrap();
    let by_email = repo.find_by_email("ada@example.com").await.unwrap().unwrap();
    assert_eq!(by_id.id, by_email.id);
    assert_eq!(by_id.password_hash, created.password_hash);
    assert!(repo.find_by_id("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_maps_to_unique_email_conflict() {
    let repo = user_repo().await;
    repo.create(new_user("u-1", "ada@example.com")).await.unwrap();

    let err = repo
        .create(new_user("u-2", "ada@example.com"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, DomainError::Conflict(ConflictKind::UniqueEmail, _)),
        "{err:?}"
    );

    repo.create(new_user("u-3", "bob@example.com")).await.unwrap();
    let err = repo
        .update_profile("u-3", "ada@example.com", "Bob")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UniqueEmail, _)
    ));
}

#[tokio::test]
async fn update_and_delete() {
    let repo = user_repo().await;
    let created = repo.create(new_user("u-1", "ada@example.com")).await.unwrap();

    let updated = repo
        .update_profile("u-1", "ada.l@example.com", "Ada Lovelace")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Ada Lovelace");
    assert!(updated.updated_at >= created.updated_at);

    assert!(repo.update_password_hash("u-1", "new-hash").await.unwrap());
    assert_eq!(
        repo.find_by_id("u-1").await.unwrap().unwrap().password_hash,
        "new-hash"
    );
    assert!(!repo.update_password_hash("nobody", "x").await.unwrap());
    assert!(repo
        .update_profile("nobody", "x@example.com", "X")
        .await
        .unwrap()
        .is_none());

    assert!(repo.delete("u-1").await.unwrap());
    assert!(!repo.delete("u-1").await.unwrap());
}
