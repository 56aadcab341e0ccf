//! Unit tests for mock user repository implementation

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(email: &str) -> User {
    User::new("Test".to_string(), email.to_string(), "hash".to_string())
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = MockUserRepository::new();
    let created = repo.create(user("a@x.com")).await.unwrap();

    let by_id = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(by_id.as_ref().map(|u| u.email.as_str()), Some("a@x.com"));

    let by_email = repo.find_by_email("a@x.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(created.id));

    assert!(repo.exists_by_email("a@x.com").await.unwrap());
    assert!(!repo.exists_by_email("b@x.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let repo = MockUserRepository::new();
    repo.create(user("a@x.com")).await.unwrap();

    let result = repo.create(user("a@x.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_missing_user() {
    let repo = MockUserRepository::new();
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}
