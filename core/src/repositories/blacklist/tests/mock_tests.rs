//! Unit tests for mock blacklist repository implementation

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::token::BlacklistEntry;
use crate::repositories::blacklist::{MockTokenBlacklistRepository, TokenBlacklistRepository};

#[tokio::test]
async fn test_insert_is_idempotent() {
    let repo = MockTokenBlacklistRepository::new();
    let entry = BlacklistEntry::for_token("token", Utc::now() + Duration::hours(1));

    assert!(repo.insert_if_absent(entry.clone()).await.unwrap());
    assert!(!repo.insert_if_absent(entry.clone()).await.unwrap());
    assert!(repo.contains(&entry.token_hash).await.unwrap());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_concurrent_inserts_have_one_winner() {
    let repo = Arc::new(MockTokenBlacklistRepository::new());
    let expires_at = Utc::now() + Duration::hours(1);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.insert_if_absent(BlacklistEntry::for_token("same", expires_at))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn test_purge_expired_only_removes_dead_entries() {
    let repo = MockTokenBlacklistRepository::new();
    let live = BlacklistEntry::for_token("live", Utc::now() + Duration::hours(1));
    let dead = BlacklistEntry::for_token("dead", Utc::now() - Duration::seconds(1));

    repo.insert_if_absent(live.clone()).await.unwrap();
    repo.insert_if_absent(dead.clone()).await.unwrap();

    assert_eq!(repo.purge_expired().await.unwrap(), 1);
    assert!(repo.contains(&live.token_hash).await.unwrap());
    assert!(!repo.contains(&dead.token_hash).await.unwrap());
}

#[tokio::test]
async fn test_failing_writes() {
    let repo = MockTokenBlacklistRepository::new();
    repo.set_fail_writes(true);

    let entry = BlacklistEntry::for_token("token", Utc::now() + Duration::hours(1));
    assert!(repo.insert_if_absent(entry).await.is_err());
}
