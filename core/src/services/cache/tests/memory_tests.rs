//! Tests for the in-process cache store

use std::time::Duration;

use crate::errors::CacheError;
use crate::services::cache::{CacheStore, MemoryCacheStore};

#[tokio::test]
async fn test_set_then_get() {
    let cache = MemoryCacheStore::new();

    cache
        .set("user_1", b"payload".to_vec(), Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(cache.get("user_1").await.unwrap(), Some(b"payload".to_vec()));
    assert_eq!(cache.get("user_2").await.unwrap(), None);
    assert_eq!(cache.get_calls(), 2);
    assert_eq!(cache.set_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_entry_expires_after_ttl() {
    let cache = MemoryCacheStore::new();
    cache
        .set("user_1", b"payload".to_vec(), Duration::from_secs(30))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(29)).await;
    assert!(cache.contains("user_1").await);

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(!cache.contains("user_1").await);
    assert_eq!(cache.get("user_1").await.unwrap(), None);
}

#[tokio::test]
async fn test_failure_injection() {
    let cache = MemoryCacheStore::new();
    cache.set_fail_reads(true);
    cache.set_fail_writes(true);

    assert!(matches!(
        cache.get("k").await,
        Err(CacheError::Unavailable { .. })
    ));
    assert!(matches!(
        cache.set("k", vec![1], Duration::from_secs(1)).await,
        Err(CacheError::Unavailable { .. })
    ));
    assert!(!cache.contains("k").await);
}
