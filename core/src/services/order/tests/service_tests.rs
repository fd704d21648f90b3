//! Unit tests for the order service

use std::sync::Arc;

use crate::domain::entities::good::Good;
use crate::domain::entities::user::{NewUser, User};
use crate::errors::OrderError;
use crate::repositories::MockOrderRepository;
use crate::services::order::OrderService;

fn buyer(id: u64) -> User {
    NewUser::new(format!("1380013800{}", id % 10), "hash", "buyer").into_user(id)
}

async fn setup() -> (Arc<MockOrderRepository>, OrderService<MockOrderRepository>) {
    let repo = Arc::new(MockOrderRepository::new());
    repo.insert_good(Good::new(7, 3, 100)).await;
    repo.insert_address(10).await;
    let service = OrderService::new(Arc::clone(&repo));
    (repo, service)
}

#[tokio::test]
async fn test_create_order_success() {
    let (repo, service) = setup().await;

    let order = service.create_order(&buyer(1), 7, 10).await.unwrap();

    assert_eq!(order.good_id, 7);
    assert_eq!(order.buyer_id, 1);
    assert_eq!(order.address_id, 10);
    assert_eq!(order.pay_money, 100);
    assert!(repo.good(7).await.unwrap().is_sold);
}

#[tokio::test]
async fn test_sold_good_fails_fast_without_reservation() {
    let (repo, service) = setup().await;
    service.create_order(&buyer(1), 7, 10).await.unwrap();

    let result = service.create_order(&buyer(2), 7, 10).await;

    assert_eq!(result.unwrap_err(), OrderError::AlreadySold);
    assert_eq!(repo.place_order_calls(), 1);
    assert_eq!(repo.orders_for_good(7).await.len(), 1);
}

#[tokio::test]
async fn test_unknown_good_is_invalid_reference() {
    let (repo, service) = setup().await;

    let result = service.create_order(&buyer(1), 99, 10).await;

    assert!(matches!(result, Err(OrderError::InvalidReference { .. })));
    assert_eq!(repo.place_order_calls(), 0);
}

#[tokio::test]
async fn test_unknown_address_is_invalid_reference() {
    let (repo, service) = setup().await;

    let result = service.create_order(&buyer(1), 7, 404).await;

    assert!(matches!(result, Err(OrderError::InvalidReference { .. })));
    assert!(!repo.good(7).await.unwrap().is_sold);
}

#[tokio::test]
async fn test_store_failure_is_store_unavailable() {
    let (repo, service) = setup().await;
    repo.set_unavailable(true);

    let result = service.create_order(&buyer(1), 7, 10).await;

    assert_eq!(result.unwrap_err(), OrderError::StoreUnavailable);
    repo.set_unavailable(false);
    assert!(!repo.good(7).await.unwrap().is_sold);
}

#[tokio::test]
async fn test_price_is_taken_at_reservation() {
    let (repo, service) = setup().await;
    let mut repriced = Good::new(8, 3, 250);
    repriced.name = "lamp".to_string();
    repo.insert_good(repriced).await;

    let order = service.create_order(&buyer(1), 8, 10).await.unwrap();
    assert_eq!(order.pay_money, 250);
}

#[tokio::test]
async fn test_get_own_order() {
    let (_repo, service) = setup().await;
    let placed = service.create_order(&buyer(1), 7, 10).await.unwrap();

    let fetched = service.get_order(&buyer(1), placed.id).await.unwrap();
    assert_eq!(fetched, placed);
}

#[tokio::test]
async fn test_get_foreign_or_missing_order_is_not_found() {
    let (_repo, service) = setup().await;
    let placed = service.create_order(&buyer(1), 7, 10).await.unwrap();

    assert_eq!(
        service.get_order(&buyer(2), placed.id).await.unwrap_err(),
        OrderError::NotFound
    );
    assert_eq!(
        service.get_order(&buyer(1), 12345).await.unwrap_err(),
        OrderError::NotFound
    );
}
